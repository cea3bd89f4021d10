//! Lexer (tokenizer) for expression input
//!
//! Converts raw text into a flat [`Token`] stream plus a per-character error
//! mask. Unrecognizable characters are flagged and skipped rather than
//! aborting the scan, so one pass collects every lexical error in the input.

use std::fmt;

/// Token kinds produced by the lexer, plus the parser's sentinel.
///
/// [`TokenKind::End`] never appears in lexer output; the parser appends it
/// once before parsing so that the grammar's epsilon rules have a
/// well-defined lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Times,
    Divide,
    End,
}

/// One lexed token: a kind plus its numeric payload.
///
/// `value` holds the accumulated decimal literal for `Number` tokens and the
/// operator's character code for operator tokens; it is unused for `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: i64,
}

impl Token {
    /// Builds a `Number` token holding the accumulated literal.
    pub fn number(value: i64) -> Self {
        Self {
            kind: TokenKind::Number,
            value,
        }
    }

    /// Builds an operator token from its kind and source character.
    pub fn operator(kind: TokenKind, ch: u8) -> Self {
        Self {
            kind,
            value: i64::from(ch),
        }
    }

    /// Builds the end-of-input sentinel appended by the parser.
    pub fn end() -> Self {
        Self {
            kind: TokenKind::End,
            value: 0,
        }
    }

    /// Returns true for the four operator kinds.
    pub fn is_operator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Times | TokenKind::Divide
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "(n, {})", self.value),
            TokenKind::Plus | TokenKind::Minus | TokenKind::Times | TokenKind::Divide => {
                write!(f, "(o, {})", self.value as u8 as char)
            }
            TokenKind::End => write!(f, "end of input"),
        }
    }
}

/// Diagnostic for one input character the lexer could not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrecognizedCharacter {
    /// Byte index of the offending character.
    pub position: usize,
    /// The offending character itself.
    pub character: char,
}

impl fmt::Display for UnrecognizedCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at index {}: character '{}' is not recognized",
            self.position, self.character
        )
    }
}

impl std::error::Error for UnrecognizedCharacter {}

/// Lexer for flat arithmetic expressions.
///
/// Owns the results of the most recent [`lex`](Lexer::lex) call: the token
/// sequence, a per-character error mask the same length as the input, and a
/// success flag. Re-running `lex` replaces all three.
#[derive(Debug)]
pub struct Lexer {
    tokens: Vec<Token>,
    error_info: Vec<bool>,
    success: bool,
}

impl Lexer {
    /// Create a lexer with no results yet.
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            error_info: Vec::new(),
            success: true,
        }
    }

    /// Tokenize the entire input, replacing any previous results.
    ///
    /// Scans byte by byte: `+ - * /` each yield one operator token, a maximal
    /// run of ASCII digits yields one `Number` token, and any other byte is
    /// flagged in the error mask and skipped. The scan always reaches the end
    /// of the input; the returned flag is false iff at least one byte was
    /// flagged. No sentinel is appended here, that is the parser's job.
    pub fn lex(&mut self, input: &str) -> bool {
        self.success = true;
        self.tokens.clear();
        self.error_info.clear();
        self.error_info.resize(input.len(), false);

        let bytes = input.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'+' => {
                    self.tokens.push(Token::operator(TokenKind::Plus, b'+'));
                    i += 1;
                }
                b'-' => {
                    self.tokens.push(Token::operator(TokenKind::Minus, b'-'));
                    i += 1;
                }
                b'*' => {
                    self.tokens.push(Token::operator(TokenKind::Times, b'*'));
                    i += 1;
                }
                b'/' => {
                    self.tokens.push(Token::operator(TokenKind::Divide, b'/'));
                    i += 1;
                }
                b'0'..=b'9' => {
                    // Maximal munch: the run ends at the first non-digit.
                    // Accumulation wraps on overflow (fixed-width i64).
                    let mut value: i64 = 0;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        value = value
                            .wrapping_mul(10)
                            .wrapping_add(i64::from(bytes[i] - b'0'));
                        i += 1;
                    }
                    self.tokens.push(Token::number(value));
                }
                _ => {
                    self.error_info[i] = true;
                    self.success = false;
                    i += 1;
                }
            }
        }

        self.success
    }

    /// Tokens from the most recent `lex` call, in input order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Per-character error mask; same length as the lexed input.
    pub fn error_info(&self) -> &[bool] {
        &self.error_info
    }

    /// False iff the most recent `lex` call flagged at least one character.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Typed diagnostics for every flagged position of the most recent `lex`
    /// call. `input` must be the string that was lexed; it is only consulted
    /// to report the offending characters.
    pub fn diagnostics(&self, input: &str) -> Vec<UnrecognizedCharacter> {
        let bytes = input.as_bytes();
        self.error_info
            .iter()
            .enumerate()
            .filter(|&(_, &flagged)| flagged)
            .map(|(position, _)| UnrecognizedCharacter {
                position,
                character: bytes.get(position).map(|&b| b as char).unwrap_or('?'),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new();
        assert!(lexer.lex("12+34"));

        let tokens = lexer.tokens();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::number(12));
        assert_eq!(tokens[1], Token::operator(TokenKind::Plus, b'+'));
        assert_eq!(tokens[2], Token::number(34));
    }

    #[test]
    fn test_maximal_munch() {
        let mut lexer = Lexer::new();
        assert!(lexer.lex("007*1234567890"));

        let tokens = lexer.tokens();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::number(7));
        assert_eq!(tokens[2], Token::number(1234567890));
    }

    #[test]
    fn test_errors_do_not_halt_lexing() {
        let mut lexer = Lexer::new();
        assert!(!lexer.lex("1a+3e/2-9*$"));

        // Tokens around the bad characters are still produced.
        let kinds: Vec<TokenKind> = lexer.tokens().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Divide,
                TokenKind::Number,
                TokenKind::Minus,
                TokenKind::Number,
                TokenKind::Times,
            ]
        );

        let flagged: Vec<usize> = lexer
            .error_info()
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(flagged, vec![1, 4, 10]);
    }

    #[test]
    fn test_error_mask_matches_input_length() {
        let mut lexer = Lexer::new();
        lexer.lex("1?2");
        assert_eq!(lexer.error_info().len(), 3);

        lexer.lex("");
        assert!(lexer.success());
        assert!(lexer.tokens().is_empty());
        assert!(lexer.error_info().is_empty());
    }

    #[test]
    fn test_diagnostics_report_character_and_index() {
        let mut lexer = Lexer::new();
        lexer.lex("9#8");

        let diagnostics = lexer.diagnostics("9#8");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].position, 1);
        assert_eq!(diagnostics[0].character, '#');
    }

    #[test]
    fn test_relex_is_idempotent() {
        let mut lexer = Lexer::new();
        lexer.lex("12+x4");
        let first_tokens = lexer.tokens().to_vec();
        let first_errors = lexer.error_info().to_vec();
        let first_success = lexer.success();

        lexer.lex("12+x4");
        assert_eq!(lexer.tokens(), first_tokens.as_slice());
        assert_eq!(lexer.error_info(), first_errors.as_slice());
        assert_eq!(lexer.success(), first_success);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::number(12).to_string(), "(n, 12)");
        assert_eq!(
            Token::operator(TokenKind::Divide, b'/').to_string(),
            "(o, /)"
        );
        assert!(Token::operator(TokenKind::Divide, b'/').is_operator());
        assert!(!Token::number(12).is_operator());
        assert!(!Token::end().is_operator());
    }
}
