//! Recursive-descent parser with panic-mode error recovery
//!
//! The parser consumes the lexer's token sequence, appends one end-of-input
//! sentinel, and expands the fixed LL(1) grammar
//!
//! ```text
//! E -> T A
//! A -> '+' T A | '-' T A | ε
//! B -> '*' F B | '/' F B | ε
//! T -> F B
//! F -> NUMBER
//! ```
//!
//! eagerly at construction time. A single dispatch function keyed by
//! [`Nonterminal`] drives all five rules against a table of predict sets, so
//! the recovery loop exists exactly once: whenever the lookahead is outside
//! the current rule's predict set, the token is flagged, discarded, and the
//! same rule is retried. The cursor never moves backward, so the parse is
//! bounded by the token count and always leaves a populated tree root.

use crate::frontend::cst::{Cst, CstKind, CstNode, NodeId};
use crate::frontend::lexer::{Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;

/// The grammar's five nonterminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    E,
    A,
    B,
    T,
    F,
}

impl Nonterminal {
    fn cst_kind(self) -> CstKind {
        match self {
            Nonterminal::E => CstKind::E,
            Nonterminal::A => CstKind::A,
            Nonterminal::B => CstKind::B,
            Nonterminal::T => CstKind::T,
            Nonterminal::F => CstKind::F,
        }
    }
}

/// Predict sets for every nonterminal, including the sentinel-driven epsilon
/// entries for `A` and `B`.
fn predict_table() -> FxHashMap<Nonterminal, &'static [TokenKind]> {
    use TokenKind::{Divide, End, Minus, Number, Plus, Times};

    let mut table: FxHashMap<Nonterminal, &'static [TokenKind]> = FxHashMap::default();
    table.insert(Nonterminal::E, &[Number]);
    table.insert(Nonterminal::A, &[Plus, Minus, End]);
    table.insert(Nonterminal::B, &[Times, Divide, Plus, Minus, End]);
    table.insert(Nonterminal::T, &[Number]);
    table.insert(Nonterminal::F, &[Number]);
    table
}

/// Diagnostic for one token the parser flagged and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedToken {
    /// Index of the offending token, counting the sentinel as the last slot.
    pub position: usize,
    /// The offending token itself.
    pub token: Token,
}

impl fmt::Display for UnexpectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at token index {}: unexpected {}",
            self.position, self.token
        )
    }
}

impl std::error::Error for UnexpectedToken {}

/// Recursive-descent parser over a lexed token sequence.
///
/// Construction is total: any token sequence, including one salvaged from a
/// failed lex, yields a populated tree root, a per-token error mask, and a
/// success flag.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    cst: Cst,
    error_info: Vec<bool>,
    success: bool,
    predict: FxHashMap<Nonterminal, &'static [TokenKind]>,
}

impl Parser {
    /// Append the end-of-input sentinel and parse eagerly.
    ///
    /// The sentinel is appended exactly once, here; the epsilon rules for `A`
    /// and `B` resolve against it. The error mask covers every token plus the
    /// sentinel slot.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        tokens.push(Token::end());
        let error_len = tokens.len();

        let mut parser = Self {
            tokens,
            position: 0,
            cst: Cst::new(),
            error_info: vec![false; error_len],
            success: true,
            predict: predict_table(),
        };

        let root = parser.parse_nonterminal(Nonterminal::E);
        parser.cst.set_root(root);
        parser
    }

    /// False iff at least one token was flagged during parsing.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Per-token error mask; length is the input token count plus one for
    /// the sentinel slot.
    pub fn error_info(&self) -> &[bool] {
        &self.error_info
    }

    /// The token sequence being parsed, sentinel included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The tree arena and its recorded root.
    pub fn cst(&self) -> &Cst {
        &self.cst
    }

    /// Typed diagnostics for every flagged token position.
    pub fn diagnostics(&self) -> Vec<UnexpectedToken> {
        self.error_info
            .iter()
            .enumerate()
            .filter(|&(_, &flagged)| flagged)
            .map(|(position, _)| UnexpectedToken {
                position,
                token: self.tokens[position],
            })
            .collect()
    }

    fn predicts(&self, nonterminal: Nonterminal, lookahead: TokenKind) -> bool {
        self.predict
            .get(&nonterminal)
            .map_or(false, |set| set.contains(&lookahead))
    }

    /// Panic-mode step: flag the current token, discard it, and let the
    /// caller retry the same grammar position at the new lookahead.
    fn record_error(&mut self) {
        self.error_info[self.position] = true;
        self.success = false;
        self.position += 1;
    }

    /// Expand one nonterminal at the current cursor and return the arena
    /// index of its node.
    ///
    /// Children are appended before the parent, so every child index is
    /// strictly smaller than the returned one. If the lookahead never enters
    /// the nonterminal's predict set before the cursor passes the sentinel,
    /// the node is emitted with whatever children were gathered (for the
    /// recovery loop here, none).
    fn parse_nonterminal(&mut self, nonterminal: Nonterminal) -> NodeId {
        let mut children = Vec::new();

        while self.position < self.tokens.len() {
            let lookahead = self.tokens[self.position].kind;
            if !self.predicts(nonterminal, lookahead) {
                self.record_error();
                continue;
            }

            match nonterminal {
                Nonterminal::E => {
                    // E -> T A
                    children.push(self.parse_nonterminal(Nonterminal::T));
                    children.push(self.parse_nonterminal(Nonterminal::A));
                }
                Nonterminal::A => {
                    if lookahead == TokenKind::End {
                        // A -> ε, resolved by the sentinel; nothing consumed.
                        children.push(self.cst.push(CstNode::empty()));
                    } else {
                        // A -> '+' T A | '-' T A
                        children.push(self.match_terminal(lookahead));
                        children.push(self.parse_nonterminal(Nonterminal::T));
                        children.push(self.parse_nonterminal(Nonterminal::A));
                    }
                }
                Nonterminal::B => {
                    if lookahead == TokenKind::Times || lookahead == TokenKind::Divide {
                        // B -> '*' F B | '/' F B
                        children.push(self.match_terminal(lookahead));
                        children.push(self.parse_nonterminal(Nonterminal::F));
                        children.push(self.parse_nonterminal(Nonterminal::B));
                    } else {
                        // B -> ε on '+', '-', or the sentinel.
                        children.push(self.cst.push(CstNode::empty()));
                    }
                }
                Nonterminal::T => {
                    // T -> F B
                    children.push(self.parse_nonterminal(Nonterminal::F));
                    children.push(self.parse_nonterminal(Nonterminal::B));
                }
                Nonterminal::F => {
                    // F -> NUMBER
                    children.push(self.match_terminal(TokenKind::Number));
                }
            }
            break;
        }

        self.cst
            .push(CstNode::interior(nonterminal.cst_kind(), children))
    }

    /// Consume one token of the expected kind and return its leaf node.
    ///
    /// Applies the same panic-mode policy as nonterminal dispatch: mismatched
    /// tokens are flagged and discarded until the expected kind appears. If
    /// the cursor passes the sentinel first, a tokenless leaf is emitted.
    fn match_terminal(&mut self, expected: TokenKind) -> NodeId {
        let kind = if expected == TokenKind::Number {
            CstKind::Number
        } else {
            CstKind::Operator
        };

        while self.position < self.tokens.len() {
            let token = self.tokens[self.position];
            if token.kind == expected {
                self.position += 1;
                return self.cst.push(CstNode::leaf(kind, token));
            }
            self.record_error();
        }

        self.cst.push(CstNode::missing(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;

    fn lex(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new();
        lexer.lex(input);
        lexer.tokens().to_vec()
    }

    #[test]
    fn test_single_number_resolves_epsilon_via_sentinel() {
        let parser = Parser::new(lex("7"));
        assert!(parser.success());

        let cst = parser.cst();
        let root = cst.node(cst.root());
        assert_eq!(root.kind, CstKind::E);
        assert_eq!(root.children.len(), 2);

        // T then A; A matched epsilon against the sentinel.
        let a = cst.node(root.children[1]);
        assert_eq!(a.kind, CstKind::A);
        assert_eq!(cst.node(a.children[0]).kind, CstKind::Empty);
    }

    #[test]
    fn test_sentinel_appended_exactly_once() {
        let parser = Parser::new(lex("1+2"));
        let end_count = parser
            .tokens()
            .iter()
            .filter(|t| t.kind == TokenKind::End)
            .count();
        assert_eq!(end_count, 1);
        assert_eq!(parser.error_info().len(), parser.tokens().len());
    }

    #[test]
    fn test_doubled_operator_is_flagged_and_skipped() {
        let parser = Parser::new(lex("1++2"));
        assert!(!parser.success());

        // The second '+' (token index 2) is the discarded one: A matched the
        // first '+', then T expected a number.
        let flagged: Vec<usize> = parser
            .error_info()
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(flagged, vec![2]);

        // The root is still a fully-shaped E node.
        let cst = parser.cst();
        assert_eq!(cst.node(cst.root()).kind, CstKind::E);
    }

    #[test]
    fn test_empty_token_sequence_flags_sentinel_slot() {
        let parser = Parser::new(Vec::new());
        assert!(!parser.success());
        assert_eq!(parser.error_info(), &[true]);

        let cst = parser.cst();
        let root = cst.node(cst.root());
        assert_eq!(root.kind, CstKind::E);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_all_operators_input_terminates() {
        // Nothing ever enters E's predict set; every token including the
        // sentinel slot gets flagged, and the parse still terminates.
        let parser = Parser::new(lex("++--"));
        assert!(!parser.success());
        assert_eq!(parser.error_info().iter().filter(|&&f| f).count(), 5);
        assert_eq!(parser.cst().node(parser.cst().root()).kind, CstKind::E);
    }

    #[test]
    fn test_children_precede_parents() {
        let parser = Parser::new(lex("12+34/2-9*4"));
        let nodes = parser.cst().nodes();
        for (id, node) in nodes.iter().enumerate() {
            for &child in &node.children {
                assert!(child < id);
            }
        }
        assert_eq!(parser.cst().root(), nodes.len() - 1);
    }

    #[test]
    fn test_diagnostics_carry_offending_tokens() {
        let parser = Parser::new(lex("1++2"));
        let diagnostics = parser.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].position, 2);
        assert_eq!(diagnostics[0].token.kind, TokenKind::Plus);
    }
}
