// exprfront: lex and parse whitespace-separated arithmetic expressions from stdin

use std::io::{self, BufRead};

use exprfront::frontend::{Lexer, Parser};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lexer = Lexer::new();

    for line in stdin.lock().lines() {
        let line = line?;
        for word in line.split_whitespace() {
            process_expression(&mut lexer, word);
        }
    }

    Ok(())
}

/// Lex one expression, echo the result, then parse whatever tokens came out.
///
/// A failed lex still hands its partial token stream to the parser; the
/// parser's contract is total over any token sequence.
fn process_expression(lexer: &mut Lexer, expression: &str) {
    println!("Result after lexing:");
    if lexer.lex(expression) {
        for token in lexer.tokens() {
            println!("{}", token);
        }
    } else {
        for diagnostic in lexer.diagnostics(expression) {
            println!("{}", diagnostic);
        }
    }

    let parser = Parser::new(lexer.tokens().to_vec());
    if parser.success() {
        println!("Concrete Syntax Tree:");
        print!("{}", parser.cst().render());
    } else {
        println!("Parse failed.");
        for diagnostic in parser.diagnostics() {
            println!("{}", diagnostic);
        }
    }
}
