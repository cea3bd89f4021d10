//! Expression front end
//!
//! This module transforms expression text into a concrete syntax tree (CST):
//! - [`lexer`]: Tokenization (source text → tokens + per-character error mask)
//! - [`parser`]: Parsing (tokens → CST + per-token error mask)
//! - [`cst`]: CST arena and tree rendering
//!
//! # Recognized language
//!
//! Flat arithmetic over non-negative decimal integers and `+ - * /`:
//! - No parentheses, no unary operators, no floating point
//! - Two precedence levels only (additive vs. multiplicative), fixed by the
//!   grammar itself
//! - Nothing is evaluated; the output is the parse tree
//!
//! # Error model
//!
//! Neither phase aborts on bad input. The lexer records every unrecognizable
//! character and keeps scanning; the parser discards offending tokens one at
//! a time (panic mode) and keeps expanding the same grammar rule. Both expose
//! a positional error mask, a success flag, and typed diagnostics.

pub mod cst;
pub mod lexer;
pub mod parser;

pub use cst::{Cst, CstKind, CstNode, NodeId};
pub use lexer::{Lexer, Token, TokenKind, UnrecognizedCharacter};
pub use parser::{Parser, UnexpectedToken};
