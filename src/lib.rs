//! # Introduction
//!
//! `exprfront` recognizes arithmetic expressions over non-negative integers
//! and the four binary operators, building a concrete syntax tree (CST) for a
//! fixed LL(1) grammar with panic-mode error recovery, so that malformed
//! input still yields diagnostics and a best-effort tree instead of an abort.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → CST + error maps
//! ```
//!
//! 1. [`frontend::lexer`] — tokenises the input string, flagging every
//!    unrecognizable character rather than stopping at the first one.
//! 2. [`frontend::parser`] — appends an end-of-input sentinel and runs a
//!    recursive-descent parse over five nonterminals, discarding offending
//!    tokens one at a time to recover from syntax errors.
//! 3. [`frontend::cst`] — the append-only node arena the parser builds into,
//!    plus a plain-text tree renderer.
//!
//! ## Supported grammar
//!
//! ```text
//! E -> T A
//! A -> '+' T A | '-' T A | ε
//! B -> '*' F B | '/' F B | ε
//! T -> F B
//! F -> NUMBER
//! ```
//!
//! No parentheses, no unary operators, no evaluation. The two-level
//! additive/multiplicative split is the only precedence the grammar encodes.

pub mod frontend;
