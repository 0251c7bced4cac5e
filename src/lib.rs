//! # Introduction
//!
//! minicalc is a small expression language: one statement per line, `f64`
//! arithmetic, and named variables that persist for the life of a session.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Evaluator (+ Environment) → f64
//! ```
//!
//! 1. [`parser`] — scans tokens on demand and builds an AST for one
//!    statement.
//! 2. [`interpreter`] — walks the AST against an
//!    [`interpreter::environment::Environment`] and owns the session type.
//! 3. [`diagnostics`] — recoverable lex errors and runtime warnings handed
//!    back to the caller.
//!
//! ## Language
//!
//! ```text
//! x = (2 + 3) * 4;
//! x / 2 - -1
//! ```
//!
//! Operators: `+ - * /` (left-associative, usual precedence), unary `+`/`-`,
//! parentheses and assignment at the start of a statement. The trailing `;`
//! is optional.

pub mod diagnostics;
pub mod interpreter;
pub mod parser;

pub use diagnostics::Diagnostics;
pub use interpreter::engine::{
    evaluate, evaluate_with_warnings, parse_and_evaluate, Evaluator, Interpreter, Outcome,
};
pub use interpreter::environment::Environment;
pub use interpreter::errors::{RuntimeWarning, StatementError};
pub use parser::ast::{AstNode, BinOp, SourceLocation};
pub use parser::lexer::{LexError, Lexer, Token, TokenKind};
pub use parser::parse::{parse, ParseError, Parser};
