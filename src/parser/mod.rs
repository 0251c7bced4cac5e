//! Expression source parser
//!
//! This module transforms one line of source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization, one token at a time on demand
//! - [`parse`]: Parser state, token helpers and the statement entry point
//! - [`expressions`]: Grammar rules for assignments and arithmetic
//! - [`ast`]: AST node definitions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one function per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod constants;
pub mod expressions;
pub mod lexer;
pub mod parse;
