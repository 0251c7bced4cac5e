//! Runtime warning and statement error types
//!
//! This module defines [`RuntimeWarning`], the conditions that can arise while
//! evaluating a parsed statement, and [`StatementError`], what a session
//! returns for a statement that did not parse.
//!
//! Warnings are never fatal. The evaluator reports the warning, substitutes
//! `0.0` for the offending value and keeps going, so a statement always
//! produces a result.

use crate::diagnostics::Diagnostics;
use crate::parser::parse::ParseError;
use thiserror::Error;

/// Recoverable conditions raised during evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeWarning {
    /// Variable read before any assignment; evaluated as `0.0`
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// Right operand of `/` was zero; the division evaluated as `0.0`
    #[error("Division by zero")]
    DivisionByZero,
}

/// A rejected statement.
///
/// The lexer may already have skipped unexpected characters before the parse
/// failed; those are kept in `diagnostics` next to the error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct StatementError {
    pub error: ParseError,
    pub diagnostics: Diagnostics,
}
