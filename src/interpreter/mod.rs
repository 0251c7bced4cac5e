//! Expression evaluation
//!
//! This module provides the evaluation side of the language:
//! - [`engine`]: tree-walking [`engine::Evaluator`] and the
//!   [`engine::Interpreter`] session
//! - [`environment`]: the session's variable table
//! - [`errors`]: runtime warning types
//!
//! # Execution Model
//!
//! The evaluator walks the AST recursively and returns an `f64`. Only
//! assignment nodes write to the environment. Undefined variables and division
//! by zero are reported as warnings and evaluate to `0.0`.

pub mod engine;
pub mod environment;
pub mod errors;
