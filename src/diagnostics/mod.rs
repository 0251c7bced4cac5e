// Diagnostics collected while running one statement

use crate::interpreter::errors::RuntimeWarning;
use crate::parser::lexer::LexError;

/// Recoverable problems reported for a statement.
///
/// Everything here has already been logged through `tracing`; the collector
/// hands the same information back to the caller as values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub lex_errors: Vec<LexError>,
    pub warnings: Vec<RuntimeWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lex_errors.is_empty() && self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lex_errors.len() + self.warnings.len()
    }

    /// Rendered messages, lex errors first (they happen before evaluation)
    pub fn messages(&self) -> Vec<String> {
        self.lex_errors
            .iter()
            .map(|e| e.to_string())
            .chain(self.warnings.iter().map(|w| format!("Warning: {}", w)))
            .collect()
    }
}
