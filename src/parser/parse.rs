//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token-stream helpers, and the statement entry
//! point.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, token buffer, `expect`, and `parse`
//! - `expressions`: the grammar rules (`assignment`, `expression`, `term`,
//!   `factor`)
//!
//! Tokens are pulled from the [`Lexer`] lazily. The parser holds the current
//! token and, when asked, one more token of lookahead. The extra token is
//! needed to tell an assignment target (`x = ...`) apart from a variable
//! reference (`x + 1`).

use crate::parser::ast::*;
use crate::parser::constants::{MAX_NESTING_DEPTH, MAX_TREE_HEIGHT};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;

/// Parser error type
///
/// Any of these ends the current parse; the caller decides what to do next.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `expect` found a different token kind than required
    #[error("Parse error at {location}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        location: SourceLocation,
    },

    /// A factor position held a token that cannot start one
    #[error("Parse error at {location}: expected a number, identifier, '(' or unary operator, found {found}")]
    ExpectedFactor {
        found: TokenKind,
        location: SourceLocation,
    },

    #[error("Parse error at {location}: expression nesting exceeds {limit} levels")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },

    /// The operator at `location` would make the tree taller than `limit`
    #[error("Parse error at {location}: expression tree exceeds {limit} levels")]
    TreeTooTall {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::ExpectedFactor { location, .. }
            | ParseError::NestingTooDeep { location, .. }
            | ParseError::TreeTooTall { location, .. } => *location,
        }
    }
}

/// Recursive descent parser for a single statement
pub struct Parser {
    lexer: Lexer,
    current: Token,
    lookahead: Option<Token>,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            lookahead: None,
            depth: 0,
        }
    }

    /// Parse one statement: `assignment (';')?`.
    ///
    /// Whatever follows the statement is left unread, so `1.2.3` yields `1.2`
    /// and `x = 1; y = 2` only assigns `x`.
    pub fn parse(&mut self) -> Result<AstNode, ParseError> {
        let node = self.parse_assignment()?;

        if self.check(TokenKind::Semicolon) {
            self.advance();
        }
        if !self.check(TokenKind::Eof) {
            tracing::debug!(token = %self.current, "ignoring trailing input");
        }

        tracing::debug!(nodes = node.node_count(), "parsed statement");
        Ok(node)
    }

    /// Unexpected characters skipped by the lexer so far
    pub fn lex_errors(&self) -> &[LexError] {
        self.lexer.errors()
    }

    pub fn take_lex_errors(&mut self) -> Vec<LexError> {
        self.lexer.take_errors()
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.current
    }

    /// The token after the current one, scanned on first use and buffered.
    pub(crate) fn peek_next(&mut self) -> &Token {
        let lexer = &mut self.lexer;
        self.lookahead.get_or_insert_with(|| lexer.next_token())
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Consume the current token and return it
    pub(crate) fn advance(&mut self) -> Token {
        let next = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        };
        tracing::trace!(token = %self.current, "consumed");
        std::mem::replace(&mut self.current, next)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    /// Consume the current token if it is of `kind`, otherwise fail.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind,
                found: self.current.kind,
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn enter_nested(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                location: self.current_location(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    /// Fail if a node of `height` would exceed [`MAX_TREE_HEIGHT`].
    pub(crate) fn check_height(
        &self,
        height: usize,
        location: SourceLocation,
    ) -> Result<(), ParseError> {
        if height > MAX_TREE_HEIGHT {
            return Err(ParseError::TreeTooTall {
                limit: MAX_TREE_HEIGHT,
                location,
            });
        }
        Ok(())
    }
}

/// Parse a single statement from `input`
pub fn parse(input: &str) -> Result<AstNode, ParseError> {
    Parser::new(input).parse()
}
