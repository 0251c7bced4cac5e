//! Expression parsing implementation
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! assignment := IDENTIFIER '=' expression | expression
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := NUMBER | IDENTIFIER | '(' expression ')' | '+' factor | '-' factor
//! ```
//!
//! Binary levels are built by iterative left fold, which makes both levels
//! left-associative. The fold never recurses, so a long flat chain can still
//! build a very tall tree; every new interior node is checked against
//! [`MAX_TREE_HEIGHT`](crate::parser::constants::MAX_TREE_HEIGHT).
//!
//! The grammar is implemented as methods on the [`Parser`] struct; only
//! `parse_assignment` is visible outside this module.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// A parsed subtree and its height, carried up the fold loops so the height
/// limit never needs another walk over the tree.
struct Subtree {
    node: AstNode,
    height: usize,
}

impl Subtree {
    fn leaf(node: AstNode) -> Self {
        Self { node, height: 1 }
    }
}

impl Parser {
    /// Parse assignment or plain expression.
    ///
    /// Looks one token past a leading identifier: only `IDENTIFIER '='` starts
    /// an assignment, anything else is parsed as an expression so that
    /// `x + 1` keeps its right-hand side.
    pub(crate) fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        if self.check(TokenKind::Identifier) && self.peek_next().is(TokenKind::Equals) {
            let target = self.advance();
            self.expect(TokenKind::Equals)?;
            let value = self.parse_expression()?;
            self.check_height(value.height + 1, target.location)?;
            return Ok(AstNode::Assignment {
                name: target.text.unwrap_or_default(),
                value: Box::new(value.node),
            });
        }

        Ok(self.parse_expression()?.node)
    }

    /// Parse additive (+ -)
    fn parse_expression(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let location = self.advance().location;
            let right = self.parse_term()?;
            left = self.fold(op, left, right, location)?;
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_term(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            let location = self.advance().location;
            let right = self.parse_factor()?;
            left = self.fold(op, left, right, location)?;
        }

        Ok(left)
    }

    /// Parse factor: literal, variable, parenthesized expression or unary op
    fn parse_factor(&mut self) -> Result<Subtree, ParseError> {
        match self.peek().kind {
            TokenKind::Number => {
                let token = self.advance();
                Ok(Subtree::leaf(AstNode::Number(literal_value(token.text()))))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Subtree::leaf(AstNode::Variable(
                    token.text.unwrap_or_default(),
                )))
            }
            TokenKind::LParen => {
                self.advance();
                self.enter_nested()?;
                let inner = self.parse_expression();
                self.exit_nested();
                let inner = inner?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_unary_operand()
            }
            TokenKind::Minus => {
                let location = self.advance().location;
                let operand = self.parse_unary_operand()?;
                // `0 - operand`: the zero leaf never outgrows the operand
                let height = operand.height + 1;
                self.check_height(height, location)?;
                Ok(Subtree {
                    node: AstNode::negate(operand.node),
                    height,
                })
            }
            found => Err(ParseError::ExpectedFactor {
                found,
                location: self.current_location(),
            }),
        }
    }

    fn parse_unary_operand(&mut self) -> Result<Subtree, ParseError> {
        self.enter_nested()?;
        let operand = self.parse_factor();
        self.exit_nested();
        operand
    }

    fn fold(
        &self,
        op: BinOp,
        left: Subtree,
        right: Subtree,
        location: SourceLocation,
    ) -> Result<Subtree, ParseError> {
        let height = left.height.max(right.height) + 1;
        self.check_height(height, location)?;
        Ok(Subtree {
            node: AstNode::binary(op, left.node, right.node),
            height,
        })
    }
}

/// Convert number-literal text to `f64` with C `atof` semantics.
///
/// The lexer only produces digit runs with at most one `.`, all of which Rust
/// parses except a lone `.`; `atof` reads that as zero.
fn literal_value(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(0.0)
}
