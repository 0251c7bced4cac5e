//! Lexer (scanner) for expression source text
//!
//! Produces one [`Token`] per call to [`Lexer::next_token`]; the parser pulls
//! tokens on demand instead of tokenizing the whole input up front.
//!
//! Unknown characters are not fatal. Each one is recorded as a [`LexError`],
//! logged, and skipped, after which scanning resumes at the next character.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    LParen,    // (
    RParen,    // )
    Equals,    // =
    Semicolon, // ;
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A single lexical unit.
///
/// `text` is only populated for identifiers and numbers. Number text is the
/// raw literal; conversion to `f64` happens in the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self {
            kind,
            text: None,
            location,
        }
    }

    pub fn with_text(kind: TokenKind, text: String, location: SourceLocation) -> Self {
        Self {
            kind,
            text: Some(text),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.text) {
            (TokenKind::Identifier, Some(name)) => write!(f, "identifier '{}'", name),
            (TokenKind::Number, Some(text)) => write!(f, "number {}", text),
            (kind, _) => write!(f, "{}", kind),
        }
    }
}

/// Unexpected character encountered while scanning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected character '{character}' at {location}")]
pub struct LexError {
    pub character: char,
    pub location: SourceLocation,
}

/// Pull-based lexer over a single input string
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    errors: Vec<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input, including the trailing `Eof`
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// Scan the next token.
    ///
    /// Once the input is exhausted every further call returns `Eof` at the
    /// same location.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let loc = self.current_location();
            let Some(ch) = self.peek() else {
                return Token::new(TokenKind::Eof, loc);
            };

            let kind = match ch {
                'a'..='z' | 'A'..='Z' | '_' => return self.identifier(loc),
                '0'..='9' | '.' => return self.number_literal(loc),
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '=' => TokenKind::Equals,
                ';' => TokenKind::Semicolon,
                _ => {
                    let error = LexError {
                        character: ch,
                        location: loc,
                    };
                    tracing::warn!(%error, "skipping unexpected character");
                    self.errors.push(error);
                    self.advance();
                    continue;
                }
            };

            self.advance();
            return Token::new(kind, loc);
        }
    }

    /// Errors reported so far
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Scan identifier: [A-Za-z_][A-Za-z0-9_]*
    fn identifier(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::with_text(TokenKind::Identifier, ident, loc)
    }

    /// Scan numeric literal.
    ///
    /// Digits and at most one `.`; a second `.` ends the literal and is left
    /// for the next call.
    fn number_literal(&mut self, loc: SourceLocation) -> Token {
        let mut num_str = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch == '.' {
                if seen_dot {
                    break;
                }
                seen_dot = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            num_str.push(ch);
            self.advance();
        }

        Token::with_text(TokenKind::Number, num_str, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("x = (a + 1) * b / 2 - c;");
        let tokens = lexer.tokenize();

        assert!(matches!(tokens[0].text.as_deref(), Some("x")));
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Star,
                TokenKind::Identifier,
                TokenKind::Slash,
                TokenKind::Number,
                TokenKind::Minus,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert!(lexer.errors().is_empty());
    }

    #[test]
    fn test_punctuation_has_no_payload() {
        let tokens = Lexer::new("+ ;").tokenize();
        assert!(tokens.iter().all(|t| t.text.is_none()));
    }

    #[test]
    fn test_identifier_rules() {
        let tokens = Lexer::new("_foo1 Bar_2 9abc").tokenize();
        assert_eq!(tokens[0].text(), "_foo1");
        assert_eq!(tokens[1].text(), "Bar_2");
        // a digit cannot start an identifier
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].text(), "9");
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].text(), "abc");
    }

    #[test]
    fn test_number_literals() {
        let tokens = Lexer::new("42 3.14 .5 7.").tokenize();
        let texts: Vec<&str> = tokens[..4].iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["42", "3.14", ".5", "7."]);
    }

    #[test]
    fn test_second_dot_splits_number() {
        let tokens = Lexer::new("1.2.3").tokenize();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text(), "1.2");
        assert_eq!(tokens[1].text(), ".3");
        assert_eq!(tokens[1].location, SourceLocation::new(1, 4));
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_unexpected_character_is_skipped() {
        let mut lexer = Lexer::new("1 $ 2 @");
        let tokens = lexer.tokenize();

        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
        assert_eq!(
            lexer.errors(),
            &[
                LexError {
                    character: '$',
                    location: SourceLocation::new(1, 3),
                },
                LexError {
                    character: '@',
                    location: SourceLocation::new(1, 7),
                },
            ]
        );
    }

    #[test]
    fn test_consecutive_bad_characters() {
        assert_eq!(kinds("#$%"), vec![TokenKind::Eof]);
        assert_eq!(kinds("é+"), vec![TokenKind::Plus, TokenKind::Eof]);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Lexer::new("a\n  b\r\n\tc").tokenize();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[2].location, SourceLocation::new(3, 2));
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("x ");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);

        let first = lexer.next_token();
        assert_eq!(first.kind, TokenKind::Eof);
        for _ in 0..5 {
            assert_eq!(lexer.next_token(), first);
        }
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("");
        assert_eq!(
            lexer.next_token(),
            Token::new(TokenKind::Eof, SourceLocation::new(1, 1))
        );
    }

    #[test]
    fn test_take_errors_drains() {
        let mut lexer = Lexer::new("?");
        lexer.tokenize();
        assert_eq!(lexer.take_errors().len(), 1);
        assert!(lexer.errors().is_empty());
    }
}
