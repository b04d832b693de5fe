//! Recursive descent parser for Kest.
//!
//! Consumes tokens from any [`TokenSource`] with two tokens of lookahead
//! and produces a [`Program`]. Binary operators are parsed right-leaning:
//! each precedence level parses its left operand one level down and its
//! right operand by recursing into itself, so `10 - 5 - 2` is
//! `10 - (5 - 2)`.
//!
//! Parsing stops at the first error.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use kest_ir::{Position, Program, Token, TokenKind};
use kest_lexer::{ChannelTokens, TokenSource, TokenStream};
use tracing::debug;

/// Parser state.
pub struct Parser<S> {
    cursor: Cursor<S>,
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser positioned on the first token of `source`.
    pub fn new(source: S) -> Result<Self, ParseError> {
        Ok(Parser {
            cursor: Cursor::new(source)?,
        })
    }

    // Cursor delegation

    #[inline]
    fn current(&self) -> &Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_position(&self) -> Position {
        self.cursor.current_position()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn peek2_kind(&mut self) -> Result<TokenKind, ParseError> {
        Ok(self.cursor.peek2()?.kind)
    }

    #[inline]
    fn advance(&mut self) -> Result<Token, ParseError> {
        self.cursor.advance()
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<String, ParseError> {
        self.cursor.expect_ident()
    }

    /// Consume the current token if it is `kind`.
    fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parse statements until end of input.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        loop {
            self.skip_separators()?;
            if self.cursor.is_at_end() {
                break;
            }
            statements.push(self.parse_stmt()?);
        }
        debug!(statements = statements.len(), "parsed program");
        Ok(Program::new(statements))
    }
}

/// Parse `source`, scanning lazily on the current thread.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(TokenStream::new(source))?.parse_program()
}

/// Parse `source` with the scanner running on its own thread.
///
/// Produces the same result as [`parse`].
pub fn parse_threaded(source: &str) -> Result<Program, ParseError> {
    Parser::new(ChannelTokens::spawn(source))?.parse_program()
}

#[cfg(test)]
mod tests;
