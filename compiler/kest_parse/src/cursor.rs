//! Token cursor with two tokens of lookahead.
//!
//! The current token is always loaded. The token after it is pulled from
//! the source only when [`Cursor::peek2`] asks for it, so the producer is
//! never more than two tokens ahead of the grammar.

use kest_ir::{Position, Token, TokenKind};
use kest_lexer::TokenSource;
use tracing::trace;

use crate::ParseError;

pub struct Cursor<S> {
    source: S,
    current: Token,
    next: Option<Token>,
}

impl<S: TokenSource> Cursor<S> {
    /// Create a cursor positioned on the first token of `source`.
    pub fn new(mut source: S) -> Result<Self, ParseError> {
        let current = source.next_token()?;
        Ok(Cursor {
            source,
            current,
            next: None,
        })
    }

    /// The current (not yet consumed) token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub fn current_position(&self) -> Position {
        self.current.position
    }

    /// The token after the current one.
    pub fn peek2(&mut self) -> Result<&Token, ParseError> {
        let next = match self.next.take() {
            Some(token) => token,
            None => self.source.next_token()?,
        };
        Ok(self.next.insert(next))
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        let following = match self.next.take() {
            Some(token) => token,
            None => self.source.next_token()?,
        };
        let consumed = std::mem::replace(&mut self.current, following);
        trace!(
            kind = %consumed.kind,
            line = consumed.position.line,
            column = consumed.position.column,
            "advance"
        );
        Ok(consumed)
    }

    /// Consume a token of `kind`, or fail at the current token.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(ParseError::unexpected_token(&self.current, kind))
        }
    }

    /// Consume an identifier and return its name.
    pub fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance()?.text)
        } else {
            Err(ParseError::expected_identifier(&self.current))
        }
    }

    /// Skip `Eol` tokens.
    pub fn skip_newlines(&mut self) -> Result<(), ParseError> {
        while self.check(TokenKind::Eol) {
            self.advance()?;
        }
        Ok(())
    }
}
