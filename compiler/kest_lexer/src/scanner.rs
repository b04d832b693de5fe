//! Hand-written scanner producing one [`Token`] per call.
//!
//! Blanks (space, tab, carriage return) and `//` comments are skipped
//! before each token; a newline is itself a token (`Eol`). Two-character
//! operators are recognized by looking one character ahead: if the pair
//! is not a known operator only the first character is consumed.
//!
//! The scanner validates string escapes but keeps the lexeme as written;
//! cooking happens in [`crate::cook_string_literal`].

use kest_ir::{Position, Token, TokenKind};
use tracing::debug;

use crate::cook_escape::resolve_escape;
use crate::cursor::Cursor;
use crate::lex_error::LexError;

/// Pull-based scanner over a decoded character buffer.
///
/// After the end of input every call returns an `Eof` token at the final
/// position.
pub struct Scanner {
    cursor: Cursor,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Scanner::from_chars(source.chars().collect())
    }

    /// Build a scanner that owns an already decoded buffer.
    pub fn from_chars(chars: Vec<char>) -> Self {
        Scanner {
            cursor: Cursor::new(chars),
        }
    }

    /// Position of the next unscanned character.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();

        let begin = self.cursor.pos();
        let start = self.cursor.position();
        let Some(c) = self.cursor.current() else {
            return Ok(Token::eof(start));
        };

        let result = match c {
            '\n' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Eol, "\n", start))
            }
            c if is_ident_start(c) => Ok(self.identifier(begin, start)),
            '0'..='9' => self.number(begin, start),
            '"' => self.string(begin, start),
            '(' => Ok(self.single(TokenKind::LParen, start)),
            ')' => Ok(self.single(TokenKind::RParen, start)),
            '{' => Ok(self.single(TokenKind::LBrace, start)),
            '}' => Ok(self.single(TokenKind::RBrace, start)),
            '[' => Ok(self.single(TokenKind::LBracket, start)),
            ']' => Ok(self.single(TokenKind::RBracket, start)),
            ',' => Ok(self.single(TokenKind::Comma, start)),
            ';' => Ok(self.single(TokenKind::Semicolon, start)),
            '+' => Ok(self.single(TokenKind::Plus, start)),
            '-' => Ok(self.single(TokenKind::Minus, start)),
            '*' => Ok(self.single(TokenKind::Star, start)),
            '/' => Ok(self.single(TokenKind::Slash, start)),
            '%' => Ok(self.single(TokenKind::Percent, start)),
            '=' => Ok(self.one_or_two('=', TokenKind::EqEq, TokenKind::Eq, start)),
            '!' => Ok(self.one_or_two('=', TokenKind::NotEq, TokenKind::Bang, start)),
            '>' => Ok(self.one_or_two('=', TokenKind::GtEq, TokenKind::Gt, start)),
            '<' => Ok(self.one_or_two('=', TokenKind::LtEq, TokenKind::Lt, start)),
            '&' => Ok(self.one_or_two('&', TokenKind::AmpAmp, TokenKind::Amp, start)),
            '|' => Ok(self.one_or_two('|', TokenKind::PipePipe, TokenKind::Pipe, start)),
            other => {
                self.cursor.advance();
                Err(LexError::unexpected_char(start, other))
            }
        };

        if let Err(err) = &result {
            debug!(%err, position = %start, "lexical error");
        }
        result
    }

    // ─── Trivia ─────────────────────────────────────────────────────────

    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                Some(' ' | '\t' | '\r') => self.cursor.advance(),
                Some('/') if self.cursor.peek() == Some('/') => {
                    self.cursor.eat_until_newline_or_eof();
                }
                _ => return,
            }
        }
    }

    // ─── Operators & Punctuation ────────────────────────────────────────

    fn single(&mut self, kind: TokenKind, start: Position) -> Token {
        let c = self.cursor.current();
        self.cursor.advance();
        Token::new(kind, c.map(String::from).unwrap_or_default(), start)
    }

    /// Emit `double` if the next character is `second`, else `single`.
    fn one_or_two(
        &mut self,
        second: char,
        double: TokenKind,
        single: TokenKind,
        start: Position,
    ) -> Token {
        if self.cursor.peek() == Some(second) {
            self.cursor.advance();
            self.cursor.advance();
            Token::new(double, double.display_name(), start)
        } else {
            self.single(single, start)
        }
    }

    // ─── Identifiers ────────────────────────────────────────────────────

    fn identifier(&mut self, begin: usize, start: Position) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(begin);
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, start)
    }

    // ─── Numbers ────────────────────────────────────────────────────────

    fn number(&mut self, begin: usize, start: Position) -> Result<Token, LexError> {
        let first = self.cursor.current();
        self.cursor.advance();

        // Only lowercase `0x` starts a hex literal; `0X` ends the number at `0`.
        if first == Some('0') && self.cursor.current() == Some('x') {
            self.cursor.advance();
            if !self.eat_digits(|c| c.is_ascii_hexdigit()) {
                return Err(LexError::malformed_number(start, self.cursor.slice_from(begin)));
            }
            return self.finish_number(begin, start);
        }

        if first == Some('0') && self.cursor.current().is_some_and(|c| c.is_ascii_digit()) {
            self.eat_digits(|c| c.is_ascii_digit());
            return Err(LexError::leading_zero(start, self.cursor.slice_from(begin)));
        }

        self.eat_digits(|c| c.is_ascii_digit());

        if self.cursor.current() == Some('.') {
            self.cursor.advance();
            if !self.eat_digits(|c| c.is_ascii_digit()) {
                return Err(LexError::malformed_number(start, self.cursor.slice_from(begin)));
            }
        }

        if matches!(self.cursor.current(), Some('e' | 'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some('+' | '-')) {
                self.cursor.advance();
            }
            if !self.eat_digits(|c| c.is_ascii_digit()) {
                return Err(LexError::malformed_number(start, self.cursor.slice_from(begin)));
            }
        }

        self.finish_number(begin, start)
    }

    /// Eat digits matching `pred`; returns whether at least one was eaten.
    fn eat_digits(&mut self, pred: impl Fn(char) -> bool) -> bool {
        let before = self.cursor.pos();
        self.cursor.eat_while(pred);
        self.cursor.pos() > before
    }

    /// A number must not run straight into an identifier.
    fn finish_number(&mut self, begin: usize, start: Position) -> Result<Token, LexError> {
        let text = self.cursor.slice_from(begin);
        if self.cursor.current().is_some_and(is_ident_start) {
            return Err(LexError::ident_after_number(start, text));
        }
        Ok(Token::new(TokenKind::Number, text, start))
    }

    // ─── Strings ────────────────────────────────────────────────────────

    fn string(&mut self, begin: usize, start: Position) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.current() {
                None => return Err(LexError::unterminated_string(start)),
                Some('\n') => return Err(LexError::newline_in_string(start)),
                Some('"') => {
                    self.cursor.advance();
                    break;
                }
                Some('\\') => {
                    let at = self.cursor.position();
                    self.cursor.advance();
                    match self.cursor.current() {
                        None => return Err(LexError::unterminated_string(start)),
                        Some(esc) if resolve_escape(esc).is_some() => self.cursor.advance(),
                        Some(esc) => return Err(LexError::invalid_escape(at, esc)),
                    }
                }
                Some(_) => self.cursor.advance(),
            }
        }
        Ok(Token::new(TokenKind::String, self.cursor.slice_from(begin), start))
    }
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '_'
}
