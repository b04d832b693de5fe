//! Tokens produced by the lexer.

use std::fmt;

use crate::Position;

/// Token kinds.
///
/// A closed set: literals, keywords, punctuation, operators, and the two
/// layout tokens `Eol` and `Eof`. Keyword spellings never produce `Ident`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    // Literals
    Ident,
    Number,
    String,
    True,
    False,
    Nil,

    // Keywords
    Func,
    Return,
    Break,
    Continue,
    If,
    Elif,
    Else,
    For,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `!`
    Bang,
    Gt,
    GtEq,
    Lt,
    LtEq,
    /// `&`
    Amp,
    /// `&&`
    AmpAmp,
    /// `|`
    Pipe,
    /// `||`
    PipePipe,

    // Layout
    Eol,
    Eof,
}

impl TokenKind {
    /// Resolve an identifier spelling to its keyword kind, if it is one.
    ///
    /// `true`, `false` and `nil` are reserved the same way as keywords.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "nil" => TokenKind::Nil,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for reserved words, including `true`/`false`/`nil`.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Func
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
        )
    }

    /// Human-readable name used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::Func => "func",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Bang => "!",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::Eol => "end of line",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token: kind, exact source spelling, and the position of its first
/// character.
///
/// `text` is the lexeme as written. String literals keep their quotes and
/// escapes; `Eol` is `"\n"` and `Eof` is empty.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// The end-of-file sentinel at `position`.
    pub fn eof(position: Position) -> Self {
        Token {
            kind: TokenKind::Eof,
            text: String::new(),
            position,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// How the token is shown in "found ..." diagnostics.
    ///
    /// Layout tokens use their descriptive name since their text is
    /// invisible.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eol | TokenKind::Eof => self.kind.display_name().to_string(),
            _ => format!("`{}`", self.text),
        }
    }
}
