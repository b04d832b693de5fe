//! Parse errors.
//!
//! Parsing stops at the first error. Every error except a stopped token
//! producer carries the position of the token that could not be matched.

use kest_diagnostic::{Diagnostic, ErrorCode, IntoDiagnostic};
use kest_ir::{Position, Token, TokenKind};
use kest_lexer::LexError;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Option<Position>,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The token source failed.
    #[error(transparent)]
    Lex(LexError),
    /// A specific token was required.
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { expected: String, found: String },
    /// No expression can start with this token.
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: String },
    #[error("expected identifier, found {found}")]
    ExpectedIdentifier { found: String },
}

impl ParseErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::Lex(err) => err.code(),
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseErrorKind::ExpectedIdentifier { .. } => ErrorCode::E1003,
        }
    }
}

/// How a token kind is named in "expected ..." messages.
pub(crate) fn expected_name(kind: TokenKind) -> String {
    match kind {
        TokenKind::Ident
        | TokenKind::Number
        | TokenKind::String
        | TokenKind::Eol
        | TokenKind::Eof => kind.display_name().to_string(),
        _ => format!("`{}`", kind.display_name()),
    }
}

impl ParseError {
    #[cold]
    pub fn unexpected_token(found: &Token, expected: TokenKind) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                expected: expected_name(expected),
                found: found.describe(),
            },
            position: Some(found.position),
        }
    }

    #[cold]
    pub fn expected_expression(found: &Token) -> Self {
        ParseError {
            kind: ParseErrorKind::ExpectedExpression {
                found: found.describe(),
            },
            position: Some(found.position),
        }
    }

    #[cold]
    pub fn expected_identifier(found: &Token) -> Self {
        ParseError {
            kind: ParseErrorKind::ExpectedIdentifier {
                found: found.describe(),
            },
            position: Some(found.position),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            position: err.position,
            kind: ParseErrorKind::Lex(err),
        }
    }
}

impl IntoDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), self.kind.to_string());
        match self.position {
            Some(position) => diag.at(position),
            None => diag,
        }
    }
}
