//! Lexical errors.
//!
//! A lexical error is fatal to the parse that requested the token. The
//! position points at the first character of the offending token, except
//! for escapes, which point at the backslash.

use kest_diagnostic::{Diagnostic, ErrorCode, IntoDiagnostic};
use kest_ir::Position;

/// A lexical error with the location it was found at.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// `None` only when the token producer itself went away.
    pub position: Option<Position>,
}

/// What went wrong while scanning.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    // === String Errors ===
    /// End of input before the closing `"`.
    #[error("unexpected end of file in string literal")]
    UnterminatedString,
    /// A raw line break before the closing `"`.
    #[error("unexpected end of line in string literal")]
    NewlineInString,
    /// Backslash followed by a character with no escape meaning.
    #[error("unknown escape sequence `\\{escape}`")]
    InvalidEscape { escape: char },

    // === Numeric Errors ===
    /// `007`
    #[error("number `{literal}` cannot start with 0")]
    LeadingZero { literal: String },
    /// `0x`, `1.`, `1e`
    #[error("malformed number `{literal}`")]
    MalformedNumber { literal: String },
    /// `12ab`
    #[error("identifier starts immediately after numeric literal `{literal}`")]
    IdentAfterNumber { literal: String },

    // === Character Errors ===
    #[error("syntax error: unexpected character `{found}`")]
    UnexpectedChar { found: char },

    // === Producer Errors ===
    /// The threaded producer disconnected before sending `Eof`.
    #[error("token producer stopped before end of input")]
    ProducerStopped,
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::NewlineInString => ErrorCode::E0002,
            LexErrorKind::UnexpectedChar { .. } => ErrorCode::E0003,
            LexErrorKind::LeadingZero { .. } => ErrorCode::E0004,
            LexErrorKind::MalformedNumber { .. } => ErrorCode::E0005,
            LexErrorKind::IdentAfterNumber { .. } => ErrorCode::E0006,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0007,
            LexErrorKind::ProducerStopped => ErrorCode::E0008,
        }
    }
}

impl LexError {
    #[cold]
    pub fn unterminated_string(position: Position) -> Self {
        Self::at(LexErrorKind::UnterminatedString, position)
    }

    #[cold]
    pub fn newline_in_string(position: Position) -> Self {
        Self::at(LexErrorKind::NewlineInString, position)
    }

    #[cold]
    pub fn invalid_escape(position: Position, escape: char) -> Self {
        Self::at(LexErrorKind::InvalidEscape { escape }, position)
    }

    #[cold]
    pub fn leading_zero(position: Position, literal: impl Into<String>) -> Self {
        Self::at(
            LexErrorKind::LeadingZero {
                literal: literal.into(),
            },
            position,
        )
    }

    #[cold]
    pub fn malformed_number(position: Position, literal: impl Into<String>) -> Self {
        Self::at(
            LexErrorKind::MalformedNumber {
                literal: literal.into(),
            },
            position,
        )
    }

    #[cold]
    pub fn ident_after_number(position: Position, literal: impl Into<String>) -> Self {
        Self::at(
            LexErrorKind::IdentAfterNumber {
                literal: literal.into(),
            },
            position,
        )
    }

    #[cold]
    pub fn unexpected_char(position: Position, found: char) -> Self {
        Self::at(LexErrorKind::UnexpectedChar { found }, position)
    }

    #[cold]
    pub fn producer_stopped() -> Self {
        LexError {
            kind: LexErrorKind::ProducerStopped,
            position: None,
        }
    }

    fn at(kind: LexErrorKind, position: Position) -> Self {
        LexError {
            kind,
            position: Some(position),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

impl IntoDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), self.kind.to_string());
        match self.position {
            Some(position) => diag.at(position),
            None => diag,
        }
    }
}
