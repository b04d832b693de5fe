//! Runtime errors.
//!
//! Errors are built through the `#[cold]` factory functions below, which
//! keep construction off the hot evaluation path. The evaluator attaches
//! the position of the node where an error arises; a position that is
//! already set is never overwritten, so the innermost node wins.

use std::fmt;

use kest_diagnostic::{Diagnostic, ErrorCode, IntoDiagnostic};
use kest_ir::Position;

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Typed runtime error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Names
    #[error("undefined symbol `{name}`")]
    UndefinedSymbol { name: String },
    /// `set` on a name no enclosing scope defines.
    #[error("unknown symbol `{name}`")]
    UnknownSymbol { name: String },
    #[error("undefined type `{name}`")]
    UndefinedType { name: String },

    // Calls
    #[error("`{name}` is not callable: it is {kind}")]
    NotCallable { name: String, kind: String },
    #[error("function `{name}` takes {expected} argument{}, got {got}", plural(*expected))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize },

    // Arithmetic
    #[error("malformed numeral `{literal}`")]
    MalformedNumeral { literal: String },
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Control flow
    #[error("unexpected {keyword} statement")]
    StrayControl { keyword: &'static str },

    /// Raised by a host-provided native function.
    #[error("{name}: {message}")]
    Builtin { name: String, message: String },
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::UndefinedSymbol { .. } => ErrorCode::E2001,
            EvalErrorKind::UnknownSymbol { .. } => ErrorCode::E2002,
            EvalErrorKind::UndefinedType { .. } => ErrorCode::E2003,
            EvalErrorKind::NotCallable { .. } => ErrorCode::E2004,
            EvalErrorKind::ArityMismatch { .. } => ErrorCode::E2005,
            EvalErrorKind::MalformedNumeral { .. } => ErrorCode::E2006,
            EvalErrorKind::ModuloByZero => ErrorCode::E2007,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E2008,
            EvalErrorKind::CallDepthExceeded { .. } => ErrorCode::E2009,
            EvalErrorKind::StrayControl { .. } => ErrorCode::E2010,
            EvalErrorKind::Builtin { .. } => ErrorCode::E2011,
        }
    }
}

/// One call in an [`EvalBacktrace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Where the call was made.
    pub call_position: Position,
}

/// Snapshot of the active calls when an error left a function body,
/// innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
    /// Outer calls left out of `frames`.
    omitted: usize,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>, omitted: usize) -> Self {
        Self { frames, omitted }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "\n  {i}: {} called at {}", frame.name, frame.call_position)?;
        }
        if self.omitted > 0 {
            write!(f, "\n  ... {} more", self.omitted)?;
        }
        Ok(())
    }
}

/// A runtime error, optionally located in the source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub position: Option<Position>,
    /// Calls active where the error left the innermost function body.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            position: None,
            backtrace: None,
        }
    }

    /// Attach a source position, replacing any existing one.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach `position` unless the error is already located.
    #[must_use]
    pub fn with_position_if_absent(mut self, position: Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }

    /// Attach `backtrace` unless a deeper call already did.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl IntoDiagnostic for EvalError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::new(self.code(), self.message());
        if let Some(position) = self.position {
            diag = diag.at(position);
        }
        match &self.backtrace {
            Some(backtrace) => diag.with_note(backtrace.to_string()),
            None => diag,
        }
    }
}

// ─── Name errors ─────────────────────────────────────────────────────────────

/// A name was read that no enclosing scope binds.
#[cold]
pub fn undefined_symbol(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedSymbol {
        name: name.to_string(),
    })
}

/// A name was overwritten that no enclosing scope binds.
#[cold]
pub fn unknown_symbol(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UnknownSymbol {
        name: name.to_string(),
    })
}

/// The kind of an unbound name was requested.
#[cold]
pub fn undefined_type(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedType {
        name: name.to_string(),
    })
}

// ─── Call errors ─────────────────────────────────────────────────────────────

#[cold]
pub fn not_callable(name: &str, kind: &str) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable {
        name: name.to_string(),
        kind: kind.to_string(),
    })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::new(EvalErrorKind::CallDepthExceeded { limit })
}

/// Error reported by a native function registered by the host.
#[cold]
pub fn builtin_error(name: &str, message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Builtin {
        name: name.to_string(),
        message: message.into(),
    })
}

// ─── Arithmetic errors ───────────────────────────────────────────────────────

/// A number literal does not fit its kind (e.g. beyond `i64`).
#[cold]
pub fn malformed_numeral(literal: &str) -> EvalError {
    EvalError::new(EvalErrorKind::MalformedNumeral {
        literal: literal.to_string(),
    })
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::new(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// ─── Control flow errors ─────────────────────────────────────────────────────

/// `break` reached a function boundary or the top level.
#[cold]
pub fn unexpected_break() -> EvalError {
    EvalError::new(EvalErrorKind::StrayControl { keyword: "break" })
}

/// `continue` reached a function boundary or the top level.
#[cold]
pub fn unexpected_continue() -> EvalError {
    EvalError::new(EvalErrorKind::StrayControl {
        keyword: "continue",
    })
}
