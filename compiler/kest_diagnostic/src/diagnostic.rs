//! The phase-independent error record and its host rendering.

use std::fmt;

use kest_ir::Position;

use crate::ErrorCode;

/// A rendered-ready error: code, message, and an optional position.
///
/// Errors without a position (for example an I/O failure in the host, or
/// a producer that stopped early) render as their bare message. Notes
/// follow the message, one per line.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub position: Option<Position>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            position: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// 1-based line, if the error has a position.
    pub fn line(&self) -> Option<u32> {
        self.position.map(|p| p.line)
    }

    /// 1-based column, if the error has a position.
    pub fn column(&self) -> Option<u32> {
        self.position.map(|p| p.column)
    }

    /// Render as `<source>:line <L>:column <C>: <message>`, or the bare
    /// message when there is no position, followed by any notes.
    pub fn render(&self, source_name: &str) -> String {
        let mut out = match self.position {
            Some(position) => format!("{source_name}:{position}: {}", self.message),
            None => self.message.clone(),
        };
        for note in &self.notes {
            out.push('\n');
            out.push_str(note);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{position}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Conversion from a phase error into a [`Diagnostic`].
pub trait IntoDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
    fn to_diagnostic(&self) -> Diagnostic {
        self.clone()
    }
}
