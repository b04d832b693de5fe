//! Line/column source positions.
//!
//! Positions are 1-based. Columns count characters (Unicode scalar
//! values), not bytes, so a position can be shown to a user as-is.

use std::fmt;

/// A 1-based line/column location in the source.
///
/// Ordering is lexicographic on `(line, column)`, which matches the order
/// in which the scanner produces positions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The first character of a source file.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// The position `n` characters to the right on the same line.
    #[inline]
    #[must_use]
    pub const fn advanced_by(self, n: u32) -> Self {
        Position {
            line: self.line,
            column: self.column + n,
        }
    }

    /// The first column of the following line.
    #[inline]
    #[must_use]
    pub const fn next_line(self) -> Self {
        Position {
            line: self.line + 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests;
