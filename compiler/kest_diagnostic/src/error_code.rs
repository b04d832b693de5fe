//! Error codes for all interpreter diagnostics.
//!
//! The first digit names the phase that produced the error.

use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where the first digit indicates phase:
/// - E0xxx: Lexical errors
/// - E1xxx: Syntax errors
/// - E2xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Raw newline inside a string literal
    E0002,
    /// Unrecognized character
    E0003,
    /// Multi-digit integer with a leading zero
    E0004,
    /// Malformed number literal
    E0005,
    /// Number literal immediately followed by a letter
    E0006,
    /// Unknown escape sequence
    E0007,
    /// Token producer stopped before end of input
    E0008,

    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected identifier
    E1003,

    // Runtime Errors (E2xxx)
    /// Undefined symbol
    E2001,
    /// Assignment to an unknown symbol
    E2002,
    /// Undefined type
    E2003,
    /// Value is not callable
    E2004,
    /// Argument count mismatch
    E2005,
    /// Malformed numeral
    E2006,
    /// Modulo by zero
    E2007,
    /// Integer overflow
    E2008,
    /// Maximum call depth exceeded
    E2009,
    /// `break` or `continue` outside a loop
    E2010,
    /// Error raised by a host built-in
    E2011,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    ///
    /// When adding a variant: add it to the enum, `as_str()`, and here.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
        }
    }

    /// Check if this is a lexical error (E0xxx).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a syntax error (E1xxx).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a runtime error (E2xxx).
    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` into an `ErrorCode`.
///
/// Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or(())
    }
}
