//! Diagnostics for the Kest interpreter.
//!
//! Every phase error (lexical, syntax, runtime) carries an [`ErrorCode`]
//! and converts into a [`Diagnostic`], which the host renders as
//! `<source>:line <L>:column <C>: <message>`.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, IntoDiagnostic};
pub use error_code::ErrorCode;
