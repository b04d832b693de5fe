//! Lexer for Kest.
//!
//! Two layers:
//! - [`Scanner`]: pulls one [`Token`] at a time from a character buffer,
//!   tracking line and column.
//! - Token producers implementing [`TokenSource`]: [`TokenStream`] drives
//!   the scanner lazily on the caller's thread, [`ChannelTokens`] runs it
//!   on a dedicated thread behind a rendezvous channel.
//!
//! A [`LexError`] ends the token sequence. String escapes are validated
//! here and turned into their values by [`cook_string_literal`].

mod cook_escape;
mod cursor;
mod lex_error;
mod scanner;
mod stream;

pub use cook_escape::cook_string_literal;
pub use lex_error::{LexError, LexErrorKind};
pub use scanner::Scanner;
pub use stream::{collect_tokens, ChannelTokens, TokenSource, TokenStream};

use kest_ir::Token;

/// Scan `source` to completion on the caller's thread.
///
/// The returned vector always ends with exactly one `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    collect_tokens(TokenStream::new(source))
}
