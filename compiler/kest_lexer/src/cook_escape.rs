//! String literal cooking.
//!
//! Valid escapes: `\"` `\\` `\n` `\t` `\r` `\0`. The scanner rejects
//! anything else, so cooking a scanner-produced lexeme cannot fail; the
//! error path exists for lexemes built by other means.

use kest_ir::Position;

use crate::lex_error::LexError;

/// Resolve the character after a backslash.
#[inline]
pub(crate) fn resolve_escape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Turn a string lexeme (quotes included) into its value.
///
/// `position` is the position of the opening quote; escape errors are
/// reported at the offending backslash.
pub fn cook_string_literal(lexeme: &str, position: Position) -> Result<String, LexError> {
    let content = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| LexError::unterminated_string(position))?;

    if !content.contains('\\') {
        return Ok(content.to_string());
    }

    let mut cooked = String::with_capacity(content.len());
    let mut chars = content.chars().enumerate();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            cooked.push(c);
            continue;
        }
        // +1 for the opening quote
        #[allow(
            clippy::cast_possible_truncation,
            reason = "a single line longer than u32::MAX columns cannot be positioned anyway"
        )]
        let at = position.advanced_by(i as u32 + 1);
        match chars.next() {
            Some((_, esc)) => match resolve_escape(esc) {
                Some(resolved) => cooked.push(resolved),
                None => return Err(LexError::invalid_escape(at, esc)),
            },
            None => return Err(LexError::unterminated_string(position)),
        }
    }
    Ok(cooked)
}
