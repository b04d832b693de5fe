//! Character cursor with line/column tracking.
//!
//! The source is decoded into `char`s up front so that one step of the
//! cursor is one column. Past the end, [`Cursor::current`] returns `None`.

use kest_ir::Position;

pub(crate) struct Cursor {
    chars: Vec<char>,
    /// Index of the current character.
    pos: usize,
    /// Line/column of the current character.
    position: Position,
}

impl Cursor {
    pub(crate) fn new(chars: Vec<char>) -> Self {
        Cursor {
            chars,
            pos: 0,
            position: Position::START,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// The character after the current one.
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Step past the current character. No-op at end of input.
    pub(crate) fn advance(&mut self) {
        match self.current() {
            Some('\n') => self.position = self.position.next_line(),
            Some(_) => self.position = self.position.advanced_by(1),
            None => return,
        }
        self.pos += 1;
    }

    /// Advance while `pred` holds for the current character.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Advance up to (not past) the next newline, or to end of input.
    pub(crate) fn eat_until_newline_or_eof(&mut self) {
        self.eat_while(|c| c != '\n');
    }

    /// Index of the current character.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// The text from index `start` up to the current character.
    pub(crate) fn slice_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }
}
