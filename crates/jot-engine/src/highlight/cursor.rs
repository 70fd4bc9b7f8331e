/// A cursor for byte-by-byte delimiter scanning with position tracking.
///
/// Operates over the whole document so that look-behind checks can see
/// bytes that belong to earlier matches.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.byte_at(self.i)
    }

    /// Peeks at the byte before the current position.
    pub fn prev(&self) -> Option<u8> {
        self.i.checked_sub(1).and_then(|i| self.byte_at(i))
    }

    /// Peeks at the byte after the current position.
    pub fn next(&self) -> Option<u8> {
        self.byte_at(self.i + 1)
    }

    /// Advances past the current character, returning its first byte.
    ///
    /// Steps a whole UTF-8 sequence so the position always stays on a char
    /// boundary.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        let width = self.s[self.i..].chars().next().map_or(1, char::len_utf8);
        self.i += width;
        Some(b)
    }

    fn byte_at(&self, i: usize) -> Option<u8> {
        self.s.as_bytes().get(i).copied()
    }
}
