#![expect(clippy::inline_always)]

/// Unconsumed input text and a byte cursor into it.
///
/// New chunks are appended after the unread tail; the consumed prefix is
/// dropped first so the buffer never grows with already-parsed text.
#[derive(Debug, Default)]
pub(crate) struct Buffer {
    text: String,
    cursor: usize,
}

impl Buffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        if self.cursor > 0 {
            self.text.drain(..self.cursor);
            self.cursor = 0;
        }
        self.text.push_str(chunk);
    }

    #[inline(always)]
    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.cursor..].chars().next()
    }

    /// The character after the one returned by [`Buffer::peek`].
    #[inline]
    pub(crate) fn peek_second(&self) -> Option<char> {
        let mut chars = self.text[self.cursor..].chars();
        chars.next()?;
        chars.next()
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.cursor >= self.text.len()
    }

    /// Advance past `c`, which must be the character at the cursor.
    #[inline(always)]
    pub(crate) fn advance(&mut self, c: char) {
        debug_assert_eq!(self.peek(), Some(c));
        self.cursor += c.len_utf8();
        if self.cursor >= self.text.len() {
            self.text.clear();
            self.cursor = 0;
        }
    }

    /// Number of unread bytes.
    pub(crate) fn remaining(&self) -> usize {
        self.text.len() - self.cursor
    }
}

impl Iterator for Buffer {
    type Item = char;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.peek()?;
        self.advance(c);
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rebases_unread_tail() {
        let mut buffer = Buffer::new();
        buffer.push("ab");
        assert_eq!(buffer.next(), Some('a'));
        buffer.push("cd");
        assert_eq!(buffer.remaining(), 3);
        assert_eq!(buffer.by_ref().collect::<String>(), "bcd");
        assert!(buffer.is_empty());
    }

    #[test]
    fn exhausting_the_buffer_clears_it() {
        let mut buffer = Buffer::new();
        buffer.push("x");
        buffer.advance('x');
        assert!(buffer.is_empty());
        assert!(buffer.text.is_empty());
        assert_eq!(buffer.cursor, 0);
    }

    #[test]
    fn peek_second_spans_multibyte_characters() {
        let mut buffer = Buffer::new();
        buffer.push("é\"");
        assert_eq!(buffer.peek(), Some('é'));
        assert_eq!(buffer.peek_second(), Some('"'));
        buffer.advance('é');
        assert_eq!(buffer.peek_second(), None);
    }
}
