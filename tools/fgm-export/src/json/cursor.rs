//! Read position, length and nesting depth over a byte buffer.
//!
//! Every parsing primitive goes through the cursor instead of indexing the
//! input directly, so an out-of-range read is a `None`, never a panic.

pub(crate) struct Cursor<'a> {
    input: &'a [u8],
    offset: usize,
    depth: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            depth: 0,
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Byte at the current position
    pub(crate) fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Byte `ahead` positions past the current one
    pub(crate) fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.offset.checked_add(ahead)?).copied()
    }

    /// `true` if at least `len` more bytes can be read
    pub(crate) fn can_read(&self, len: usize) -> bool {
        self.offset
            .checked_add(len)
            .is_some_and(|end| end <= self.input.len())
    }

    /// Unread input
    pub(crate) fn rest(&self) -> &'a [u8] {
        self.input.get(self.offset..).unwrap_or_default()
    }

    pub(crate) fn starts_with(&self, literal: &[u8]) -> bool {
        self.rest().starts_with(literal)
    }

    /// Advance by `len` bytes, clamped to the end of input
    pub(crate) fn advance(&mut self, len: usize) {
        self.offset = self.offset.saturating_add(len).min(self.input.len());
    }

    /// Consume `byte` if it is next
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.offset += 1;
        }
    }

    /// Skip a UTF-8 byte order mark at the start of input
    pub(crate) fn skip_bom(&mut self) {
        if self.offset == 0 && self.starts_with(b"\xEF\xBB\xBF") {
            self.offset = 3;
        }
    }

    pub(crate) fn enter(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
