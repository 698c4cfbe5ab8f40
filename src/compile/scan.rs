/// A cursor over the template source.
///
/// The scanner only knows about positions and literal substrings, it has no
/// knowledge of the template syntax. Positions are byte offsets and only
/// move forward.
#[derive(Debug, Clone)]
pub struct Scanner<'source> {
    source: &'source str,
    pos: usize,
}

impl<'source> Scanner<'source> {
    pub fn new(source: &'source str) -> Self {
        Self { source, pos: 0 }
    }

    /// The current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Returns the byte at `offset` relative to the current position.
    pub fn peek(&self, offset: isize) -> Option<u8> {
        let i = self.pos.checked_add_signed(offset)?;
        self.source.as_bytes().get(i).copied()
    }

    /// Advances the position by `n` bytes, returns `false` once the end of
    /// the source is reached.
    pub fn seek(&mut self, n: usize) -> bool {
        self.pos = (self.pos + n).min(self.source.len());
        !self.is_eof()
    }

    /// Whether the text at the current position starts with `lit`.
    pub fn starts_with(&self, lit: &str) -> bool {
        self.source.as_bytes()[self.pos..].starts_with(lit.as_bytes())
    }

    /// Returns the text from the current position up to the next occurrence
    /// of `lit` and moves to just before it.
    ///
    /// Returns `None` and leaves the position untouched if `lit` does not
    /// occur in the rest of the source.
    pub fn read_until_just_before(&mut self, lit: &str) -> Option<&'source str> {
        let start = self.pos;
        self.seek_until_just_before(lit)
            .then(|| &self.source[start..self.pos])
    }

    /// Moves to just before the next occurrence of `lit`.
    pub fn seek_until_just_before(&mut self, lit: &str) -> bool {
        match self.source.get(self.pos..).and_then(|rest| rest.find(lit)) {
            Some(i) => {
                self.pos += i;
                true
            }
            None => false,
        }
    }
}
