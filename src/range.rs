//! Byte ranges into rendered text.

/// Half-open byte range into a string buffer.
///
/// Ranges produced by the inline matchers always start and end on ASCII
/// markers, so slicing a `&str` with them cannot split a character.
///
/// # Example
/// ```
/// use eduguide::Range;
///
/// let text = "Hello, World!";
/// let range = Range::new(7, 12);
/// assert_eq!(range.slice(text), "World");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty range at a position.
    #[inline]
    pub const fn empty_at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Get the text this range refers to.
    #[inline]
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}
