//! Cursor and scanning helpers over UTF-8 text.
//!
//! All markers recognised by the renderer are ASCII, so positions returned
//! here always fall on character boundaries and can be used to slice the
//! original `&str`.

use memchr::{memchr, memchr3, memmem};

/// A forward-only cursor over a string slice.
///
/// # Example
/// ```
/// use eduguide::cursor::Cursor;
///
/// let mut cursor = Cursor::new("  12. item");
/// cursor.skip_spaces();
/// assert_eq!(cursor.eat_digits(), 2);
/// assert!(cursor.eat_str(". "));
/// assert_eq!(cursor.rest(), "item");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `input`.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor starting at a byte offset.
    #[inline]
    pub fn new_at(input: &'a str, offset: usize) -> Self {
        debug_assert!(input.is_char_boundary(offset));
        Self { input, pos: offset }
    }

    /// Peek the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Remaining input from the cursor position.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Skip regex-style whitespace (`\s`), which includes line terminators.
    #[inline]
    pub fn skip_spaces(&mut self) {
        let rest = self.rest();
        let skipped = rest
            .char_indices()
            .find(|&(_, c)| !is_regex_space(c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += skipped;
    }

    /// Consume `b` if it is the current byte.
    #[inline]
    pub fn eat_byte(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `s` if the remaining input starts with it.
    #[inline]
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consume a run of ASCII digits, returning how many were consumed.
    #[inline]
    pub fn eat_digits(&mut self) -> usize {
        let count = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        self.pos += count;
        count
    }
}

/// ECMAScript `\s`: ASCII whitespace, NBSP, the Unicode space separators,
/// the line/paragraph separators and the BOM.
#[inline]
pub fn is_regex_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Length in bytes of the line terminator starting at `pos`, if any.
///
/// Recognises `\n`, `\r`, U+2028 and U+2029.
#[inline]
pub fn line_terminator_len(bytes: &[u8], pos: usize) -> Option<usize> {
    match *bytes.get(pos)? {
        b'\n' | b'\r' => Some(1),
        0xE2 if bytes.get(pos + 1) == Some(&0x80)
            && matches!(bytes.get(pos + 2).copied(), Some(0xA8 | 0xA9)) =>
        {
            Some(3)
        }
        _ => None,
    }
}

/// Offset of the first line terminator at or after `from`, or `bytes.len()`.
#[inline]
pub fn line_end(bytes: &[u8], from: usize) -> usize {
    let mut pos = from;
    while let Some(offset) = memchr3(b'\n', b'\r', 0xE2, &bytes[pos..]) {
        let candidate = pos + offset;
        if line_terminator_len(bytes, candidate).is_some() {
            return candidate;
        }
        pos = candidate + 1;
    }
    bytes.len()
}

/// Offsets of every line start: 0 and each position following a line terminator.
pub fn line_starts(input: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = input.as_bytes();
    let mut next = Some(0);
    std::iter::from_fn(move || {
        let start = next?;
        let end = line_end(bytes, start);
        next = line_terminator_len(bytes, end).map(|len| end + len);
        Some(start)
    })
}

/// Find `needle` within `bytes[from..to]`, returning an absolute offset.
#[inline]
pub fn find_in(bytes: &[u8], from: usize, to: usize, needle: &[u8]) -> Option<usize> {
    if from >= to {
        return None;
    }
    let haystack = &bytes[from..to];
    let found = match needle {
        [b] => memchr(*b, haystack),
        _ => memmem::find(haystack, needle),
    };
    found.map(|offset| from + offset)
}
