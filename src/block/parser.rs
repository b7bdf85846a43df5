//! Block segmentation and classification.

use memchr::memchr;

use super::kind::{Block, Lines, ListKind};
use crate::cursor::{Cursor, is_regex_space, line_starts};

/// Iterator over the classified blocks of a document.
///
/// Blocks are separated by runs of two or more `\n`. Each segment is trimmed
/// and segments that end up empty are skipped.
///
/// # Example
/// ```
/// use eduguide::block::{Block, BlockParser};
///
/// let blocks: Vec<_> = BlockParser::new("# Title\n\n\n\nBody").collect();
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[0], Block::Heading { level: 1, text: "Title" }));
/// ```
#[derive(Debug, Clone)]
pub struct BlockParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> BlockParser<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Next raw segment, untrimmed.
    fn next_segment(&mut self) -> Option<&'a str> {
        if self.pos > self.input.len() {
            return None;
        }

        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut scan = start;

        while let Some(offset) = memchr(b'\n', &bytes[scan..]) {
            let nl = scan + offset;
            let run = bytes[nl..].iter().take_while(|&&b| b == b'\n').count();
            if run >= 2 {
                self.pos = nl + run;
                return Some(&self.input[start..nl]);
            }
            scan = nl + run;
        }

        // Past the end marks the iterator as exhausted.
        self.pos = self.input.len() + 1;
        Some(&self.input[start..])
    }
}

impl<'a> Iterator for BlockParser<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        loop {
            let segment = trim(self.next_segment()?);
            if !segment.is_empty() {
                return Some(classify(segment));
            }
        }
    }
}

/// Trim regex-style whitespace from both ends.
#[inline]
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_regex_space)
}

/// Classify a trimmed, non-empty block.
///
/// Checks run in priority order: headings, blockquote, fenced code, list,
/// and finally paragraph.
pub fn classify(block: &str) -> Block<'_> {
    if let Some(text) = block.strip_prefix("# ") {
        return Block::Heading { level: 1, text };
    }
    if let Some(text) = block.strip_prefix("## ") {
        return Block::Heading { level: 2, text };
    }
    if let Some(text) = block.strip_prefix("### ") {
        return Block::Heading { level: 3, text };
    }

    if block.starts_with("> ") {
        let lines = block.split('\n').map(strip_quote_marker).collect();
        return Block::BlockQuote { lines };
    }

    if block.starts_with("```") && block.ends_with("```") {
        let inner = if block.len() > 6 {
            &block[3..block.len() - 3]
        } else {
            ""
        };
        return Block::CodeBlock { code: trim(inner) };
    }

    if let Some(kind) = list_kind(block) {
        let items: Lines<'_> = block.split('\n').map(strip_list_marker).collect();
        return Block::List { kind, items };
    }

    Block::Paragraph { text: block }
}

/// Remove a leading `>` and at most one following space.
#[inline]
fn strip_quote_marker(line: &str) -> &str {
    match line.strip_prefix('>') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

/// Determine whether the block is a list, and which kind.
///
/// Any line (after leading whitespace) opening with an ordered marker makes
/// the whole block ordered; otherwise any bullet marker makes it unordered.
fn list_kind(block: &str) -> Option<ListKind> {
    let mut unordered = false;
    for start in line_starts(block) {
        let mut cursor = Cursor::new_at(block, start);
        cursor.skip_spaces();
        match marker_at(&mut cursor) {
            Some(ListKind::Ordered) => return Some(ListKind::Ordered),
            Some(ListKind::Unordered) => unordered = true,
            None => {}
        }
    }
    unordered.then_some(ListKind::Unordered)
}

/// Match `[-*] ` or `\d+\. ` at the cursor, consuming it on success.
fn marker_at(cursor: &mut Cursor<'_>) -> Option<ListKind> {
    let saved = *cursor;
    if cursor.eat_byte(b'-') || cursor.eat_byte(b'*') {
        if cursor.eat_byte(b' ') {
            return Some(ListKind::Unordered);
        }
        *cursor = saved;
        return None;
    }
    if cursor.eat_digits() > 0 && cursor.eat_str(". ") {
        return Some(ListKind::Ordered);
    }
    *cursor = saved;
    None
}

/// Strip `\s*([-*]|\d+\.) ` from the start of an item, if present.
#[inline]
fn strip_list_marker(line: &str) -> &str {
    let mut cursor = Cursor::new(line);
    cursor.skip_spaces();
    match marker_at(&mut cursor) {
        Some(_) => cursor.rest(),
        None => line,
    }
}
