//! Block variants produced by classification.

use smallvec::SmallVec;

/// Lines or items of a block, borrowed from the input.
///
/// Most blocks in generated guides have a handful of lines, so they stay
/// on the stack.
pub type Lines<'a> = SmallVec<[&'a str; 8]>;

/// List flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `-` or `*` markers, rendered as `<ul>`.
    Unordered,
    /// `1.` style markers, rendered as `<ol>`.
    Ordered,
}

/// A classified block. Every variant borrows from the trimmed block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// `# `, `## ` or `### ` heading.
    Heading {
        /// Heading level (1-3).
        level: u8,
        /// Text after the marker, newlines kept.
        text: &'a str,
    },
    /// `> ` quote; each line has its marker removed.
    BlockQuote { lines: Lines<'a> },
    /// Triple-backtick fenced block.
    CodeBlock {
        /// Inner text with delimiters stripped and whitespace trimmed.
        code: &'a str,
    },
    /// Bulleted or numbered list; one item per line.
    List { kind: ListKind, items: Lines<'a> },
    /// Fallback.
    Paragraph { text: &'a str },
}

impl Block<'_> {
    /// Whether this block's output must be shielded from inline rules
    /// when code-block protection is on.
    #[inline]
    pub fn is_code(&self) -> bool {
        matches!(self, Block::CodeBlock { .. })
    }
}
