//! Inline stage of the renderer.
//!
//! Inline spans are substituted after block rendering, over the joined block
//! HTML. Each rule is an independent string-to-string pass; the passes run in
//! the fixed order of [`INLINE_RULES`]:
//!
//! 1. Bold `**x**` (before italic, so `**` pairs are consumed first)
//! 2. Italic `*x*`
//! 3. Image `![alt](url)` (before link, so the `!` form is not taken as a link)
//! 4. Link `[text](url)`
//! 5. Inline code `` `x` ``
//!
//! A pass scans left to right. When a match attempt fails at a position, the
//! scan moves on by one byte; matches never overlap and output is never
//! rescanned by the same pass. Nested markers are not treated specially.

mod code_span;
mod emphasis;
mod links;

use memchr::memchr;
use tracing::trace;

use crate::{HtmlWriter, Range};

/// One inline substitution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRule {
    /// `**text**` → `<strong>`
    Bold,
    /// `*text*` → `<em>`
    Italic,
    /// `![alt](url)` → `<img>`
    Image,
    /// `[text](url)` → `<a>` opening in a new context
    Link,
    /// `` `text` `` → `<code>`
    Code,
}

/// The rule sequence used by the renderer.
pub const INLINE_RULES: [InlineRule; 5] = [
    InlineRule::Bold,
    InlineRule::Italic,
    InlineRule::Image,
    InlineRule::Link,
    InlineRule::Code,
];

impl InlineRule {
    /// Short rule name, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Image => "image",
            Self::Link => "link",
            Self::Code => "code",
        }
    }

    /// Apply this rule to every non-overlapping occurrence in `text`.
    ///
    /// # Example
    /// ```
    /// use eduguide::inline::InlineRule;
    ///
    /// assert_eq!(InlineRule::Bold.apply("a **b** c"), "a <strong>b</strong> c");
    /// ```
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Bold => substitute(text, b'*', emphasis::match_bold, |w, t, m| {
                w.strong(m.first.slice(t));
            }),
            Self::Italic => substitute(text, b'*', emphasis::match_italic, |w, t, m| {
                w.emphasis(m.first.slice(t));
            }),
            Self::Image => substitute(text, b'!', links::match_image, |w, t, m| {
                w.image(m.first.slice(t), m.second.slice(t));
            }),
            Self::Link => substitute(text, b'[', links::match_link, |w, t, m| {
                w.external_link(m.second.slice(t), m.first.slice(t));
            }),
            Self::Code => substitute(text, b'`', code_span::match_code_span, |w, t, m| {
                w.inline_code(m.first.slice(t));
            }),
        }
    }
}

/// Apply `rules` in order, each to the output of the previous one.
pub fn apply_rules(text: &str, rules: &[InlineRule]) -> String {
    rules.iter().fold(text.to_owned(), |acc, rule| {
        let out = rule.apply(&acc);
        trace!(rule = rule.name(), before = acc.len(), after = out.len(), "inline pass");
        out
    })
}

/// A successful match at some start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InlineMatch {
    /// Offset one past the last byte of the match.
    pub end: usize,
    /// First capture (span text, alt text, or link text).
    pub first: Range,
    /// Second capture (URL); empty for single-capture rules.
    pub second: Range,
}

type Matcher = fn(&[u8], usize) -> Option<InlineMatch>;
type Emitter = fn(&mut HtmlWriter, &str, &InlineMatch);

/// Run one global, single-pass substitution.
///
/// Only offsets holding `trigger` are tried as match starts.
fn substitute(text: &str, trigger: u8, matcher: Matcher, emit: Emitter) -> String {
    let bytes = text.as_bytes();
    let mut writer = HtmlWriter::with_capacity_for(text.len());
    let mut last = 0;
    let mut pos = 0;

    while let Some(offset) = memchr(trigger, &bytes[pos..]) {
        let at = pos + offset;
        match matcher(bytes, at) {
            Some(m) => {
                writer.write_text(&text[last..at]);
                emit(&mut writer, text, &m);
                last = m.end;
                pos = m.end;
            }
            None => pos = at + 1,
        }
    }

    writer.write_text(&text[last..]);
    writer.into_string()
}
