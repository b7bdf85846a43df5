//! Inline code matching.
//!
//! A code span is a backtick, one or more non-backtick characters (line
//! terminators included), and a closing backtick.

use memchr::memchr;

use super::InlineMatch;
use crate::Range;

/// Match `` `text` `` starting at `at`.
pub(crate) fn match_code_span(bytes: &[u8], at: usize) -> Option<InlineMatch> {
    let start = at + 1;
    let close = start + memchr(b'`', bytes.get(start..)?)?;
    if close == start {
        return None;
    }
    Some(InlineMatch {
        end: close + 1,
        first: Range::new(start, close),
        second: Range::empty_at(close),
    })
}
