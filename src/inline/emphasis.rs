//! Bold and italic matching.
//!
//! Span text is the shortest run up to the closing marker and may not cross
//! a line terminator. An empty span (`****`, `**`) still matches.

use super::InlineMatch;
use crate::Range;
use crate::cursor::{find_in, line_end};

/// Match `**text**` starting at `at`.
pub(crate) fn match_bold(bytes: &[u8], at: usize) -> Option<InlineMatch> {
    if bytes.get(at + 1) != Some(&b'*') {
        return None;
    }
    let start = at + 2;
    let close = find_in(bytes, start, line_end(bytes, start), b"**")?;
    Some(InlineMatch {
        end: close + 2,
        first: Range::new(start, close),
        second: Range::empty_at(close),
    })
}

/// Match `*text*` starting at `at`.
pub(crate) fn match_italic(bytes: &[u8], at: usize) -> Option<InlineMatch> {
    let start = at + 1;
    let close = find_in(bytes, start, line_end(bytes, start), b"*")?;
    Some(InlineMatch {
        end: close + 1,
        first: Range::new(start, close),
        second: Range::empty_at(close),
    })
}
