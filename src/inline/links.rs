//! Image and link matching.
//!
//! Both captures are the shortest runs that let the rest of the pattern
//! match, and neither may cross a line terminator. The first `](` on the
//! line decides the split: if no `)` follows it on that line, no later
//! `](` can match either.

use super::InlineMatch;
use crate::Range;
use crate::cursor::{find_in, line_end};

/// Match `![alt](url)` starting at `at`.
pub(crate) fn match_image(bytes: &[u8], at: usize) -> Option<InlineMatch> {
    if bytes.get(at + 1) != Some(&b'[') {
        return None;
    }
    match_target(bytes, at + 2)
}

/// Match `[text](url)` starting at `at`.
pub(crate) fn match_link(bytes: &[u8], at: usize) -> Option<InlineMatch> {
    match_target(bytes, at + 1)
}

/// Match `label](url)` where the label starts at `start`.
fn match_target(bytes: &[u8], start: usize) -> Option<InlineMatch> {
    let eol = line_end(bytes, start);
    let split = find_in(bytes, start, eol, b"](")?;
    let close = find_in(bytes, split + 2, eol, b")")?;
    Some(InlineMatch {
        end: close + 1,
        first: Range::new(start, split),
        second: Range::new(split + 2, close),
    })
}
