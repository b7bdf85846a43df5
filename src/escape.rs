//! HTML escaping utilities.
//!
//! Two contexts are handled here:
//! - Fenced code blocks, where only `<` and `>` are replaced.
//! - Plain guide fields (titles, overview, references), which get full
//!   text or attribute escaping.
//!
//! Fast-path optimized: scans for the first escapable character,
//! then bulk-copies segments between escapes.

use memchr::memchr2;

/// Escape `<` and `>` in code block content, appending to `out`.
///
/// Ampersands and quotes pass through untouched.
///
/// # Example
/// ```
/// use eduguide::escape::escape_angle_brackets_into;
///
/// let mut out = String::new();
/// escape_angle_brackets_into(&mut out, "<script>");
/// assert_eq!(out, "&lt;script&gt;");
/// ```
#[inline]
pub fn escape_angle_brackets_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let mut last = 0;

    while let Some(offset) = memchr2(b'<', b'>', &bytes[last..]) {
        let pos = last + offset;
        out.push_str(&input[last..pos]);
        out.push_str(if bytes[pos] == b'<' { "&lt;" } else { "&gt;" });
        last = pos + 1;
    }

    out.push_str(&input[last..]);
}

/// Escape `<` and `>` and return as a new String.
///
/// Prefer `escape_angle_brackets_into` to reuse buffers.
pub fn escape_angle_brackets(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    escape_angle_brackets_into(&mut out, input);
    out
}

/// Escape text content (`<`, `>`, `&`) into the output buffer.
#[inline]
pub fn escape_text_into(out: &mut String, input: &str) {
    html_escape::encode_text_to_string(input, out);
}

/// Escape a double-quoted attribute value into the output buffer.
#[inline]
pub fn escape_attr_into(out: &mut String, input: &str) {
    html_escape::encode_double_quoted_attribute_to_string(input, out);
}
