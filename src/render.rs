//! HTML output writer.
//!
//! Block and inline rendering write into the same kind of buffer. Tags are
//! emitted back to back with no separating newlines: inline rules scan the
//! concatenated block output, and a newline between blocks would change
//! which spans they can match.

use crate::escape;

/// HTML output writer with a pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use eduguide::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(16);
/// writer.paragraph_start();
/// writer.write_text("Hello");
/// writer.line_break();
/// writer.write_text("World");
/// writer.paragraph_end();
///
/// assert_eq!(writer.into_string(), "<p>Hello<br />World</p>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
        }
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Markup adds roughly a quarter on top of the source text.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: String::with_capacity(input_len + input_len / 4),
        }
    }

    /// Write markup or text verbatim.
    #[inline]
    pub fn write_text(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write text with `<`/`>` escaped (code block content).
    #[inline]
    pub fn write_angle_escaped(&mut self, text: &str) {
        escape::escape_angle_brackets_into(&mut self.out, text);
    }

    /// Write text with full HTML text escaping.
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write a double-quoted attribute value with full escaping.
    #[inline]
    pub fn write_escaped_attr(&mut self, value: &str) {
        escape::escape_attr_into(&mut self.out, value);
    }

    /// Write a decimal number.
    #[inline]
    pub fn write_usize(&mut self, n: usize) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(self.out, "{n}");
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Clear output for reuse (keeps capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.out.clear();
    }

    /// Get output as str.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Take ownership as String.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    // --- Block elements ---

    /// Write heading start: `<hN>`
    #[inline]
    pub fn heading_start(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.out.push_str("<h");
        self.out.push(char::from(b'0' + level));
        self.out.push('>');
    }

    /// Write heading end: `</hN>`
    #[inline]
    pub fn heading_end(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.out.push_str("</h");
        self.out.push(char::from(b'0' + level));
        self.out.push('>');
    }

    #[inline]
    pub fn paragraph_start(&mut self) {
        self.out.push_str("<p>");
    }

    #[inline]
    pub fn paragraph_end(&mut self) {
        self.out.push_str("</p>");
    }

    #[inline]
    pub fn blockquote_start(&mut self) {
        self.out.push_str("<blockquote>");
    }

    #[inline]
    pub fn blockquote_end(&mut self) {
        self.out.push_str("</blockquote>");
    }

    /// Write code block start: `<pre><code>`
    #[inline]
    pub fn code_block_start(&mut self) {
        self.out.push_str("<pre><code>");
    }

    /// Write code block end: `</code></pre>`
    #[inline]
    pub fn code_block_end(&mut self) {
        self.out.push_str("</code></pre>");
    }

    #[inline]
    pub fn ul_start(&mut self) {
        self.out.push_str("<ul>");
    }

    #[inline]
    pub fn ul_end(&mut self) {
        self.out.push_str("</ul>");
    }

    #[inline]
    pub fn ol_start(&mut self) {
        self.out.push_str("<ol>");
    }

    #[inline]
    pub fn ol_end(&mut self) {
        self.out.push_str("</ol>");
    }

    #[inline]
    pub fn li_start(&mut self) {
        self.out.push_str("<li>");
    }

    #[inline]
    pub fn li_end(&mut self) {
        self.out.push_str("</li>");
    }

    /// Write a line break: `<br />`
    #[inline]
    pub fn line_break(&mut self) {
        self.out.push_str("<br />");
    }

    // --- Inline elements ---

    /// Write `<strong>content</strong>`.
    #[inline]
    pub fn strong(&mut self, content: &str) {
        self.out.push_str("<strong>");
        self.out.push_str(content);
        self.out.push_str("</strong>");
    }

    /// Write `<em>content</em>`.
    #[inline]
    pub fn emphasis(&mut self, content: &str) {
        self.out.push_str("<em>");
        self.out.push_str(content);
        self.out.push_str("</em>");
    }

    /// Write `<code>content</code>`. Content is not escaped.
    #[inline]
    pub fn inline_code(&mut self, content: &str) {
        self.out.push_str("<code>");
        self.out.push_str(content);
        self.out.push_str("</code>");
    }

    /// Write an image element. Attribute values are written as captured.
    #[inline]
    pub fn image(&mut self, alt: &str, src: &str) {
        self.out.push_str("<img alt=\"");
        self.out.push_str(alt);
        self.out.push_str("\" src=\"");
        self.out.push_str(src);
        self.out.push_str("\" />");
    }

    /// Write an external link that opens in a new browsing context.
    #[inline]
    pub fn external_link(&mut self, href: &str, text: &str) {
        self.out.push_str("<a href=\"");
        self.out.push_str(href);
        self.out
            .push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        self.out.push_str(text);
        self.out.push_str("</a>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_basic() {
        let mut writer = HtmlWriter::new();
        writer.paragraph_start();
        writer.write_text("Hello");
        writer.paragraph_end();
        assert_eq!(writer.as_str(), "<p>Hello</p>");
    }

    #[test]
    fn test_writer_headings() {
        for level in 1..=3 {
            let mut writer = HtmlWriter::new();
            writer.heading_start(level);
            writer.write_text("Title");
            writer.heading_end(level);
            assert_eq!(writer.as_str(), format!("<h{level}>Title</h{level}>"));
        }
    }

    #[test]
    fn test_writer_code_block() {
        let mut writer = HtmlWriter::new();
        writer.code_block_start();
        writer.write_angle_escaped("if a < b {}");
        writer.code_block_end();
        assert_eq!(writer.as_str(), "<pre><code>if a &lt; b {}</code></pre>");
    }

    #[test]
    fn test_writer_lists() {
        let mut writer = HtmlWriter::new();
        writer.ol_start();
        writer.li_start();
        writer.write_text("one");
        writer.li_end();
        writer.ol_end();
        writer.ul_start();
        writer.ul_end();
        assert_eq!(writer.as_str(), "<ol><li>one</li></ol><ul></ul>");
    }

    #[test]
    fn test_writer_external_link() {
        let mut writer = HtmlWriter::new();
        writer.external_link("https://example.com", "site");
        assert_eq!(
            writer.as_str(),
            "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a>"
        );
    }

    #[test]
    fn test_writer_image() {
        let mut writer = HtmlWriter::new();
        writer.image("logo", "/logo.png");
        assert_eq!(writer.as_str(), "<img alt=\"logo\" src=\"/logo.png\" />");
    }

    #[test]
    fn test_writer_escaped_attr() {
        let mut writer = HtmlWriter::new();
        writer.write_escaped_attr("a\"b");
        assert_eq!(writer.as_str(), "a&quot;b");
    }

    #[test]
    fn test_writer_clear_reuse() {
        let mut writer = HtmlWriter::new();
        writer.write_text("first");
        writer.clear();
        assert!(writer.is_empty());
        writer.write_text("second");
        assert_eq!(writer.as_str(), "second");
    }

    #[test]
    fn test_write_usize() {
        let mut writer = HtmlWriter::new();
        writer.write_usize(0);
        writer.write_text(",");
        writer.write_usize(1234567890);
        assert_eq!(writer.as_str(), "0,1234567890");
    }
}
