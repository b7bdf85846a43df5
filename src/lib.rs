//! eduguide: course guide generator
//!
//! This crate turns a course outline into a structured guide using the
//! Gemini content-generation API, and renders the guide as HTML or text.
//!
//! The rendering core is a lightweight Markdown-subset to HTML converter:
//! - Blocks are separated by blank lines and classified as heading,
//!   blockquote, fenced code, list or paragraph
//! - Inline spans (bold, italic, image, link, code) are substituted over the
//!   joined block output by an explicit, ordered list of rules
//! - Pure and total: no state, no I/O, never fails
//!
//! The renderer does not sanitize. Only `<` and `>` inside fenced code
//! blocks are escaped; callers that show untrusted text must sanitize the
//! output themselves.

pub mod block;
pub mod client;
pub mod config;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod guide;
pub mod inline;
pub mod range;
pub mod render;

use serde::{Deserialize, Serialize};

// Re-export primary types
pub use block::{Block, BlockParser, ListKind};
pub use client::{GeminiClient, GeminiConfig};
pub use config::Config;
pub use error::{ConfigError, GenerateError};
pub use guide::{CourseOutline, ExportFormat, GeneratedGuide, Reference, Section};
pub use inline::{INLINE_RULES, InlineRule};
pub use range::Range;
pub use render::HtmlWriter;

/// Rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Keep inline rules away from fenced code block output.
    ///
    /// Off by default: inline rules then run over the whole joined output,
    /// so `**` or backticks inside a code sample are turned into markup.
    pub protect_code_blocks: bool,
}

/// Convert Markdown to HTML.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = eduguide::render("# Hello\n\nSome **bold** text");
/// assert_eq!(html, "<h1>Hello</h1><p>Some <strong>bold</strong> text</p>");
/// ```
pub fn render(markdown: &str) -> String {
    render_with_options(markdown, &Options::default())
}

/// Convert Markdown to HTML with options.
pub fn render_with_options(markdown: &str, options: &Options) -> String {
    let mut blocks = HtmlWriter::with_capacity_for(markdown.len());

    if !options.protect_code_blocks {
        for block in BlockParser::new(markdown) {
            block::write_block(&mut blocks, &block);
        }
        return inline::apply_rules(blocks.as_str(), &INLINE_RULES);
    }

    // Runs of non-code blocks are collected and passed through the inline
    // rules as one string; code blocks are copied through untouched.
    let mut out = HtmlWriter::with_capacity_for(markdown.len());
    for block in BlockParser::new(markdown) {
        if block.is_code() {
            flush_inline(&mut blocks, &mut out);
            block::write_block(&mut out, &block);
        } else {
            block::write_block(&mut blocks, &block);
        }
    }
    flush_inline(&mut blocks, &mut out);
    out.into_string()
}

/// Apply inline rules to the pending block output and append it to `out`.
fn flush_inline(pending: &mut HtmlWriter, out: &mut HtmlWriter) {
    if pending.is_empty() {
        return;
    }
    out.write_text(&inline::apply_rules(pending.as_str(), &INLINE_RULES));
    pending.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protected(input: &str) -> String {
        render_with_options(
            input,
            &Options {
                protect_code_blocks: true,
            },
        )
    }

    #[test]
    fn test_empty() {
        assert_eq!(render(""), "");
        assert_eq!(render("   \n\n  \n\n"), "");
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_h1() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("## Two"), "<h2>Two</h2>");
        assert_eq!(render("### Three"), "<h3>Three</h3>");
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert_eq!(
            render("<b>raw</b>"),
            "<p><b>raw</b></p>"
        );
    }

    #[test]
    fn test_section_shape() {
        let html = render("## Basics\n\nVariables hold *values*.\n\n- `let`\n- `mut`");
        assert_eq!(
            html,
            "<h2>Basics</h2><p>Variables hold <em>values</em>.</p>\
             <ul><li><code>let</code></li><li><code>mut</code></li></ul>"
        );
    }

    #[test]
    fn test_blockquote_with_emphasis() {
        assert_eq!(
            render("> **Note:** read\n> twice"),
            "<blockquote><strong>Note:</strong> read<br />twice</blockquote>"
        );
    }

    #[test]
    fn test_code_block_legacy_inline_leak() {
        assert_eq!(
            render("```\nlet s = **ptr;\nlet t = *a * b**;\n```"),
            "<pre><code>let s = <em></em>ptr;\nlet t = <em>a </em> b<em></em>;</code></pre>"
        );
    }

    #[test]
    fn test_code_block_protected() {
        assert_eq!(
            protected("```\nx = **y** + `z`\n```"),
            "<pre><code>x = **y** + `z`</code></pre>"
        );
    }

    #[test]
    fn test_code_block_unprotected_converts_markers() {
        assert_eq!(
            render("```\nx = **y** + `z`\n```"),
            "<pre><code>x = <strong>y</strong> + <code>z</code></code></pre>"
        );
    }

    #[test]
    fn test_protection_keeps_other_blocks_converted() {
        assert_eq!(
            protected("**a**\n\n```\n**b**\n```\n\n**c**"),
            "<p><strong>a</strong></p><pre><code>**b**</code></pre><p><strong>c</strong></p>"
        );
    }

    #[test]
    fn test_protection_matches_legacy_without_code() {
        let input = "# T\n\n- *a*\n- [b](c)\n\n> `q`";
        assert_eq!(protected(input), render(input));
    }

    #[test]
    fn test_spans_cross_block_boundaries() {
        // The joined block output is scanned as one string.
        assert_eq!(
            render("a *b\n\nc* d"),
            "<p>a <em>b</p><p>c</em> d</p>"
        );
    }

    #[test]
    fn test_deterministic() {
        let input = "# A\n\n1. *x*\n2. **y**\n\n![i](u) [l](v)";
        assert_eq!(render(input), render(input));
    }
}
