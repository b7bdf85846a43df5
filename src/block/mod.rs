//! Block-level stage of the renderer.
//!
//! The input is cut into blank-line-delimited blocks, and each block is
//! classified as exactly one of:
//! - Heading (levels 1-3)
//! - Blockquote
//! - Fenced code block
//! - List (ordered or unordered)
//! - Paragraph

mod kind;
mod parser;

pub use kind::{Block, Lines, ListKind};
pub use parser::{BlockParser, classify, trim};

use crate::HtmlWriter;

/// Write the HTML for one block.
///
/// Text is written as-is; only code block content is escaped, and only for
/// `<` and `>`.
pub fn write_block(writer: &mut HtmlWriter, block: &Block<'_>) {
    match block {
        Block::Heading { level, text } => {
            writer.heading_start(*level);
            writer.write_text(text);
            writer.heading_end(*level);
        }
        Block::BlockQuote { lines } => {
            writer.blockquote_start();
            write_lines(writer, lines);
            writer.blockquote_end();
        }
        Block::CodeBlock { code } => {
            writer.code_block_start();
            writer.write_angle_escaped(code);
            writer.code_block_end();
        }
        Block::List { kind, items } => {
            match kind {
                ListKind::Unordered => writer.ul_start(),
                ListKind::Ordered => writer.ol_start(),
            }
            for item in items {
                writer.li_start();
                writer.write_text(item);
                writer.li_end();
            }
            match kind {
                ListKind::Unordered => writer.ul_end(),
                ListKind::Ordered => writer.ol_end(),
            }
        }
        Block::Paragraph { text } => {
            writer.paragraph_start();
            write_lines(writer, text.split('\n'));
            writer.paragraph_end();
        }
    }
}

/// Write lines separated by `<br />`.
fn write_lines<S: AsRef<str>>(writer: &mut HtmlWriter, lines: impl IntoIterator<Item = S>) {
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            writer.line_break();
        }
        writer.write_text(line.as_ref());
    }
}
