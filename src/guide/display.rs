//! Guide display and export.
//!
//! The HTML rendition mirrors the on-screen guide: header, stats, overview,
//! learning objectives, one rendered Markdown section per guide section, and
//! the reference list. Only section content goes through the Markdown
//! renderer; every other field is escaped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GeneratedGuide;
use crate::{HtmlWriter, Options, render_with_options};

/// Item counts shown above a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideStats {
    pub sections: usize,
    pub objectives: usize,
    pub references: usize,
}

impl GuideStats {
    /// Labelled counts in display order.
    pub fn entries(&self) -> [(&'static str, usize); 3] {
        [
            ("Sections", self.sections),
            ("Objectives", self.objectives),
            ("References", self.references),
        ]
    }
}

/// Output format for [`export`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone HTML document.
    #[default]
    Html,
    /// Plain text, as copied from the rendered guide.
    Text,
    /// The guide record as pretty-printed JSON.
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown export format '{other}' (expected html, text or json)"
            )),
        }
    }
}

/// Render a guide as an HTML fragment.
///
/// # Example
/// ```
/// use eduguide::{GeneratedGuide, Options, Section};
/// use eduguide::guide::guide_to_html;
///
/// let guide = GeneratedGuide {
///     title: "Rust".into(),
///     overview: "Systems programming.".into(),
///     learning_objectives: vec![],
///     sections: vec![Section { title: "Basics".into(), content: "Use **cargo**.".into() }],
///     references: vec![],
/// };
/// let html = guide_to_html(&guide, &Options::default());
/// assert!(html.contains("<h2>Basics</h2><p>Use <strong>cargo</strong>.</p>"));
/// assert!(!html.contains("Learning Objectives"));
/// ```
pub fn guide_to_html(guide: &GeneratedGuide, options: &Options) -> String {
    let content_len: usize = guide.sections.iter().map(|s| s.content.len()).sum();
    let mut w = HtmlWriter::with_capacity_for(content_len + 1024);

    w.write_text("<article class=\"guide\">");
    w.newline();

    w.write_text("<header><h1>");
    w.write_escaped_text(&guide.title);
    w.write_text("</h1><p>Generated by AI</p></header>");
    w.newline();

    w.write_text("<dl class=\"guide-stats\">");
    for (label, value) in guide.stats().entries() {
        w.write_text("<dt>");
        w.write_text(label);
        w.write_text("</dt><dd>");
        w.write_usize(value);
        w.write_text("</dd>");
    }
    w.write_text("</dl>");
    w.newline();

    w.write_text("<p class=\"guide-overview\">");
    w.write_escaped_text(&guide.overview);
    w.write_text("</p>");
    w.newline();

    if !guide.learning_objectives.is_empty() {
        w.write_text("<section class=\"guide-objectives\"><h2>Learning Objectives</h2>");
        w.ol_start();
        for objective in &guide.learning_objectives {
            w.li_start();
            w.write_escaped_text(objective);
            w.li_end();
        }
        w.ol_end();
        w.write_text("</section>");
        w.newline();
    }

    for section in &guide.sections {
        let markdown = format!("## {}\n\n{}", section.title, section.content);
        w.write_text("<section>");
        w.write_text(&render_with_options(&markdown, options));
        w.write_text("</section>");
        w.newline();
    }

    if !guide.references.is_empty() {
        w.write_text("<section class=\"guide-references\"><h3>Further Reading &amp; References</h3>");
        w.ul_start();
        for reference in &guide.references {
            w.li_start();
            w.write_text("<a href=\"");
            w.write_escaped_attr(&reference.uri);
            w.write_text("\" target=\"_blank\" rel=\"noopener noreferrer\">");
            w.write_escaped_text(&reference.title);
            w.write_text("</a>");
            w.li_end();
        }
        w.ul_end();
        w.write_text("</section>");
        w.newline();
    }

    w.write_text("</article>");
    w.newline();
    w.into_string()
}

/// Render a guide as a standalone HTML page.
pub fn guide_to_document(guide: &GeneratedGuide, options: &Options) -> String {
    let body = guide_to_html(guide, options);
    let mut w = HtmlWriter::with_capacity_for(body.len() + 256);
    w.write_text("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n");
    w.write_text("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    w.write_text("<title>");
    w.write_escaped_text(&guide.title);
    w.write_text("</title>\n</head>\n<body>\n");
    w.write_text(&body);
    w.write_text("</body>\n</html>\n");
    w.into_string()
}

/// Plain-text rendition of a guide.
///
/// Section content is kept as written, Markdown markers included.
pub fn guide_to_text(guide: &GeneratedGuide) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str(&guide.title);
    out.push_str("\nGenerated by AI\n\n");

    for (label, value) in guide.stats().entries() {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out.push('\n');

    out.push_str(&guide.overview);
    out.push_str("\n\n");

    if !guide.learning_objectives.is_empty() {
        out.push_str("Learning Objectives\n");
        for (i, objective) in guide.learning_objectives.iter().enumerate() {
            out.push_str(&format!("{}. {objective}\n", i + 1));
        }
        out.push('\n');
    }

    for section in &guide.sections {
        out.push_str(&section.title);
        out.push_str("\n\n");
        out.push_str(section.content.trim_end());
        out.push_str("\n\n");
    }

    if !guide.references.is_empty() {
        out.push_str("Further Reading & References\n");
        for reference in &guide.references {
            out.push_str(&format!("- {} - {}\n", reference.title, reference.uri));
        }
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

/// Export a guide in the given format.
pub fn export(
    guide: &GeneratedGuide,
    format: ExportFormat,
    options: &Options,
) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Html => Ok(guide_to_document(guide, options)),
        ExportFormat::Text => Ok(guide_to_text(guide)),
        ExportFormat::Json => serde_json::to_string_pretty(guide).map(|mut json| {
            json.push('\n');
            json
        }),
    }
}
