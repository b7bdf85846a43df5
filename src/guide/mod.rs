//! Course outlines and the guides generated from them.
//!
//! [`CourseOutline`] is the editable input (title, audience, scope and a list
//! of topic slots). [`GeneratedGuide`] is the validated upstream response.
//! Prompt construction lives in [`prompt`], display and export in
//! [`display`].

pub mod display;
pub mod prompt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::block::trim;
use crate::error::GenerateError;

pub use display::{
    ExportFormat, GuideStats, export, guide_to_document, guide_to_html, guide_to_text,
};
pub use prompt::{build_prompt, response_schema};

/// Topics offered as one-click suggestions.
pub const POPULAR_TOPICS: [&str; 8] = [
    "Python Programming",
    "Machine Learning",
    "Web Development",
    "Data Science",
    "Digital Marketing",
    "UI/UX Design",
    "Business Strategy",
    "Project Management",
];

#[inline]
fn is_blank(s: &str) -> bool {
    trim(s).is_empty()
}

/// The course description a guide is generated from.
///
/// A fresh outline has one empty topic slot, and editing never removes the
/// last slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutline {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "target_audience")]
    pub target_audience: String,
    #[serde(default, alias = "duration_scope")]
    pub duration_scope: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Default for CourseOutline {
    fn default() -> Self {
        Self {
            title: String::new(),
            target_audience: String::new(),
            duration_scope: String::new(),
            topics: vec![String::new()],
        }
    }
}

impl CourseOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an outline from TOML.
    ///
    /// # Example
    /// ```
    /// use eduguide::CourseOutline;
    ///
    /// let outline = CourseOutline::from_toml_str(
    ///     "title = \"Rust\"\ntopics = [\"Ownership\", \"Traits\"]",
    /// ).unwrap();
    /// assert!(outline.is_valid());
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Append an empty topic slot.
    pub fn add_topic(&mut self) {
        self.topics.push(String::new());
    }

    /// Remove the topic at `index`.
    ///
    /// The last remaining slot is never removed, and out-of-range indices
    /// are ignored.
    pub fn remove_topic(&mut self, index: usize) {
        if self.topics.len() > 1 && index < self.topics.len() {
            self.topics.remove(index);
        }
    }

    /// Fill the last slot with `topic` if it is blank, otherwise append.
    pub fn add_popular_topic(&mut self, topic: &str) {
        match self.topics.last_mut() {
            Some(last) if is_blank(last) => *last = topic.to_owned(),
            _ => self.topics.push(topic.to_owned()),
        }
    }

    /// Title and topics ready for generation.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check the outline, naming the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.title) {
            return Err("course title is required".to_owned());
        }
        if self.topics.is_empty() {
            return Err("at least one topic is required".to_owned());
        }
        if let Some(n) = self.topics.iter().position(|t| is_blank(t)) {
            return Err(format!("topic {} is empty", n + 1));
        }
        Ok(())
    }

    /// Topics that are not blank, in order.
    pub fn filled_topics(&self) -> impl Iterator<Item = &str> {
        self.topics
            .iter()
            .map(String::as_str)
            .filter(|t| !is_blank(t))
    }
}

/// One titled section of a guide; `content` is Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// A further-reading link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub uri: String,
}

/// A generated course guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedGuide {
    pub title: String,
    pub overview: String,
    pub learning_objectives: Vec<String>,
    pub sections: Vec<Section>,
    /// Missing or `null` in the upstream JSON means no references.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub references: Vec<Reference>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Reference>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Reference>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl GeneratedGuide {
    /// Parse the JSON text returned by the model.
    ///
    /// Leading and trailing whitespace is ignored. Anything that does not fit
    /// the guide shape is a [`GenerateError::MalformedResponse`].
    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        serde_json::from_str(trim(text))
            .map_err(|e| GenerateError::MalformedResponse(format!("invalid guide JSON: {e}")))
    }

    pub fn stats(&self) -> GuideStats {
        GuideStats {
            sections: self.sections.len(),
            objectives: self.learning_objectives.len(),
            references: self.references.len(),
        }
    }
}
