//! Prompt text and structured-output schema for guide generation.

use serde_json::{Value, json};

use super::CourseOutline;

/// Build the generation prompt for an outline.
///
/// The audience and scope lines are left empty when those fields are empty,
/// and blank topics are dropped.
pub fn build_prompt(outline: &CourseOutline) -> String {
    let audience = if outline.target_audience.is_empty() {
        String::new()
    } else {
        format!("**Target Audience:** \"{}\"", outline.target_audience)
    };
    let duration = if outline.duration_scope.is_empty() {
        String::new()
    } else {
        format!("**Duration/Scope:** \"{}\"", outline.duration_scope)
    };
    let topics = outline
        .filled_topics()
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "
You are an expert academic writer and educator. Your task is to generate a comprehensive, well-structured educational guide based on the following details.

**Course Title:** \"{title}\"
{audience}
{duration}

**Core Topics/Modules to Cover:**
{topics}

Please generate the guide content. Use your vast knowledge for accurate and up-to-date information.
IMPORTANT: The 'content' for each section in the JSON output should be in rich Markdown format. Also, please generate a list of 3-5 web links for further reading and add them to a 'references' property in the JSON object, following the specified schema.
",
        title = outline.title,
    )
}

/// JSON schema the model's output must follow.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "The course title provided by the user."
            },
            "overview": {
                "type": "STRING",
                "description": "A brief, engaging summary of the course. This should be a single paragraph."
            },
            "learningObjectives": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 3-5 key skills or knowledge points the student will acquire."
            },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "The title of this content section."
                        },
                        "content": {
                            "type": "STRING",
                            "description": "Detailed content for the section in Markdown format. Include explanations, examples, and lists where appropriate."
                        }
                    },
                    "required": ["title", "content"]
                },
                "description": "The main content of the guide, broken down into logical sections based on the provided topics."
            },
            "references": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "The title of the linked web page."
                        },
                        "uri": {
                            "type": "STRING",
                            "description": "The full URL of the web page."
                        }
                    },
                    "required": ["title", "uri"]
                },
                "description": "A list of 3-5 relevant web links for further reading."
            }
        },
        "required": ["title", "overview", "learningObjectives", "sections", "references"]
    })
}
