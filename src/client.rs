//! Gemini content-generation client.
//!
//! One non-streaming `generateContent` call per guide, with JSON output
//! constrained by [`response_schema`]. The reply is validated into a
//! [`GeneratedGuide`] at this boundary.

use std::fmt;
use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::GenerateError;
use crate::guide::{CourseOutline, GeneratedGuide, build_prompt, response_schema};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("eduguide/", env!("CARGO_PKG_VERSION"));

/// Resolved client settings.
///
/// Build one directly, or from a config file with
/// [`Config::gemini_config`](crate::Config::gemini_config).
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Tokens the model may spend thinking; `0` disables thinking.
    pub thinking_budget: u32,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings with the given key and all defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            thinking_budget: 0,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// The key never appears in logs or debug output.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("thinking_budget", &self.thinking_budget)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gemini client. Cheap to share; holds a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerateError::MissingApiKey);
        }
        url::Url::parse(&config.base_url).map_err(|source| GenerateError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(GenerateError::Request)?;

        Ok(Self { config, http })
    }

    /// Generate a guide for `outline`.
    ///
    /// An invalid outline is rejected before any request is sent.
    pub async fn generate_guide(
        &self,
        outline: &CourseOutline,
    ) -> Result<GeneratedGuide, GenerateError> {
        outline.validate().map_err(GenerateError::InvalidOutline)?;

        let request = build_request(&build_prompt(outline), self.config.thinking_budget);
        let url = self.config.endpoint();
        let topics = outline.filled_topics().count();
        info!(model = %self.config.model, topics, "requesting guide");
        debug!(%url, "POST generateContent");

        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "generateContent request failed");
                GenerateError::Request(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(GenerateError::Request)?;
        if !status.is_success() {
            let err = GenerateError::http_status(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "generateContent returned an error");
            return Err(err);
        }

        let guide = parse_response(&body).inspect_err(|e| {
            warn!(error = %e, "could not use generateContent response");
        })?;
        info!(
            sections = guide.sections.len(),
            objectives = guide.learning_objectives.len(),
            references = guide.references.len(),
            elapsed = ?started.elapsed(),
            "guide generated"
        );
        Ok(guide)
    }
}

fn build_request(prompt: &str, thinking_budget: u32) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
            "thinkingConfig": { "thinkingBudget": thinking_budget }
        }
    })
}

/// Extract the guide from a `generateContent` response body.
fn parse_response(body: &str) -> Result<GeneratedGuide, GenerateError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        GenerateError::MalformedResponse(format!("response body is not JSON: {e}"))
    })?;

    if let Some(reason) = value
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(Value::as_str)
    {
        return Err(GenerateError::MalformedResponse(format!(
            "prompt was blocked: {reason}"
        )));
    }

    let candidate = value
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .ok_or_else(|| GenerateError::MalformedResponse("response has no candidates".into()))?;

    let text: String = candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let finish = candidate
            .get("finishReason")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        return Err(GenerateError::MalformedResponse(format!(
            "response contained no text (finish reason: {finish})"
        )));
    }

    GeneratedGuide::from_json(&text)
}
