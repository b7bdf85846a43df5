//! Error types for guide generation and configuration.
//!
//! Rendering never fails and has no error type.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Message shown when the upstream response cannot be turned into a guide.
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "The AI returned an invalid format. Please try refining your topics or generating again.";

/// Message shown for every other upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str =
    "Failed to generate content from Gemini API. Please check your API key and network connection.";

/// Errors from generating a guide.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The outline failed validation; no request was sent.
    #[error("invalid course outline: {0}")]
    InvalidOutline(String),

    /// No API key in the config file or the environment.
    #[error("no API key available; set GEMINI_API_KEY or api_key in [gemini]")]
    MissingApiKey,

    #[error("invalid Gemini base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport failure: connect, timeout, or reading the body.
    #[error("request failed: {}", describe_request_error(.0))]
    Request(#[source] reqwest::Error),

    /// Non-success HTTP status from the API.
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The API answered, but not with a usable guide.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl GenerateError {
    /// Build an HTTP status error, preferring the API's own `error.message`.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("error")?
                    .get("message")?
                    .as_str()
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| {
                let body = body.trim();
                if body.is_empty() {
                    "empty response body".to_owned()
                } else {
                    body.to_owned()
                }
            });
        Self::HttpStatus { status, message }
    }

    /// Whether this is the malformed-upstream-response kind.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Human-readable message for end users.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidOutline(reason) => {
                format!("Please complete the course outline: {reason}.")
            }
            Self::MissingApiKey => {
                "No Gemini API key found. Set GEMINI_API_KEY or add api_key to the [gemini] section of the config file."
                    .to_owned()
            }
            Self::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_owned(),
            Self::InvalidBaseUrl { .. } | Self::Request(_) | Self::HttpStatus { .. } => {
                UPSTREAM_FAILURE_MESSAGE.to_owned()
            }
        }
    }
}

fn describe_request_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        format!("network error: {e}")
    }
}

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
