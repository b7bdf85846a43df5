//! Configuration file and environment resolution.
//!
//! ```toml
//! [gemini]
//! api_key = "..."          # else GEMINI_API_KEY, then API_KEY
//! base_url = "..."         # GEMINI_BASE_URL overrides
//! model = "gemini-2.5-flash"
//! thinking_budget = 0
//! timeout_secs = 120
//!
//! [render]
//! protect_code_blocks = false
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Options;
use crate::client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT, GeminiConfig};
use crate::error::{ConfigError, GenerateError};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "eduguide.toml";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Older variable name, still honoured after [`API_KEY_ENV`].
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiSettings,
    pub render: Options,
}

/// The `[gemini]` section. Unset values fall back to the environment or the
/// client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub thinking_budget: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve client settings against the process environment.
    pub fn gemini_config(&self) -> Result<GeminiConfig, GenerateError> {
        self.gemini_config_with(|name| std::env::var(name).ok())
    }

    /// Resolve client settings, reading variables through `env`.
    pub fn gemini_config_with<F>(&self, env: F) -> Result<GeminiConfig, GenerateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = &self.gemini;
        let api_key = resolve_api_key(settings.api_key.as_deref(), &env)?;
        let base_url = resolve_base_url(settings.base_url.as_deref(), &env)?;
        let model = non_empty(settings.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
            .to_owned();
        let timeout = settings
            .timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(GeminiConfig {
            api_key,
            base_url,
            model,
            thinking_budget: settings.thinking_budget.unwrap_or(0),
            timeout,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// API key precedence: config, then `GEMINI_API_KEY`, then `API_KEY`.
fn resolve_api_key<F>(config_key: Option<&str>, env: &F) -> Result<String, GenerateError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = non_empty(config_key) {
        return Ok(key.to_owned());
    }
    [API_KEY_ENV, LEGACY_API_KEY_ENV]
        .into_iter()
        .find_map(|name| env(name).filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_owned())
        .ok_or(GenerateError::MissingApiKey)
}

/// Base URL precedence: `GEMINI_BASE_URL`, then config, then the default.
fn resolve_base_url<F>(config_url: Option<&str>, env: &F) -> Result<String, GenerateError>
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = env(BASE_URL_ENV);
    let chosen = non_empty(from_env.as_deref()).or_else(|| non_empty(config_url));
    match chosen {
        Some(url) => {
            validate_url(url)?;
            Ok(url.trim_end_matches('/').to_owned())
        }
        None => Ok(DEFAULT_BASE_URL.to_owned()),
    }
}

fn validate_url(url: &str) -> Result<(), GenerateError> {
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|source| GenerateError::InvalidBaseUrl {
            url: url.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn with_key(key: &str) -> Config {
        Config {
            gemini: GeminiSettings {
                api_key: Some(key.to_owned()),
                ..GeminiSettings::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_parse_sections() {
        let config: Config = toml::from_str(
            r#"
            [gemini]
            model = "gemini-2.5-pro"
            timeout_secs = 30

            [render]
            protect_code_blocks = true
            "#,
        )
        .unwrap();
        assert_eq!(config.gemini.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.gemini.timeout_secs, Some(30));
        assert!(config.render.protect_code_blocks);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.render.protect_code_blocks);
    }

    #[test]
    fn test_defaults_applied() {
        let resolved = with_key("k").gemini_config_with(env(&[])).unwrap();
        assert_eq!(resolved.api_key, "k");
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.model, DEFAULT_MODEL);
        assert_eq!(resolved.thinking_budget, 0);
        assert_eq!(resolved.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_key_wins_over_env() {
        let resolved = with_key("from-config")
            .gemini_config_with(env(&[(API_KEY_ENV, "from-env")]))
            .unwrap();
        assert_eq!(resolved.api_key, "from-config");
    }

    #[test]
    fn test_env_key_precedence() {
        let config = Config::default();
        let resolved = config
            .gemini_config_with(env(&[(API_KEY_ENV, "new"), (LEGACY_API_KEY_ENV, "old")]))
            .unwrap();
        assert_eq!(resolved.api_key, "new");

        let resolved = config
            .gemini_config_with(env(&[(LEGACY_API_KEY_ENV, "old")]))
            .unwrap();
        assert_eq!(resolved.api_key, "old");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let err = with_key("  ")
            .gemini_config_with(env(&[(API_KEY_ENV, " ")]))
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingApiKey));
    }

    #[test]
    fn test_env_base_url_overrides_config() {
        let mut config = with_key("k");
        config.gemini.base_url = Some("http://config.example".into());
        let resolved = config
            .gemini_config_with(env(&[(BASE_URL_ENV, "http://localhost:8080/v1beta/")]))
            .unwrap();
        assert_eq!(resolved.base_url, "http://localhost:8080/v1beta");
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = with_key("k");
        config.gemini.base_url = Some("not a url".into());
        let err = config.gemini_config_with(env(&[])).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidBaseUrl { .. }));
    }
}
