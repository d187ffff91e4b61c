use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";

/// Connection settings for the generative-AI endpoint.
///
/// The API key is only ever read from the environment.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: DEFAULT_AI_MODEL.to_string(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Read `STUDYAI_AI_*` variables. `Ok(None)` when no API key is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL or timeout is malformed.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = non_empty_var("STUDYAI_AI_API_KEY") else {
            return Ok(None);
        };
        let base_url = validated_url(
            "STUDYAI_AI_BASE_URL",
            non_empty_var("STUDYAI_AI_BASE_URL").unwrap_or_else(|| DEFAULT_AI_BASE_URL.into()),
        )?;
        let model = non_empty_var("STUDYAI_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.into());
        let timeout = non_empty_var("STUDYAI_AI_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidNumber {
                        name: "STUDYAI_AI_TIMEOUT_SECS",
                        raw,
                    })
            })
            .transpose()?;

        Ok(Some(Self {
            base_url,
            api_key,
            model,
            timeout,
        }))
    }
}

/// Settings for the quiz-listing backend.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl CatalogConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    /// Read `STUDYAI_API_BASE_URL` and `STUDYAI_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the base URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = validated_url(
            "STUDYAI_API_BASE_URL",
            non_empty_var("STUDYAI_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into()),
        )?;
        Ok(Self {
            base_url,
            token: non_empty_var("STUDYAI_API_TOKEN"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Check `raw` parses as a URL and drop any trailing slash.
///
/// # Errors
///
/// Returns `ConfigError::InvalidUrl` if `raw` is not an absolute URL.
pub fn validated_url(name: &'static str, raw: String) -> Result<String, ConfigError> {
    if Url::parse(&raw).is_err() {
        return Err(ConfigError::InvalidUrl { name, raw });
    }
    Ok(raw.trim_end_matches('/').to_string())
}
