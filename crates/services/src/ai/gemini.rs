use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::TextGenerator;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;

/// `generateContent` client for Gemini-style endpoints.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl GeminiClient {
    /// Build a client; `None` yields a disabled client.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Http` if the HTTP client cannot be built.
    pub fn new(config: Option<GeneratorConfig>) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.as_ref().and_then(|c| c.timeout) {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    fn endpoint(config: &GeneratorConfig) -> String {
        format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;

        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(Self::endpoint(config))
            .query(&[("key", config.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: Value = response.json().await?;
        let text = candidate_text(&body);
        debug!(model = %config.model, chars = text.len(), "generation response received");
        Ok(text)
    }
}

/// `candidates[0].content.parts[0].text`, or `""` when any link is missing.
fn candidate_text(body: &Value) -> String {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_first_candidate_text() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        });
        assert_eq!(candidate_text(&body), "first");
    }

    #[test]
    fn missing_links_fall_back_to_empty() {
        assert_eq!(candidate_text(&json!({})), "");
        assert_eq!(candidate_text(&json!({ "candidates": [] })), "");
        assert_eq!(candidate_text(&json!({ "candidates": [{ "content": {} }] })), "");
        assert_eq!(
            candidate_text(&json!({ "candidates": [{ "content": { "parts": [{ "text": 7 }] } }] })),
            ""
        );
    }

    #[test]
    fn request_body_matches_wire_shape() {
        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn endpoint_includes_model_action() {
        let config = GeneratorConfig::new("https://example.test/v1beta/", "k").with_model("m1");
        assert_eq!(
            GeminiClient::endpoint(&config),
            "https://example.test/v1beta/models/m1:generateContent"
        );
    }

    #[tokio::test]
    async fn disabled_client_refuses() {
        let client = GeminiClient::new(None).unwrap();
        assert!(!client.enabled());
        assert!(matches!(
            client.generate("p").await,
            Err(GenerationError::Disabled)
        ));
    }
}
