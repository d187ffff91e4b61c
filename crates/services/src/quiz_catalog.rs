use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use study_core::model::QuizQuestion;

use crate::config::CatalogConfig;
use crate::error::QuizListError;

/// Path of the quiz listing below the backend's versioned prefix.
pub const QUIZ_LIST_PATH: &str = "/api/v1/quizzes";

/// Client for the authenticated quiz-listing endpoint.
#[derive(Clone)]
pub struct QuizCatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl QuizCatalogClient {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Fetch the published quizzes.
    ///
    /// # Errors
    ///
    /// Returns `QuizListError::Rejected` when the backend answers
    /// `success: false`, or an HTTP error when the call fails.
    pub async fn list_quizzes(&self) -> Result<Vec<QuizQuestion>, QuizListError> {
        let url = format!(
            "{}{QUIZ_LIST_PATH}",
            self.config.base_url.trim_end_matches('/')
        );
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match (
            serde_json::from_slice::<ListEnvelope>(&body),
            status.is_success(),
        ) {
            (Ok(envelope), _) if !envelope.success => Err(QuizListError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "request rejected".to_string()),
            )),
            (Ok(envelope), true) => Ok(envelope.data),
            (Err(err), true) => Err(QuizListError::Decode(err)),
            (_, false) => Err(QuizListError::HttpStatus(status)),
        }
    }

    /// Fetch the published quizzes, logging and returning an empty list on
    /// any failure.
    pub async fn load_or_empty(&self) -> Vec<QuizQuestion> {
        match self.list_quizzes().await {
            Ok(quizzes) => {
                info!(count = quizzes.len(), "quizzes loaded");
                quizzes
            }
            Err(err) => {
                warn!(error = %err, "could not load quizzes");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Vec<QuizQuestion>,
}
