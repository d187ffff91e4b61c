//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use study_core::{GenerationFailure, ParseError, SessionStateError};

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {raw}")]
    InvalidUrl { name: &'static str, raw: String },
    #[error("{name} is not a valid number: {raw}")]
    InvalidNumber { name: &'static str, raw: String },
}

/// Errors emitted by a `TextGenerator` or `StudyPlanService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generation is not configured")]
    Disabled,
    #[error("generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GenerationError {
    /// Collapse into the failure kept by the session state.
    #[must_use]
    pub fn into_failure(self) -> GenerationFailure {
        match self {
            GenerationError::Parse(err) => GenerationFailure::Parse(err),
            other => GenerationFailure::Network(other.to_string()),
        }
    }
}

/// Errors emitted by `QuizCatalogClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizListError {
    #[error("quiz listing rejected: {0}")]
    Rejected(String),
    #[error("quiz listing failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("quiz listing could not be decoded: {0}")]
    Decode(serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `HistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by `StudyWorkflow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error(transparent)]
    Session(#[from] SessionStateError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
