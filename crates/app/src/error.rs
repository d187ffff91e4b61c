use thiserror::Error;

use services::{AppServicesError, ConfigError, WorkflowError};

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("generation is not configured; set STUDYAI_AI_API_KEY")]
    GenerationDisabled,
    #[error(transparent)]
    Domain(#[from] study_core::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Services(#[from] AppServicesError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
