use thiserror::Error;

use crate::grading::GradingError;
use crate::model::{ScoreError, SyllabusError};
use crate::parser::ParseError;
use crate::session::SessionStateError;

/// Umbrella error for callers that do not care which domain step failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Syllabus(#[from] SyllabusError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Grading(#[from] GradingError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Session(#[from] SessionStateError),
}
