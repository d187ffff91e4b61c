use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{GenerationResult, QuizQuestion, ScoreSummary, Syllabus, lenient};

/// One entry of the local study history.
///
/// Serialized with the field names the browser app uses, so its existing
/// histories stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    #[serde(deserialize_with = "lenient::lines")]
    pub plan: String,
    pub quizzes: Vec<QuizQuestion>,
    pub syllabus: Syllabus,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreSummary>,
}

impl SavedSession {
    #[must_use]
    pub fn new(
        syllabus: Syllabus,
        generation: &GenerationResult,
        date: DateTime<Utc>,
        result: Option<ScoreSummary>,
    ) -> Self {
        Self {
            plan: generation.plan.clone(),
            quizzes: generation.quizzes.clone(),
            syllabus,
            date,
            result,
        }
    }
}
