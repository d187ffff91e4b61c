use serde::{Deserialize, Serialize};

use crate::model::{QuizQuestion, lenient};

/// Plan and questions produced by one generation cycle.
///
/// Decoded verbatim from the generator output; a plan sent as a list of lines
/// is joined with newlines. A new result always replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, deserialize_with = "lenient::lines")]
    pub plan: String,
    #[serde(default)]
    pub quizzes: Vec<QuizQuestion>,
}

impl GenerationResult {
    #[must_use]
    pub fn new(plan: impl Into<String>, quizzes: Vec<QuizQuestion>) -> Self {
        Self {
            plan: plan.into(),
            quizzes,
        }
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quizzes.len()
    }

    /// A result worth saving has a plan and at least one question.
    #[must_use]
    pub fn is_saveable(&self) -> bool {
        !self.plan.is_empty() && !self.quizzes.is_empty()
    }
}
