use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::grading::{GradingError, QuizAttempt};
use crate::model::{GenerationResult, SavedSession, ScoreSummary, Syllabus};
use crate::parser::{DECODE_FAILURE_MESSAGE, ParseError};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("a plan is already active; start a new plan first")]
    PlanActive,

    #[error("operation not available while {phase:?}")]
    NotReady { phase: SessionPhase },

    #[error(transparent)]
    Grading(#[from] GradingError),
}

/// Why a generation cycle produced no plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerationFailure {
    #[error("generation request failed: {0}")]
    Network(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GenerationFailure {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationFailure::Network(_) => DECODE_FAILURE_MESSAGE,
            GenerationFailure::Parse(err) => err.user_message(),
        }
    }
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// Discriminant of `StudySession`, handy for logging and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Generating,
    Failed,
    PlanReady,
    Submitted,
}

/// The whole study workflow as one value.
///
/// Every transition replaces the state wholesale, so restarting never has to
/// reset individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StudySession {
    #[default]
    Idle,
    Generating {
        syllabus: Syllabus,
    },
    Failed {
        syllabus: Syllabus,
        failure: GenerationFailure,
    },
    PlanReady {
        syllabus: Syllabus,
        result: GenerationResult,
        attempt: QuizAttempt,
    },
    Submitted {
        syllabus: Syllabus,
        result: GenerationResult,
        attempt: QuizAttempt,
        score: ScoreSummary,
    },
}

impl StudySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self {
            StudySession::Idle => SessionPhase::Idle,
            StudySession::Generating { .. } => SessionPhase::Generating,
            StudySession::Failed { .. } => SessionPhase::Failed,
            StudySession::PlanReady { .. } => SessionPhase::PlanReady,
            StudySession::Submitted { .. } => SessionPhase::Submitted,
        }
    }

    #[must_use]
    pub fn syllabus(&self) -> Option<&Syllabus> {
        match self {
            StudySession::Idle => None,
            StudySession::Generating { syllabus }
            | StudySession::Failed { syllabus, .. }
            | StudySession::PlanReady { syllabus, .. }
            | StudySession::Submitted { syllabus, .. } => Some(syllabus),
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            StudySession::PlanReady { result, .. } | StudySession::Submitted { result, .. } => {
                Some(result)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn attempt(&self) -> Option<&QuizAttempt> {
        match self {
            StudySession::PlanReady { attempt, .. } | StudySession::Submitted { attempt, .. } => {
                Some(attempt)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn score(&self) -> Option<ScoreSummary> {
        match self {
            StudySession::Submitted { score, .. } => Some(*score),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            StudySession::Failed { failure, .. } => Some(failure.user_message()),
            _ => None,
        }
    }

    //
    // ─── TRANSITIONS ──────────────────────────────────────────────────────────
    //

    /// Enter `Generating` for `syllabus`.
    ///
    /// A second call while already generating is accepted; whichever
    /// response completes last wins.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::PlanActive` while a plan is shown.
    pub fn begin_generation(&mut self, syllabus: Syllabus) -> Result<(), SessionStateError> {
        match self {
            StudySession::PlanReady { .. } | StudySession::Submitted { .. } => {
                Err(SessionStateError::PlanActive)
            }
            _ => {
                *self = StudySession::Generating { syllabus };
                Ok(())
            }
        }
    }

    /// Apply the outcome of a generation request.
    ///
    /// Replaces any unanswered plan wholesale and resets the answers. The
    /// outcome is dropped (returning `false`) after a reset or a submission.
    pub fn complete_generation(
        &mut self,
        outcome: Result<GenerationResult, GenerationFailure>,
    ) -> bool {
        let syllabus = match self {
            StudySession::Generating { syllabus }
            | StudySession::Failed { syllabus, .. }
            | StudySession::PlanReady { syllabus, .. } => syllabus.clone(),
            StudySession::Idle | StudySession::Submitted { .. } => return false,
        };

        *self = match outcome {
            Ok(result) => {
                let attempt = QuizAttempt::new(&result.quizzes);
                StudySession::PlanReady {
                    syllabus,
                    result,
                    attempt,
                }
            }
            Err(failure) => StudySession::Failed { syllabus, failure },
        };
        true
    }

    /// # Errors
    ///
    /// Returns `SessionStateError::NotReady` without a plan, or a grading error.
    pub fn select_option(&mut self, index: usize, option: usize) -> Result<bool, SessionStateError> {
        match self {
            StudySession::PlanReady { attempt, .. } => Ok(attempt.select_option(index, option)?),
            StudySession::Submitted { .. } => Ok(false),
            _ => Err(self.not_ready()),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionStateError::NotReady` without a plan, or a grading error.
    pub fn check_answer(&mut self, index: usize) -> Result<bool, SessionStateError> {
        match self {
            StudySession::PlanReady { attempt, .. } | StudySession::Submitted { attempt, .. } => {
                Ok(attempt.check_answer(index)?)
            }
            _ => Err(self.not_ready()),
        }
    }

    /// Grade the whole quiz and move to `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Grading` with `IncompleteAnswers` or
    /// `AlreadySubmitted`, or `NotReady` without a plan. The state is left
    /// untouched on error.
    pub fn submit_all(&mut self) -> Result<ScoreSummary, SessionStateError> {
        let StudySession::PlanReady { attempt, .. } = self else {
            return match self {
                StudySession::Submitted { .. } => Err(GradingError::AlreadySubmitted.into()),
                _ => Err(self.not_ready()),
            };
        };
        let score = attempt.submit_all()?;

        if let StudySession::PlanReady {
            syllabus,
            result,
            attempt,
        } = std::mem::take(self)
        {
            *self = StudySession::Submitted {
                syllabus,
                result,
                attempt,
                score,
            };
        }
        Ok(score)
    }

    /// Discard everything and return to `Idle`.
    pub fn new_plan(&mut self) {
        *self = StudySession::Idle;
    }

    /// History entry for the current plan, with the score once submitted.
    ///
    /// `None` unless a plan with at least one question is present.
    #[must_use]
    pub fn snapshot(&self, date: DateTime<Utc>) -> Option<SavedSession> {
        let (syllabus, result, score) = match self {
            StudySession::PlanReady {
                syllabus, result, ..
            } => (syllabus, result, None),
            StudySession::Submitted {
                syllabus,
                result,
                score,
                ..
            } => (syllabus, result, Some(*score)),
            _ => return None,
        };
        result
            .is_saveable()
            .then(|| SavedSession::new(syllabus.clone(), result, date, score))
    }

    fn not_ready(&self) -> SessionStateError {
        SessionStateError::NotReady {
            phase: self.phase(),
        }
    }
}
