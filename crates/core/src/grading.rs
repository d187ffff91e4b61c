use thiserror::Error;

use crate::model::{QuizQuestion, ScoreError, ScoreSummary};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GradingError {
    #[error("question {index} is out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option} is out of range for question {index} ({len} options)")]
    OptionOutOfRange {
        index: usize,
        option: usize,
        len: usize,
    },

    #[error("question {index} has no selected option")]
    NoSelection { index: usize },

    #[error("{unanswered} question(s) still unanswered")]
    IncompleteAnswers { unanswered: usize },

    #[error("quiz already submitted")]
    AlreadySubmitted,

    #[error("too many questions to score: {len}")]
    TooManyQuestions { len: usize },

    #[error(transparent)]
    Score(#[from] ScoreError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AnswerSlot {
    selected: Option<usize>,
    checked: bool,
    correct: Option<bool>,
}

/// Answer state for one generated quiz.
///
/// Each question moves `Unanswered -> Selected -> Checked`. Submitting the
/// whole quiz freezes every question regardless of where it stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    slots: Vec<AnswerSlot>,
    submitted: bool,
}

impl QuizAttempt {
    #[must_use]
    pub fn new(questions: &[QuizQuestion]) -> Self {
        Self {
            questions: questions.to_vec(),
            slots: vec![AnswerSlot::default(); questions.len()],
            submitted: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn selected_option(&self, index: usize) -> Option<usize> {
        self.slots.get(index).and_then(|slot| slot.selected)
    }

    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.checked)
    }

    /// Stored result of checking `index`, `None` until checked.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> Option<bool> {
        self.slots.get(index).and_then(|slot| slot.correct)
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.selected.is_none()).count()
    }

    /// Whether `submit_all` would succeed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitted && self.unanswered_count() == 0
    }

    /// Record the learner's choice for a question, replacing any earlier one.
    ///
    /// Returns `Ok(false)` without changing anything once the question is
    /// checked or the quiz is submitted.
    ///
    /// # Errors
    ///
    /// Returns `GradingError` if either index is out of range.
    pub fn select_option(&mut self, index: usize, option: usize) -> Result<bool, GradingError> {
        let question = self.question(index)?;
        let len = question.options.len();
        if option >= len {
            return Err(GradingError::OptionOutOfRange { index, option, len });
        }

        let frozen = self.submitted;
        let slot = &mut self.slots[index];
        if frozen || slot.checked {
            return Ok(false);
        }
        slot.selected = Some(option);
        Ok(true)
    }

    /// Grade a single question and remember the result.
    ///
    /// Idempotent: a checked question returns its stored result unchanged.
    ///
    /// # Errors
    ///
    /// Returns `GradingError::QuestionOutOfRange` for a bad index, or
    /// `GradingError::NoSelection` if nothing has been chosen yet.
    pub fn check_answer(&mut self, index: usize) -> Result<bool, GradingError> {
        let question = self.question(index)?;
        let slot = self.slots[index];
        if let Some(stored) = slot.correct.filter(|_| slot.checked) {
            return Ok(stored);
        }
        let selected = slot.selected.ok_or(GradingError::NoSelection { index })?;
        let correct = question.is_correct_choice(selected);
        if self.submitted {
            return Ok(correct);
        }

        self.slots[index] = AnswerSlot {
            checked: true,
            correct: Some(correct),
            ..slot
        };
        Ok(correct)
    }

    /// Grade every question and freeze the attempt.
    ///
    /// Each question is graded from its current selection whether or not it
    /// was checked individually.
    ///
    /// # Errors
    ///
    /// Returns `GradingError::IncompleteAnswers` if any question has no
    /// selection, or `GradingError::AlreadySubmitted` on a second call.
    pub fn submit_all(&mut self) -> Result<ScoreSummary, GradingError> {
        if self.submitted {
            return Err(GradingError::AlreadySubmitted);
        }
        let unanswered = self.unanswered_count();
        if unanswered > 0 {
            return Err(GradingError::IncompleteAnswers { unanswered });
        }

        let correct = self
            .questions
            .iter()
            .zip(&self.slots)
            .filter(|(question, slot)| {
                slot.selected
                    .is_some_and(|selected| question.is_correct_choice(selected))
            })
            .count();

        let len = self.questions.len();
        let total = u32::try_from(len).map_err(|_| GradingError::TooManyQuestions { len })?;
        let correct = u32::try_from(correct).map_err(|_| GradingError::TooManyQuestions { len })?;
        let score = ScoreSummary::from_counts(correct, total)?;

        self.submitted = true;
        Ok(score)
    }

    fn question(&self, index: usize) -> Result<&QuizQuestion, GradingError> {
        self.questions
            .get(index)
            .ok_or(GradingError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            })
    }
}
