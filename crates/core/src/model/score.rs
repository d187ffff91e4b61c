use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("correct ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("correct ({correct}) + incorrect ({incorrect}) does not match total ({total})")]
    CountMismatch {
        correct: u32,
        incorrect: u32,
        total: u32,
    },

    #[error("percent ({percent}) does not match counts (expected {expected})")]
    PercentMismatch { percent: u32, expected: u32 },
}

/// Aggregate result of submitting a whole quiz.
///
/// Always built from complete counts; never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScoreRecord")]
pub struct ScoreSummary {
    correct: u32,
    incorrect: u32,
    total: u32,
    percent: u32,
}

#[derive(Deserialize)]
struct ScoreRecord {
    correct: u32,
    incorrect: u32,
    total: u32,
    percent: u32,
}

impl TryFrom<ScoreRecord> for ScoreSummary {
    type Error = ScoreError;

    fn try_from(record: ScoreRecord) -> Result<Self, Self::Error> {
        Self::from_persisted(
            record.correct,
            record.incorrect,
            record.total,
            record.percent,
        )
    }
}

impl ScoreSummary {
    /// Build a summary from the number of correct answers out of `total`.
    ///
    /// `percent` is `round(100 * correct / total)` with halves rounding up.
    /// An empty quiz scores 0%.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::CorrectExceedsTotal` if `correct > total`.
    pub fn from_counts(correct: u32, total: u32) -> Result<Self, ScoreError> {
        if correct > total {
            return Err(ScoreError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self {
            correct,
            incorrect: total - correct,
            total,
            percent: percent_of(correct, total),
        })
    }

    /// Rehydrate a summary from storage, checking that the counts agree.
    ///
    /// The stored `percent` is kept as written when it is within one point of
    /// the recomputed value.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` if the counts or the percentage are inconsistent.
    pub fn from_persisted(
        correct: u32,
        incorrect: u32,
        total: u32,
        percent: u32,
    ) -> Result<Self, ScoreError> {
        if correct.checked_add(incorrect) != Some(total) {
            return Err(ScoreError::CountMismatch {
                correct,
                incorrect,
                total,
            });
        }
        let expected = percent_of(correct, total);
        // floating-point rounding elsewhere can land one point off at halves
        if percent.abs_diff(expected) > 1 {
            return Err(ScoreError::PercentMismatch { percent, expected });
        }
        Ok(Self {
            correct,
            incorrect,
            total,
            percent,
        })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        self.percent
    }
}

fn percent_of(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct);
    let total = u64::from(total);
    // round-half-up of 100 * correct / total in integer arithmetic
    let rounded = (200 * correct + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_quiz_scores_zero() {
        let score = ScoreSummary::from_counts(0, 0).unwrap();
        assert_eq!(score.percent(), 0);
        assert_eq!(score.incorrect(), 0);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(ScoreSummary::from_counts(1, 8).unwrap().percent(), 13);
        assert_eq!(ScoreSummary::from_counts(1, 3).unwrap().percent(), 33);
        assert_eq!(ScoreSummary::from_counts(2, 3).unwrap().percent(), 67);
        assert_eq!(ScoreSummary::from_counts(7, 10).unwrap().percent(), 70);
    }

    #[test]
    fn rejects_more_correct_than_total() {
        assert_eq!(
            ScoreSummary::from_counts(3, 2),
            Err(ScoreError::CorrectExceedsTotal {
                correct: 3,
                total: 2
            })
        );
    }

    #[test]
    fn persisted_counts_must_agree() {
        assert!(matches!(
            ScoreSummary::from_persisted(2, 2, 5, 40),
            Err(ScoreError::CountMismatch { .. })
        ));
        assert!(matches!(
            ScoreSummary::from_persisted(2, 3, 5, 50),
            Err(ScoreError::PercentMismatch {
                percent: 50,
                expected: 40
            })
        ));
    }

    #[test]
    fn persisted_percent_tolerates_float_rounding() {
        let score = ScoreSummary::from_persisted(23, 17, 40, 57).unwrap();
        assert_eq!(score.percent(), 57);
        assert_eq!(ScoreSummary::from_counts(23, 40).unwrap().percent(), 58);

        let decoded: ScoreSummary =
            serde_json::from_str(r#"{"correct":46,"incorrect":34,"total":80,"percent":57}"#)
                .unwrap();
        assert_eq!(decoded.total(), 80);
        assert!(matches!(
            ScoreSummary::from_persisted(23, 17, 40, 56),
            Err(ScoreError::PercentMismatch { .. })
        ));
    }

    #[test]
    fn decodes_browser_store_shape() {
        let score: ScoreSummary =
            serde_json::from_str(r#"{"correct":9,"incorrect":1,"total":10,"percent":90}"#)
                .unwrap();
        assert_eq!(score, ScoreSummary::from_counts(9, 10).unwrap());

        let bad = serde_json::from_str::<ScoreSummary>(
            r#"{"correct":9,"incorrect":9,"total":10,"percent":90}"#,
        );
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn percent_matches_rounded_ratio(total in 1_u32..500, correct_seed in 0_u32..500) {
            let correct = correct_seed % (total + 1);
            let score = ScoreSummary::from_counts(correct, total).unwrap();
            let expected = (100.0 * f64::from(correct) / f64::from(total)).round();
            prop_assert_eq!(f64::from(score.percent()), expected);
            prop_assert_eq!(score.correct() + score.incorrect(), total);
        }
    }
}
