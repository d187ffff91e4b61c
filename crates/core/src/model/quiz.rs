use serde::{Deserialize, Serialize};

use crate::model::lenient;

/// A single multiple-choice question as produced by the generator.
///
/// Nothing here is validated: `options` is expected to hold four entries and
/// `answer` is expected to equal one of them, but generated content routinely
/// breaks both. Missing fields decode as empty, which grades as incorrect.
/// Numeric or boolean options and answers decode to their text form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(default, deserialize_with = "lenient::text")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub answer: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        }
    }

    /// Option text at `index`, if any.
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Whether choosing `index` is correct.
    ///
    /// Correctness compares option text against `answer` by exact string
    /// equality; an index with no option is incorrect.
    #[must_use]
    pub fn is_correct_choice(&self, index: usize) -> bool {
        self.option(index).is_some_and(|text| text == self.answer)
    }

    /// Whether `answer` is one of the options.
    ///
    /// When this is false every choice grades incorrect. Informational only.
    #[must_use]
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|opt| *opt == self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorting_question(answer: &str) -> QuizQuestion {
        QuizQuestion::new(
            "What is O(n log n)?",
            ["Merge sort", "Bubble sort", "Linear search", "None"],
            answer,
        )
    }

    #[test]
    fn correctness_is_text_equality() {
        let q = sorting_question("Merge sort");
        assert!(q.is_correct_choice(0));
        assert!(!q.is_correct_choice(1));
        assert!(!q.is_correct_choice(9));
    }

    #[test]
    fn answer_outside_options_never_matches() {
        let q = sorting_question("Quick sort");
        assert!(!q.answer_in_options());
        assert!((0..4).all(|i| !q.is_correct_choice(i)));
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let q: QuizQuestion = serde_json::from_str(r#"{"question":"Q?"}"#).unwrap();
        assert!(q.options.is_empty());
        assert!(q.answer.is_empty());
        assert!(!q.is_correct_choice(0));
    }

    #[test]
    fn numeric_options_and_answer_grade_as_text() {
        let q: QuizQuestion =
            serde_json::from_str(r#"{"question":"2 + 2?","options":[3,4,5,6],"answer":4}"#)
                .unwrap();
        assert_eq!(q.options, ["3", "4", "5", "6"]);
        assert_eq!(q.answer, "4");
        assert!(q.is_correct_choice(1));
        assert!(!q.is_correct_choice(0));
    }

    #[test]
    fn nested_option_is_rejected() {
        let decoded = serde_json::from_str::<QuizQuestion>(
            r#"{"question":"Q","options":[{"text":"a"}],"answer":"a"}"#,
        );
        assert!(decoded.is_err());
    }
}
