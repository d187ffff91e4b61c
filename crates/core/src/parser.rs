//! Extraction of a study plan and quiz list from free-form generator output.
//!
//! Generators wrap the requested JSON in prose, code fences, or both. Rather
//! than matching the first `{` to the last `}`, the scanner walks each
//! candidate opening brace and finds its syntactically balanced closing brace,
//! skipping braces inside string literals. The first balanced object that
//! carries a `plan` or `quizzes` field is decoded.

use serde_json::Value;
use thiserror::Error;

use crate::model::GenerationResult;

/// Shown when the output holds no JSON object at all.
pub const NO_PAYLOAD_MESSAGE: &str = "Could not parse plan. Please try again.";

/// Shown when an object was found but could not be decoded.
pub const DECODE_FAILURE_MESSAGE: &str = "Error generating plan. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("no JSON object found in generated text")]
    NoPayload,

    #[error("generated JSON could not be decoded: {0}")]
    Decode(String),
}

impl ParseError {
    /// Message suitable for showing in place of the plan.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ParseError::NoPayload => NO_PAYLOAD_MESSAGE,
            ParseError::Decode(_) => DECODE_FAILURE_MESSAGE,
        }
    }
}

/// Decode the first embedded `{ plan, quizzes }` object in `text`.
///
/// # Errors
///
/// Returns `ParseError::NoPayload` if `text` has no balanced `{ ... }` span,
/// or `ParseError::Decode` if spans exist but none decodes into a plan.
pub fn parse_generation(text: &str) -> Result<GenerationResult, ParseError> {
    let mut first_error: Option<String> = None;

    for span in balanced_objects(text) {
        match decode_span(span) {
            Ok(Some(result)) => return Ok(result),
            Ok(None) => {
                first_error.get_or_insert_with(|| "object has no plan or quizzes".to_string());
            }
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    Err(first_error.map_or(ParseError::NoPayload, ParseError::Decode))
}

/// First syntactically balanced `{ ... }` span in `text`, if any.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    balanced_objects(text).next()
}

fn decode_span(span: &str) -> Result<Option<GenerationResult>, String> {
    let value: Value = serde_json::from_str(span).map_err(|e| e.to_string())?;
    let Value::Object(map) = &value else {
        return Ok(None);
    };
    if !map.contains_key("plan") && !map.contains_key("quizzes") {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Every balanced object span, ordered by the position of its opening brace.
fn balanced_objects(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .filter(|(_, ch)| *ch == '{')
        .filter_map(move |(start, _)| {
            balanced_end(&text[start..]).map(|len| &text[start..start + len])
        })
}

/// Byte length of the balanced object starting at `text[0] == '{'`.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"Here is your plan: {"plan":"Study sorting and graphs","quizzes":[{"question":"What is O(n log n)?","options":["Merge sort","Bubble sort","Linear search","None"],"answer":"Merge sort"}]}"#;

    #[test]
    fn extracts_plan_from_prose() {
        let result = parse_generation(SAMPLE).unwrap();
        assert_eq!(result.plan, "Study sorting and graphs");
        assert_eq!(result.quizzes.len(), 1);
        assert_eq!(result.quizzes[0].answer, "Merge sort");
        assert_eq!(result.quizzes[0].options.len(), 4);
    }

    #[test]
    fn handles_code_fences_and_trailing_text() {
        let text = "```json\n{\"plan\":\"P\",\"quizzes\":[]}\n```\nGood luck {student}!";
        let result = parse_generation(text).unwrap();
        assert_eq!(result, GenerationResult::new("P", Vec::new()));
    }

    #[test]
    fn skips_prose_braces_before_payload() {
        let text = r#"Use {curly} notation. {"plan":"Real plan","quizzes":[]}"#;
        assert_eq!(parse_generation(text).unwrap().plan, "Real plan");
    }

    #[test]
    fn braces_inside_strings_do_not_unbalance() {
        let text = r#"{"plan":"Sets like {1, 2} and \"}\" chars","quizzes":[]}"#;
        assert_eq!(
            parse_generation(text).unwrap().plan,
            r#"Sets like {1, 2} and "}" chars"#
        );
    }

    #[test]
    fn no_braces_is_no_payload() {
        let err = parse_generation("Sorry, I cannot help with that.").unwrap_err();
        assert_eq!(err, ParseError::NoPayload);
        assert_eq!(err.user_message(), NO_PAYLOAD_MESSAGE);
    }

    #[test]
    fn unclosed_brace_is_no_payload() {
        assert_eq!(
            parse_generation(r#"{"plan":"cut off"#),
            Err(ParseError::NoPayload)
        );
    }

    #[test]
    fn malformed_json_is_decode_failure() {
        let err = parse_generation(r#"Plan: {plan: 'single quotes', quizzes: []}"#).unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)));
        assert_eq!(err.user_message(), DECODE_FAILURE_MESSAGE);
    }

    #[test]
    fn wrong_field_type_is_decode_failure() {
        let err = parse_generation(r#"{"plan":"P","quizzes":"none"}"#).unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)));
    }

    #[test]
    fn numeric_options_and_answer_are_kept_as_text() {
        let text = r#"{"plan":"Arithmetic","quizzes":[{"question":"2 + 2?","options":[3,4,5,6],"answer":4}]}"#;
        let result = parse_generation(text).unwrap();
        assert_eq!(result.quizzes[0].options, ["3", "4", "5", "6"]);
        assert_eq!(result.quizzes[0].answer, "4");
        assert!(result.quizzes[0].is_correct_choice(1));
    }

    #[test]
    fn plan_given_as_lines_is_joined() {
        let text = r#"Plan: {"plan":["Week 1: arrays","Week 2: graphs"],"quizzes":[]}"#;
        assert_eq!(
            parse_generation(text).unwrap().plan,
            "Week 1: arrays\nWeek 2: graphs"
        );
    }

    #[test]
    fn extract_returns_first_balanced_span() {
        assert_eq!(extract_json_object("a {b {c}} d {e}"), Some("{b {c}}"));
        assert_eq!(extract_json_object("no object"), None);
    }
}
