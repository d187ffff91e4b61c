use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyllabusError {
    #[error("syllabus is empty")]
    Empty,
}

/// Free-text course description used as generation input.
///
/// The text is kept verbatim; only blank input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Syllabus(String);

impl Syllabus {
    /// Create a syllabus from user input.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::Empty` if the text is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SyllabusError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(SyllabusError::Empty);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Syllabus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Syllabus::new("   \n\t"), Err(SyllabusError::Empty));
    }

    #[test]
    fn keeps_text_verbatim() {
        let syllabus = Syllabus::new("  Intro to Algorithms ").unwrap();
        assert_eq!(syllabus.as_str(), "  Intro to Algorithms ");
    }
}
