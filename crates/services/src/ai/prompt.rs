use study_core::model::Syllabus;

/// Instruction sent to the generator for one syllabus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    question_count: u32,
    option_count: u32,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            question_count: 10,
            option_count: 4,
        }
    }
}

impl PromptTemplate {
    #[must_use]
    pub fn new(question_count: u32, option_count: u32) -> Self {
        Self {
            question_count,
            option_count,
        }
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn option_count(&self) -> u32 {
        self.option_count
    }

    #[must_use]
    pub fn render(&self, syllabus: &Syllabus) -> String {
        format!(
            "Given the following syllabus: \"{syllabus}\", generate a professional study plan \
             (summary/roadmap) and {questions} multiple-choice quiz questions with {options} \
             options each. Format the response as JSON: {{ plan: string, quizzes: [{{ question: \
             string, options: string[], answer: string }}] }}",
            questions = self.question_count,
            options = self.option_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_syllabus_and_counts() {
        let syllabus = Syllabus::new("Intro to Algorithms").unwrap();
        let prompt = PromptTemplate::default().render(&syllabus);
        assert!(prompt.starts_with("Given the following syllabus: \"Intro to Algorithms\""));
        assert!(prompt.contains("10 multiple-choice quiz questions with 4 options each"));
        assert!(prompt.ends_with(
            "{ plan: string, quizzes: [{ question: string, options: string[], answer: string }] }"
        ));
    }

    #[test]
    fn counts_are_configurable() {
        let syllabus = Syllabus::new("Graphs").unwrap();
        let prompt = PromptTemplate::new(3, 5).render(&syllabus);
        assert!(prompt.contains("3 multiple-choice quiz questions with 5 options each"));
    }
}
