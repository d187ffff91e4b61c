use std::sync::Arc;

use tracing::{debug, info, warn};

use study_core::model::{GenerationResult, Syllabus};
use study_core::parse_generation;

use crate::ai::{PromptTemplate, TextGenerator};
use crate::error::GenerationError;

/// Runs one generation cycle: prompt, call, parse.
#[derive(Clone)]
pub struct StudyPlanService {
    generator: Arc<dyn TextGenerator>,
    prompt: PromptTemplate,
}

impl StudyPlanService {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            prompt: PromptTemplate::default(),
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Generate a study plan and quiz for `syllabus`.
    ///
    /// The parsed content is returned as-is; counts and answers that do not
    /// match the request are logged, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the request fails or the response holds
    /// no decodable plan.
    pub async fn generate(&self, syllabus: &Syllabus) -> Result<GenerationResult, GenerationError> {
        let prompt = self.prompt.render(syllabus);
        debug!(prompt_chars = prompt.len(), "requesting study plan");

        let text = self.generator.generate(&prompt).await?;
        let result = parse_generation(&text)?;

        let expected = usize::try_from(self.prompt.question_count()).unwrap_or(usize::MAX);
        if result.quizzes.len() != expected {
            debug!(
                expected,
                received = result.quizzes.len(),
                "question count differs from request"
            );
        }
        for (index, question) in result.quizzes.iter().enumerate() {
            if !question.answer_in_options() {
                warn!(index, "generated answer is not among the options");
            }
        }

        info!(questions = result.quizzes.len(), "study plan generated");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use study_core::ParseError;

    struct CannedGenerator {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn parses_generator_output() {
        let generator = Arc::new(CannedGenerator::new(
            r#"Sure! {"plan":"Week 1: arrays","quizzes":[{"question":"Q","options":["a","b","c","d"],"answer":"b"}]}"#,
        ));
        let service = StudyPlanService::new(generator.clone());
        let syllabus = Syllabus::new("Data structures").unwrap();

        let result = service.generate(&syllabus).await.unwrap();
        assert_eq!(result.plan, "Week 1: arrays");
        assert_eq!(result.quizzes.len(), 1);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"Data structures\""));
    }

    #[tokio::test]
    async fn empty_output_is_no_payload() {
        let service = StudyPlanService::new(Arc::new(CannedGenerator::new("")));
        let syllabus = Syllabus::new("Anything").unwrap();
        assert!(matches!(
            service.generate(&syllabus).await,
            Err(GenerationError::Parse(ParseError::NoPayload))
        ));
    }

    #[tokio::test]
    async fn custom_prompt_is_used() {
        let generator = Arc::new(CannedGenerator::new(r#"{"plan":"P","quizzes":[]}"#));
        let service =
            StudyPlanService::new(generator.clone()).with_prompt(PromptTemplate::new(2, 3));
        service
            .generate(&Syllabus::new("Sets").unwrap())
            .await
            .unwrap();
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("2 multiple-choice quiz questions with 3 options each"));
    }
}
