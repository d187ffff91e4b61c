use async_trait::async_trait;

use crate::error::GenerationError;

pub mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;
pub use prompt::PromptTemplate;

/// A text-completion backend: prompt in, raw generated text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the backend is unavailable or the
    /// request fails.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
