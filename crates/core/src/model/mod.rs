mod generation;
mod lenient;
mod quiz;
mod saved;
mod score;
mod syllabus;

pub use generation::GenerationResult;
pub use quiz::QuizQuestion;
pub use saved::SavedSession;
pub use score::{ScoreError, ScoreSummary};
pub use syllabus::{Syllabus, SyllabusError};
