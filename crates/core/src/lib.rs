#![forbid(unsafe_code)]

pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod session;
pub mod time;

pub use error::Error;
pub use grading::{GradingError, QuizAttempt};
pub use parser::{ParseError, parse_generation};
pub use session::{GenerationFailure, SessionPhase, SessionStateError, StudySession};
pub use time::Clock;
