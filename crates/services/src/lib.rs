#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod config;
pub mod error;
pub mod history_service;
pub mod quiz_catalog;
pub mod study_plan_service;
pub mod workflow;

pub use study_core::Clock;

pub use ai::{GeminiClient, PromptTemplate, TextGenerator};
pub use app_services::AppServices;
pub use config::{CatalogConfig, GeneratorConfig};
pub use error::{
    AppServicesError, ConfigError, GenerationError, HistoryError, QuizListError, WorkflowError,
};
pub use history_service::{HISTORY_KEY, HistoryService};
pub use quiz_catalog::QuizCatalogClient;
pub use study_plan_service::StudyPlanService;
pub use workflow::{StudyWorkflow, SubmitOutcome};
