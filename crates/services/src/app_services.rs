use std::sync::Arc;

use storage::repository::Storage;

use crate::ai::{GeminiClient, TextGenerator};
use crate::config::{CatalogConfig, GeneratorConfig};
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::quiz_catalog::QuizCatalogClient;
use crate::study_plan_service::StudyPlanService;
use crate::workflow::StudyWorkflow;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    generation_enabled: bool,
    plans: Arc<StudyPlanService>,
    history: Arc<HistoryService>,
    catalog: Arc<QuizCatalogClient>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or HTTP client
    /// setup fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        generator: Option<GeneratorConfig>,
        catalog: CatalogConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let client = GeminiClient::new(generator)?;
        let generation_enabled = client.enabled();
        let generator: Arc<dyn TextGenerator> = Arc::new(client);
        Ok(Self::from_parts(
            &storage,
            clock,
            generator,
            generation_enabled,
            catalog,
        ))
    }

    /// Build services from an existing storage and generator.
    #[must_use]
    pub fn from_parts(
        storage: &Storage,
        clock: Clock,
        generator: Arc<dyn TextGenerator>,
        generation_enabled: bool,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            clock,
            generation_enabled,
            plans: Arc::new(StudyPlanService::new(generator)),
            history: Arc::new(HistoryService::new(Arc::clone(&storage.kv))),
            catalog: Arc::new(QuizCatalogClient::new(catalog)),
        }
    }

    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuizCatalogClient> {
        Arc::clone(&self.catalog)
    }

    /// A fresh workflow in the `Idle` state.
    #[must_use]
    pub fn workflow(&self) -> StudyWorkflow {
        StudyWorkflow::new(
            self.clock,
            self.plans.as_ref().clone(),
            self.history.as_ref().clone(),
        )
    }
}
