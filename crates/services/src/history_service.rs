use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use storage::repository::KeyValueRepository;
use study_core::model::SavedSession;

use crate::error::HistoryError;

/// Key the history list lives under, shared with the browser app's local store.
pub const HISTORY_KEY: &str = "studyai_saved";

/// Append-only, most-recent-first log of generation cycles.
///
/// The whole list is stored as one JSON array under a single key. A value
/// that is not a JSON array reads as an empty history; individual entries
/// that do not decode are skipped on read but kept on write.
#[derive(Clone)]
pub struct HistoryService {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
}

impl HistoryService {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self::with_key(repo, HISTORY_KEY)
    }

    #[must_use]
    pub fn with_key(repo: Arc<dyn KeyValueRepository>, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(storage::repository::InMemoryRepository::new()))
    }

    /// Prepend `session` to the stored history.
    ///
    /// Returns the number of stored entries afterwards. Repeated saves of the
    /// same plan produce separate entries.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be read or written.
    pub async fn save(&self, session: &SavedSession) -> Result<usize, HistoryError> {
        let mut entries = self.load_raw().await?;
        entries.insert(0, serde_json::to_value(session)?);

        let encoded = serde_json::to_string(&entries)?;
        self.repo.put(&self.key, &encoded).await?;
        debug!(entries = entries.len(), "history saved");
        Ok(entries.len())
    }

    /// Every saved session, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` if the store cannot be read.
    pub async fn list(&self) -> Result<Vec<SavedSession>, HistoryError> {
        let entries = self.load_raw().await?;
        let total = entries.len();
        let sessions: Vec<SavedSession> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if sessions.len() < total {
            warn!(
                skipped = total - sessions.len(),
                "skipping undecodable history entries"
            );
        }
        Ok(sessions)
    }

    async fn load_raw(&self) -> Result<Vec<Value>, HistoryError> {
        let Some(raw) = self.repo.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) | Err(_) => {
                warn!(key = %self.key, "stored history is corrupt; starting fresh");
                Ok(Vec::new())
            }
        }
    }
}
