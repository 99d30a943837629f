//! Processed-request history, newest first.
//!
//! Persisted as one JSON array under the `history` key. The dispatch core
//! never writes here on its own; the facade records entries after a
//! successful `process`.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::storage::KeyValueStore;
use crate::types::HistoryEntry;

const HISTORY_KEY: &str = "history";

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self {
            store,
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// All entries, newest first. A corrupt blob reads as empty.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        let Some(raw) = self.store.get(HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(error = %e, "History is corrupt, starting over");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        self.store
            .set(HISTORY_KEY, serde_json::to_string(entries)?)
            .await
    }

    /// Prepend an entry, evicting the oldest beyond the limit.
    pub async fn record(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.list().await?;
        entries.insert(0, entry);
        entries.truncate(self.limit);
        debug!(count = entries.len(), "History entry recorded");
        self.save(&entries).await
    }

    /// Remove the entry at `index` (0 = newest). Out of range is a no-op.
    pub async fn delete(&self, index: usize) -> Result<bool> {
        let mut entries = self.list().await?;
        if index >= entries.len() {
            return Ok(false);
        }
        entries.remove(index);
        self.save(&entries).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY).await
    }
}
