//! User-edited templates, stored as one JSON map under `custom_prompts`.
//!
//! An override replaces the localized default for its template id until it
//! is reset.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use textsmith_core::storage::KeyValueStore;
use textsmith_core::types::TemplateId;

const OVERRIDES_KEY: &str = "custom_prompts";

#[derive(Clone)]
pub struct TemplateOverrides {
    store: Arc<dyn KeyValueStore>,
}

impl TemplateOverrides {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Every override, keyed by template id.
    pub async fn list(&self) -> Result<BTreeMap<TemplateId, String>> {
        let Some(raw) = self.store.get(OVERRIDES_KEY).await? else {
            return Ok(BTreeMap::new());
        };
        let parsed: BTreeMap<String, String> = match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "Custom prompts are corrupt, ignoring them");
                return Ok(BTreeMap::new());
            }
        };
        Ok(parsed
            .into_iter()
            .filter_map(|(k, v)| k.parse().ok().map(|id| (id, v)))
            .collect())
    }

    pub async fn get(&self, id: TemplateId) -> Result<Option<String>> {
        Ok(self.list().await?.remove(&id))
    }

    /// Create or replace an override. A blank body is treated as a reset.
    pub async fn set(&self, id: TemplateId, body: &str) -> Result<()> {
        if body.trim().is_empty() {
            return self.reset(id).await;
        }
        let mut all = self.list().await?;
        all.insert(id, body.to_string());
        self.save(&all).await?;
        info!(template = %id, "Custom template saved");
        Ok(())
    }

    /// Drop the override so the default applies again.
    pub async fn reset(&self, id: TemplateId) -> Result<()> {
        let mut all = self.list().await?;
        if all.remove(&id).is_some() {
            self.save(&all).await?;
            info!(template = %id, "Custom template reset");
        }
        Ok(())
    }

    async fn save(&self, all: &BTreeMap<TemplateId, String>) -> Result<()> {
        if all.is_empty() {
            return self.store.remove(OVERRIDES_KEY).await;
        }
        let keyed: BTreeMap<&str, &String> = all.iter().map(|(k, v)| (k.as_str(), v)).collect();
        self.store
            .set(OVERRIDES_KEY, serde_json::to_string(&keyed)?)
            .await
    }
}
