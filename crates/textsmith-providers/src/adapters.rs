//! Route → adapter table.
//!
//! Built once from config with a shared HTTP client. Tests swap individual
//! entries for adapters pointed at a mock server.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use textsmith_core::config::schema::{DispatchConfig, ProvidersConfig};
use textsmith_core::types::{Provider, Route};

use crate::claude::ClaudeAdapter;
use crate::cohere::CohereAdapter;
use crate::custom::CustomAdapter;
use crate::gemini::GeminiAdapter;
use crate::openai_compat::ChatCompletionsAdapter;
use crate::policy::{create_http_client, RetryPolicy};
use crate::pollinations::FreeAdapter;
use crate::traits::Adapter;

#[derive(Clone, Default)]
pub struct AdapterSet {
    adapters: HashMap<Route, Arc<dyn Adapter>>,
}

impl std::fmt::Debug for AdapterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<String> = self.adapters.keys().map(|r| r.to_string()).collect();
        routes.sort();
        f.debug_struct("AdapterSet").field("routes", &routes).finish()
    }
}

impl AdapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One adapter per route. Free and Groq retry 503s; the rest never retry.
    pub fn from_config(
        providers: &ProvidersConfig,
        dispatch: &DispatchConfig,
    ) -> anyhow::Result<Self> {
        let client = create_http_client(Duration::from_secs(dispatch.timeout_secs))?;
        let retrying = RetryPolicy::on_unavailable(
            dispatch.max_retries,
            Duration::from_millis(dispatch.retry_delay_ms),
        );

        let set = Self::new()
            .with(FreeAdapter::new(client.clone(), providers.free.clone(), retrying.clone()))
            .with(ChatCompletionsAdapter::new(
                Provider::Groq,
                client.clone(),
                providers.groq.clone(),
                retrying,
            ))
            .with(ChatCompletionsAdapter::new(
                Provider::OpenAi,
                client.clone(),
                providers.openai.clone(),
                RetryPolicy::none(),
            ))
            .with(ClaudeAdapter::new(client.clone(), providers.claude.clone(), RetryPolicy::none()))
            .with(GeminiAdapter::new(client.clone(), providers.gemini.clone(), RetryPolicy::none()))
            .with(CohereAdapter::new(client.clone(), providers.cohere.clone(), RetryPolicy::none()))
            .with(CustomAdapter::new(client, providers.custom.clone(), RetryPolicy::none()));

        debug!(adapters = set.len(), timeout_secs = dispatch.timeout_secs, "Adapters ready");
        Ok(set)
    }

    /// Register (or replace) the adapter for its own route.
    pub fn insert(&mut self, adapter: Arc<dyn Adapter>) {
        self.adapters.insert(adapter.route(), adapter);
    }

    pub fn with(mut self, adapter: impl Adapter + 'static) -> Self {
        self.insert(Arc::new(adapter));
        self
    }

    pub fn get(&self, route: Route) -> Option<Arc<dyn Adapter>> {
        self.adapters.get(&route).cloned()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
