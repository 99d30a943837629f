//! Dispatch orchestrator — picks exactly one adapter per prompt.
//!
//! Resolution: active provider (preference, then credential scan) or the free
//! service when nothing resolves. A stored secret whose format belongs to a
//! different provider is routed to that provider instead and the result is
//! labelled "(auto-detected)". Failures propagate as-is; there is no
//! cross-provider fallback.

use std::sync::Arc;

use tracing::{debug, info, warn};

use textsmith_core::cancel::CancelToken;
use textsmith_core::error::DispatchError;
use textsmith_core::types::{Credentials, DispatchResult, Provider, Route};
use textsmith_core::vault::CredentialVault;
use textsmith_providers::adapters::AdapterSet;
use textsmith_providers::registry::{active_provider, detect, FREE_PROVIDER};

/// Which adapter a dispatch will use and under what label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub route: Route,
    /// The provider resolved from preference/scan, before auto-detection.
    pub declared: Option<Provider>,
    pub auto_detected: bool,
}

impl ResolvedRoute {
    fn free() -> Self {
        Self {
            route: Route::Free,
            declared: None,
            auto_detected: false,
        }
    }

    pub fn is_free(&self) -> bool {
        self.route == Route::Free
    }

    pub fn label(&self) -> String {
        match self.route {
            Route::Free => FREE_PROVIDER.display_name.to_string(),
            Route::Provider(p) if self.auto_detected => {
                format!("{} (auto-detected)", p.display_name())
            }
            Route::Provider(p) => p.display_name().to_string(),
        }
    }
}

pub struct Dispatcher {
    vault: Arc<CredentialVault>,
    adapters: AdapterSet,
}

impl Dispatcher {
    pub fn new(vault: Arc<CredentialVault>, adapters: AdapterSet) -> Self {
        Self { vault, adapters }
    }

    pub fn vault(&self) -> &Arc<CredentialVault> {
        &self.vault
    }

    /// Route for the current vault state, plus the credentials to send.
    async fn resolve(&self) -> Result<(ResolvedRoute, Credentials), DispatchError> {
        let Some(active) = active_provider(&self.vault).await else {
            return Ok((ResolvedRoute::free(), Credentials::anonymous()));
        };

        // The credential can vanish between resolution and this read.
        let credentials = self.vault.credentials(active).await.ok_or_else(|| {
            DispatchError::misconfigured(
                active.as_str(),
                format!("No API key stored for {}.", active.display_name()),
            )
        })?;

        let target = match detect(&credentials.secret) {
            Some(detected) if detected != active => {
                warn!(
                    declared = %active,
                    detected = %detected,
                    "API key belongs to another provider, routing to it"
                );
                detected
            }
            _ => active,
        };

        if target == Provider::Custom && credentials.endpoint.is_none() {
            return Err(DispatchError::misconfigured(
                target.as_str(),
                "Custom API endpoint is not set. Add an endpoint URL.",
            ));
        }

        Ok((
            ResolvedRoute {
                route: Route::Provider(target),
                declared: Some(active),
                auto_detected: target != active,
            },
            credentials,
        ))
    }

    /// Route the next dispatch would take, without sending anything.
    pub async fn preview_route(&self) -> Result<ResolvedRoute, DispatchError> {
        Ok(self.resolve().await?.0)
    }

    /// Send `prompt` to the resolved adapter.
    pub async fn dispatch(
        &self,
        prompt: &str,
        cancel: &CancelToken,
    ) -> Result<DispatchResult, DispatchError> {
        let (resolved, credentials) = self.resolve().await?;
        let adapter = self.adapters.get(resolved.route).ok_or_else(|| {
            DispatchError::misconfigured(
                resolved.route.to_string(),
                format!("No adapter registered for '{}'.", resolved.route),
            )
        })?;

        debug!(
            route = %resolved.route,
            auto_detected = resolved.auto_detected,
            prompt_chars = prompt.chars().count(),
            "Dispatching prompt"
        );

        let text = adapter.invoke(prompt, &credentials, cancel).await?;
        let provider_label = resolved.label();
        info!(provider = %provider_label, chars = text.chars().count(), "Dispatch succeeded");

        Ok(DispatchResult { text, provider_label })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
