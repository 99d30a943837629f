//! Free default service (Pollinations). No credential, plain-text replies.

use async_trait::async_trait;
use serde::Serialize;

use textsmith_core::cancel::CancelToken;
use textsmith_core::config::schema::FreeConfig;
use textsmith_core::error::{DispatchError, ErrorKind};
use textsmith_core::types::{Credentials, Route};

use crate::errors::{classify_status, ProviderId};
use crate::policy::{send_with_policy, RetryPolicy};
use crate::registry::FREE_PROVIDER;
use crate::traits::Adapter;

const ID: ProviderId = ProviderId {
    tag: "free",
    name: "Pollinations AI",
};

#[derive(Debug, Serialize)]
struct FreeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct FreeRequest<'a> {
    messages: [FreeMessage<'a>; 1],
    /// Fresh per attempt so the service does not serve a cached answer.
    seed: i64,
}

pub struct FreeAdapter {
    client: reqwest::Client,
    config: FreeConfig,
    policy: RetryPolicy,
}

impl FreeAdapter {
    pub fn new(client: reqwest::Client, config: FreeConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            config,
            policy,
        }
    }
}

/// The free service words its failures differently from paid providers.
fn classify_free(id: &ProviderId, status: u16, body: &str) -> DispatchError {
    match status {
        429 => DispatchError::new(
            ErrorKind::RateLimited,
            id.tag,
            "Too many requests to the free service. Wait a minute, or add your own API key.",
        ),
        400 => DispatchError::new(
            ErrorKind::BadRequest,
            id.tag,
            "The free service rejected the request. The text may be too long.",
        ),
        504 => DispatchError::new(
            ErrorKind::GatewayTimeout,
            id.tag,
            "The free service timed out. Try a shorter text.",
        ),
        s if s >= 500 => DispatchError::new(
            ErrorKind::ServiceUnavailable,
            id.tag,
            "The free service is temporarily unavailable. Try again later or add your own API key.",
        ),
        _ => classify_status(id, status, body),
    }
}

#[async_trait]
impl Adapter for FreeAdapter {
    fn route(&self) -> Route {
        Route::Free
    }

    fn label(&self) -> &str {
        FREE_PROVIDER.display_name
    }

    async fn invoke(
        &self,
        prompt: &str,
        _credentials: &Credentials,
        cancel: &CancelToken,
    ) -> Result<String, DispatchError> {
        let body = send_with_policy(&ID, &self.policy, classify_free, cancel, || {
            let request = FreeRequest {
                messages: [FreeMessage {
                    role: "user",
                    content: prompt,
                }],
                seed: chrono::Utc::now().timestamp_millis(),
            };
            self.client
                .post(&self.config.url)
                .query(&[("model", self.config.model.as_str())])
                .json(&request)
        })
        .await?;

        let text = body.trim();
        if text.is_empty() {
            return Err(DispatchError::unexpected_shape(ID.tag));
        }
        Ok(text.to_string())
    }
}
