//! Per-adapter retry policy and the shared send loop.
//!
//! Each call walks `Sending → Success | Retryable → Sending | Terminal`.
//! Only statuses listed in the policy are retryable; the request is rebuilt
//! for every attempt so adapters can refresh per-attempt fields (seeds).

use std::time::Duration;

use tracing::{debug, warn};

use textsmith_core::cancel::CancelToken;
use textsmith_core::error::DispatchError;

use crate::errors::{classify_transport, Classifier, ProviderId};

/// When (and how often) an adapter retries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first.
    pub max_retries: u32,
    pub delay: Duration,
    pub retry_on: &'static [u16],
}

impl RetryPolicy {
    /// Every failure is terminal.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
            retry_on: &[],
        }
    }

    /// Retry HTTP 503 up to `max_retries` times with a fixed `delay`.
    pub fn on_unavailable(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            retry_on: &[503],
        }
    }

    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_retries && self.retry_on.contains(&status)
    }
}

/// Build an HTTP client with the per-request timeout.
pub fn create_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))
}

/// Send with retries; returns the body of the first successful response.
pub async fn send_with_policy<F>(
    id: &ProviderId,
    policy: &RetryPolicy,
    classify: Classifier,
    cancel: &CancelToken,
    build: F,
) -> Result<String, DispatchError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;
    loop {
        if cancel.is_cancelled() {
            return Err(DispatchError::cancelled(id.tag));
        }

        debug!(provider = id.tag, attempt, "Sending request");
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(DispatchError::cancelled(id.tag)),
            result = build().send() => result.map_err(|e| classify_transport(id, e))?,
        };

        let status = response.status().as_u16();
        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(DispatchError::cancelled(id.tag)),
            result = response.text() => result.map_err(|e| classify_transport(id, e))?,
        };

        if (200..300).contains(&status) {
            debug!(provider = id.tag, status, bytes = body.len(), "Response received");
            return Ok(body);
        }

        if policy.should_retry(status, attempt) {
            attempt += 1;
            warn!(
                provider = id.tag,
                status,
                attempt,
                delay_ms = policy.delay.as_millis() as u64,
                "Service unavailable, retrying"
            );
            tokio::select! {
                _ = cancel.cancelled() => return Err(DispatchError::cancelled(id.tag)),
                _ = tokio::time::sleep(policy.delay) => {}
            }
            continue;
        }

        let err = classify(id, status, &body);
        warn!(provider = id.tag, status, kind = %err.kind, "Request failed");
        return Err(err);
    }
}
