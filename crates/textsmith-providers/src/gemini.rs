//! Google Gemini adapter with staged model fallback.
//!
//! A call runs in three stages:
//! 1. Credential check: keys under 20 chars are rejected locally, then a
//!    list-models call validates the key. Either failure is terminal.
//! 2. The preferred model.
//! 3. On any non-cancel failure, each fallback model in order. The first
//!    success wins; if all fail the caller sees the primary failure's kind.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use textsmith_core::cancel::CancelToken;
use textsmith_core::config::schema::GeminiConfig;
use textsmith_core::error::{DispatchError, ErrorKind};
use textsmith_core::types::{Credentials, Provider, Route};

use crate::errors::{classify_status, extract_text, json_body, server_message, ProviderId};
use crate::policy::{send_with_policy, RetryPolicy};
use crate::traits::Adapter;

const ID: ProviderId = ProviderId {
    tag: "gemini",
    name: "Google Gemini",
};

/// Shortest key worth sending to the model list.
const MIN_KEY_LEN: usize = 20;

const CANDIDATE_TEXT: &str = "/candidates/0/content/parts/0/text";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

// ─────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────

/// Gemini reports bad keys and safety blocks as plain 400s.
fn classify_gemini(id: &ProviderId, status: u16, body: &str) -> DispatchError {
    if status == 400 {
        let message = server_message(body);
        // The reason code sits in `error.details`, so match the raw body too.
        let bad_key = body.contains("API_KEY_INVALID")
            || message.to_ascii_lowercase().contains("api key");
        if bad_key {
            return DispatchError::new(
                ErrorKind::InvalidCredential,
                id.tag,
                "Gemini API key is invalid. Create a new key in Google AI Studio.",
            );
        }
        if message.contains("SAFETY") {
            return DispatchError::new(
                ErrorKind::BadRequest,
                id.tag,
                "Content was blocked by the safety filter. Try a different text.",
            );
        }
    }
    classify_status(id, status, body)
}

fn classify_key_check(id: &ProviderId, status: u16, body: &str) -> DispatchError {
    match status {
        400 | 401 | 403 => DispatchError::new(
            ErrorKind::InvalidCredential,
            id.tag,
            format!("Gemini API key check failed ({status}). Check the key in Google AI Studio."),
        ),
        _ => classify_gemini(id, status, body),
    }
}

// ─────────────────────────────────────────────
// GeminiAdapter
// ─────────────────────────────────────────────

pub struct GeminiAdapter {
    client: reqwest::Client,
    config: GeminiConfig,
    policy: RetryPolicy,
}

impl GeminiAdapter {
    pub fn new(client: reqwest::Client, config: GeminiConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            config,
            policy,
        }
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    async fn check_key(&self, secret: &str, cancel: &CancelToken) -> Result<(), DispatchError> {
        let url = format!("{}/models", self.base());
        send_with_policy(&ID, &RetryPolicy::none(), classify_key_check, cancel, || {
            self.client.get(&url).query(&[("key", secret)])
        })
        .await?;
        debug!("Gemini key accepted by model list");
        Ok(())
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        secret: &str,
        cancel: &CancelToken,
    ) -> Result<String, DispatchError> {
        let url = format!("{}/models/{}:generateContent", self.base(), model);
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let body = send_with_policy(&ID, &self.policy, classify_gemini, cancel, || {
            self.client
                .post(&url)
                .query(&[("key", secret)])
                .json(&request)
        })
        .await?;

        let value = json_body(&ID, &body)?;
        extract_text(&value, &[CANDIDATE_TEXT])
            .ok_or_else(|| DispatchError::unexpected_shape(ID.tag))
    }
}

#[async_trait]
impl Adapter for GeminiAdapter {
    fn route(&self) -> Route {
        Route::Provider(Provider::Gemini)
    }

    fn label(&self) -> &str {
        ID.name
    }

    async fn invoke(
        &self,
        prompt: &str,
        credentials: &Credentials,
        cancel: &CancelToken,
    ) -> Result<String, DispatchError> {
        let secret = credentials.secret.trim();
        if secret.chars().count() < MIN_KEY_LEN {
            return Err(DispatchError::new(
                ErrorKind::InvalidCredential,
                ID.tag,
                "Gemini API key is too short or empty. Create a new key in Google AI Studio.",
            ));
        }

        self.check_key(secret, cancel).await?;

        let primary = match self
            .generate(&self.config.preferred_model, prompt, secret, cancel)
            .await
        {
            Ok(text) => return Ok(text),
            Err(e) if e.kind == ErrorKind::Cancelled => return Err(e),
            Err(e) => e,
        };
        warn!(
            model = %self.config.preferred_model,
            kind = %primary.kind,
            "Preferred Gemini model failed, trying fallbacks"
        );

        for model in &self.config.fallback_models {
            match self.generate(model, prompt, secret, cancel).await {
                Ok(text) => {
                    info!(model = %model, "Gemini fallback model succeeded");
                    return Ok(text);
                }
                Err(e) if e.kind == ErrorKind::Cancelled => return Err(e),
                Err(e) => debug!(model = %model, error = %e, "Gemini fallback model failed"),
            }
        }

        Err(DispatchError::new(
            primary.kind,
            ID.tag,
            format!("No Gemini model responded: {}", primary.message),
        ))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
