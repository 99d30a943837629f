//! OpenAI-compatible `/chat/completions` adapter.
//!
//! Serves OpenAI and Groq, which share the request and response shape and
//! differ only in endpoint, model and retry policy.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use textsmith_core::cancel::CancelToken;
use textsmith_core::config::schema::EndpointConfig;
use textsmith_core::error::DispatchError;
use textsmith_core::types::{Credentials, Provider, Route};

use crate::errors::{classify_status, extract_text, json_body, ProviderId};
use crate::policy::{send_with_policy, RetryPolicy};
use crate::traits::Adapter;

// ─────────────────────────────────────────────
// Wire types (shared with the custom adapter)
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f64,
}

pub(crate) const CHOICE_CONTENT: &str = "/choices/0/message/content";

// ─────────────────────────────────────────────
// ChatCompletionsAdapter
// ─────────────────────────────────────────────

pub struct ChatCompletionsAdapter {
    id: ProviderId,
    provider: Provider,
    client: reqwest::Client,
    endpoint: EndpointConfig,
    policy: RetryPolicy,
}

impl std::fmt::Debug for ChatCompletionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsAdapter")
            .field("provider", &self.id.name)
            .field("url", &self.endpoint.url)
            .field("model", &self.endpoint.model)
            .finish()
    }
}

impl ChatCompletionsAdapter {
    pub fn new(
        provider: Provider,
        client: reqwest::Client,
        endpoint: EndpointConfig,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            id: ProviderId {
                tag: provider.as_str(),
                name: provider.display_name(),
            },
            provider,
            client,
            endpoint,
            policy,
        }
    }
}

#[async_trait]
impl Adapter for ChatCompletionsAdapter {
    fn route(&self) -> Route {
        Route::Provider(self.provider)
    }

    fn label(&self) -> &str {
        self.id.name
    }

    async fn invoke(
        &self,
        prompt: &str,
        credentials: &Credentials,
        cancel: &CancelToken,
    ) -> Result<String, DispatchError> {
        debug!(
            provider = self.id.tag,
            model = %self.endpoint.model,
            prompt_chars = prompt.chars().count(),
            "Calling chat completions"
        );

        let request = ChatRequest {
            model: Some(&self.endpoint.model),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.endpoint.max_tokens,
            temperature: self.endpoint.temperature,
        };

        let body = send_with_policy(&self.id, &self.policy, classify_status, cancel, || {
            self.client
                .post(&self.endpoint.url)
                .bearer_auth(&credentials.secret)
                .json(&request)
        })
        .await?;

        let value = json_body(&self.id, &body)?;
        extract_text(&value, &[CHOICE_CONTENT])
            .ok_or_else(|| DispatchError::unexpected_shape(self.id.tag))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use textsmith_core::error::ErrorKind;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(uri: &str, model: &str) -> EndpointConfig {
        EndpointConfig {
            url: format!("{uri}/chat/completions"),
            model: model.to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    fn openai(uri: &str) -> ChatCompletionsAdapter {
        ChatCompletionsAdapter::new(
            Provider::OpenAi,
            reqwest::Client::new(),
            endpoint(uri, "gpt-4o-mini"),
            RetryPolicy::none(),
        )
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{ "role": "user", "content": "Fix this" }],
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "  Fixed.  " } }]
            })))
            .mount(&mock_server)
            .await;

        let text = openai(&mock_server.uri())
            .invoke("Fix this", &Credentials::new("sk-test"), &CancelToken::none())
            .await
            .unwrap();
        assert_eq!(text, "Fixed.");
    }

    #[tokio::test]
    async fn test_missing_choices_is_unexpected_shape() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&mock_server)
            .await;

        let err = openai(&mock_server.uri())
            .invoke("x", &Credentials::new("k"), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedResponseShape);
    }

    #[tokio::test]
    async fn test_openai_quota_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "message": "You exceeded your current quota",
                    "type": "insufficient_quota"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = openai(&mock_server.uri())
            .invoke("x", &Credentials::new("k"), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert!(err.message.contains("quota"));
        assert_eq!(err.provider, "openai");
    }

    #[tokio::test]
    async fn test_openai_does_not_retry_503() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = openai(&mock_server.uri())
            .invoke("x", &Credentials::new("k"), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_groq_retries_503() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "model": "llama-3.3-70b-versatile" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "fast" } }]
            })))
            .mount(&mock_server)
            .await;

        let groq = ChatCompletionsAdapter::new(
            Provider::Groq,
            reqwest::Client::new(),
            endpoint(&mock_server.uri(), "llama-3.3-70b-versatile"),
            RetryPolicy::on_unavailable(2, Duration::from_millis(5)),
        );
        assert_eq!(groq.label(), "Groq");
        let text = groq
            .invoke("x", &Credentials::new("gsk_k"), &CancelToken::none())
            .await
            .unwrap();
        assert_eq!(text, "fast");
    }

    #[test]
    fn test_request_serialization() {
        let req = ChatRequest {
            model: None,
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 10,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("model").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
