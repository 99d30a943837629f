//! Anthropic Messages API adapter.

use async_trait::async_trait;
use serde::Serialize;

use textsmith_core::cancel::CancelToken;
use textsmith_core::config::schema::EndpointConfig;
use textsmith_core::error::DispatchError;
use textsmith_core::types::{Credentials, Provider, Route};

use crate::errors::{classify_status, extract_text, json_body, ProviderId};
use crate::openai_compat::ChatMessage;
use crate::policy::{send_with_policy, RetryPolicy};
use crate::traits::Adapter;

const ID: ProviderId = ProviderId {
    tag: "claude",
    name: "Claude",
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

pub struct ClaudeAdapter {
    client: reqwest::Client,
    endpoint: EndpointConfig,
    policy: RetryPolicy,
}

impl ClaudeAdapter {
    pub fn new(client: reqwest::Client, endpoint: EndpointConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            endpoint,
            policy,
        }
    }
}

#[async_trait]
impl Adapter for ClaudeAdapter {
    fn route(&self) -> Route {
        Route::Provider(Provider::Claude)
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
        let request = MessagesRequest {
            model: &self.endpoint.model,
            max_tokens: self.endpoint.max_tokens,
            messages: vec![ChatMessage::user(prompt)],
        };

        let body = send_with_policy(&ID, &self.policy, classify_status, cancel, || {
            self.client
                .post(&self.endpoint.url)
                .header("x-api-key", &credentials.secret)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request)
        })
        .await?;

        let value = json_body(&ID, &body)?;
        extract_text(&value, &["/content/0/text"])
            .ok_or_else(|| DispatchError::unexpected_shape(ID.tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsmith_core::error::ErrorKind;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(uri: &str) -> ClaudeAdapter {
        ClaudeAdapter::new(
            reqwest::Client::new(),
            EndpointConfig {
                url: format!("{uri}/v1/messages"),
                model: "claude-3-5-haiku-20241022".to_string(),
                max_tokens: 1000,
                temperature: 0.7,
            },
            RetryPolicy::none(),
        )
    }

    #[tokio::test]
    async fn test_claude_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-3-5-haiku-20241022",
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{ "type": "text", "text": "Polished." }]
            })))
            .mount(&mock_server)
            .await;

        let text = adapter(&mock_server.uri())
            .invoke("draft", &Credentials::new("sk-ant-test"), &CancelToken::none())
            .await
            .unwrap();
        assert_eq!(text, "Polished.");
    }

    #[tokio::test]
    async fn test_claude_overloaded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(serde_json::json!({
                "type": "error",
                "error": { "type": "overloaded_error", "message": "Overloaded" }
            })))
            .mount(&mock_server)
            .await;

        let err = adapter(&mock_server.uri())
            .invoke("x", &Credentials::new("k"), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert!(err.message.contains("overloaded"));
    }

    #[tokio::test]
    async fn test_claude_invalid_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = adapter(&mock_server.uri())
            .invoke("x", &Credentials::new("bad"), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredential);
        assert!(err.kind.needs_remediation());
    }
}
