//! User-configured endpoint speaking a loosely OpenAI-style protocol.
//!
//! The URL and optional model come from the vault, not from config. Several
//! response shapes are accepted since self-hosted gateways vary.

use async_trait::async_trait;
use tracing::debug;

use textsmith_core::cancel::CancelToken;
use textsmith_core::config::schema::CustomConfig;
use textsmith_core::error::DispatchError;
use textsmith_core::types::{Credentials, Provider, Route};

use crate::errors::{classify_status, extract_text, json_body, ProviderId};
use crate::openai_compat::{ChatMessage, ChatRequest, CHOICE_CONTENT};
use crate::policy::{send_with_policy, RetryPolicy};
use crate::traits::Adapter;

const ID: ProviderId = ProviderId {
    tag: "custom",
    name: "Custom API",
};

const RESPONSE_SHAPES: [&str; 4] = [CHOICE_CONTENT, "/content/0/text", "/text", "/response"];

pub struct CustomAdapter {
    client: reqwest::Client,
    config: CustomConfig,
    policy: RetryPolicy,
}

impl CustomAdapter {
    pub fn new(client: reqwest::Client, config: CustomConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            config,
            policy,
        }
    }
}

#[async_trait]
impl Adapter for CustomAdapter {
    fn route(&self) -> Route {
        Route::Provider(Provider::Custom)
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
        let endpoint = credentials
            .endpoint
            .as_ref()
            .filter(|e| !e.url.trim().is_empty())
            .ok_or_else(|| {
                DispatchError::misconfigured(
                    ID.tag,
                    "Custom API endpoint is not set. Add an endpoint URL.",
                )
            })?;

        debug!(url = %endpoint.url, model = ?endpoint.model, "Calling custom endpoint");

        let request = ChatRequest {
            model: endpoint.model.as_deref().filter(|m| !m.is_empty()),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let body = send_with_policy(&ID, &self.policy, classify_status, cancel, || {
            self.client
                .post(endpoint.url.trim())
                .bearer_auth(&credentials.secret)
                .json(&request)
        })
        .await?;

        let value = json_body(&ID, &body)?;
        extract_text(&value, &RESPONSE_SHAPES)
            .ok_or_else(|| DispatchError::unexpected_shape(ID.tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsmith_core::error::ErrorKind;
    use textsmith_core::types::CustomEndpoint;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter() -> CustomAdapter {
        CustomAdapter::new(reqwest::Client::new(), CustomConfig::default(), RetryPolicy::none())
    }

    fn creds(uri: &str, model: Option<&str>) -> Credentials {
        Credentials::new("my-token").with_endpoint(CustomEndpoint {
            url: format!("{uri}/generate"),
            model: model.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_custom_missing_endpoint_is_misconfigured() {
        let err = adapter()
            .invoke("x", &Credentials::new("my-token"), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Misconfigured);
    }

    #[tokio::test]
    async fn test_custom_sends_model_and_reads_choices() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(header("Authorization", "Bearer my-token"))
            .and(body_partial_json(serde_json::json!({ "model": "local-llm" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "openai shape" } }]
            })))
            .mount(&mock_server)
            .await;

        let text = adapter()
            .invoke("x", &creds(&mock_server.uri(), Some("local-llm")), &CancelToken::none())
            .await
            .unwrap();
        assert_eq!(text, "openai shape");
    }

    #[tokio::test]
    async fn test_custom_response_shapes() {
        for (body, expected) in [
            (serde_json::json!({ "content": [{ "text": "anthropic shape" }] }), "anthropic shape"),
            (serde_json::json!({ "text": "text shape" }), "text shape"),
            (serde_json::json!({ "response": "ollama shape" }), "ollama shape"),
        ] {
            let mock_server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&mock_server)
                .await;

            let text = adapter()
                .invoke("x", &creds(&mock_server.uri(), None), &CancelToken::none())
                .await
                .unwrap();
            assert_eq!(text, expected);
        }
    }

    #[tokio::test]
    async fn test_custom_404_is_misconfigured() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = adapter()
            .invoke("x", &creds(&mock_server.uri(), None), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Misconfigured);
        assert!(err.message.contains("endpoint not found"));
    }

    #[tokio::test]
    async fn test_custom_unknown_shape() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "output": 1 })),
            )
            .mount(&mock_server)
            .await;

        let err = adapter()
            .invoke("x", &creds(&mock_server.uri(), None), &CancelToken::none())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedResponseShape);
    }
}
