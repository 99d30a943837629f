//! Cohere chat adapter (v1 `message` API).

use async_trait::async_trait;
use serde::Serialize;

use textsmith_core::cancel::CancelToken;
use textsmith_core::config::schema::EndpointConfig;
use textsmith_core::error::DispatchError;
use textsmith_core::types::{Credentials, Provider, Route};

use crate::errors::{classify_status, extract_text, json_body, ProviderId};
use crate::policy::{send_with_policy, RetryPolicy};
use crate::traits::Adapter;

const ID: ProviderId = ProviderId {
    tag: "cohere",
    name: "Cohere",
};

#[derive(Debug, Serialize)]
struct CohereRequest<'a> {
    model: &'a str,
    message: &'a str,
    max_tokens: u32,
    temperature: f64,
}

pub struct CohereAdapter {
    client: reqwest::Client,
    endpoint: EndpointConfig,
    policy: RetryPolicy,
}

impl CohereAdapter {
    pub fn new(client: reqwest::Client, endpoint: EndpointConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            endpoint,
            policy,
        }
    }
}

#[async_trait]
impl Adapter for CohereAdapter {
    fn route(&self) -> Route {
        Route::Provider(Provider::Cohere)
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
        let request = CohereRequest {
            model: &self.endpoint.model,
            message: prompt,
            max_tokens: self.endpoint.max_tokens,
            temperature: self.endpoint.temperature,
        };

        let body = send_with_policy(&ID, &self.policy, classify_status, cancel, || {
            self.client
                .post(&self.endpoint.url)
                .bearer_auth(&credentials.secret)
                .json(&request)
        })
        .await?;

        let value = json_body(&ID, &body)?;
        // Older deployments still answer in the generate shape.
        extract_text(&value, &["/text", "/generations/0/text"])
            .ok_or_else(|| DispatchError::unexpected_shape(ID.tag))
    }
}
