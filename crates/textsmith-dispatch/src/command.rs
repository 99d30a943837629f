//! Closed command set for front ends that talk to the assistant by message.
//!
//! Every request a UI can make is one [`Command`] variant and every answer a
//! [`Response`] variant, so adding one is a compile error until `handle`
//! covers it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use textsmith_core::cancel::CancelToken;
use textsmith_core::error::{DispatchError, ErrorKind};
use textsmith_core::types::{CustomEndpoint, HistoryEntry, Provider, TemplateId};
use textsmith_prompts::ResolvedTemplate;

use crate::assistant::{Assistant, ProcessOutput, ProcessRequest};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    ProcessText(ProcessRequest),
    GetPromptPreview(ProcessRequest),
    SaveApiKey {
        provider: Provider,
        secret: String,
        #[serde(default)]
        endpoint: Option<CustomEndpoint>,
    },
    DeleteApiKey { provider: Provider },
    GetMaskedApiKey { provider: Provider },
    DetectProvider { secret: String },
    GetActiveProvider,
    SetSelectedProvider { provider: Option<Provider> },
    GetSelectedProvider,
    GetTemplate { id: TemplateId },
    SetTemplate { id: TemplateId, body: String },
    ResetTemplate { id: TemplateId },
    GetHistory,
    DeleteHistoryItem { index: usize },
    ClearHistory,
    GetSupportedLocales,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    Processed(ProcessOutput),
    Prompt(String),
    /// Provider now in effect after a credential or preference change.
    ActiveProvider(Option<Provider>),
    SelectedProvider(Option<Provider>),
    MaskedKey(Option<String>),
    Detected(Option<Provider>),
    Template(TemplateView),
    History(Vec<HistoryEntry>),
    Locales(Vec<String>),
    Done,
}

/// Serializable view of a resolved template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateView {
    pub id: TemplateId,
    pub body: String,
    pub custom: bool,
}

impl From<ResolvedTemplate> for TemplateView {
    fn from(t: ResolvedTemplate) -> Self {
        Self {
            id: t.id,
            body: t.body,
            custom: t.origin == textsmith_prompts::TemplateOrigin::Custom,
        }
    }
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl AssistantError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AssistantError::Dispatch(e) => Some(e.kind),
            AssistantError::Storage(_) => None,
        }
    }
}

impl Assistant {
    pub async fn handle(
        &self,
        command: Command,
        cancel: &CancelToken,
    ) -> Result<Response, AssistantError> {
        let response = match command {
            Command::ProcessText(request) => {
                Response::Processed(self.process(&request, cancel).await?)
            }
            Command::GetPromptPreview(request) => {
                Response::Prompt(self.render_prompt_preview(&request).await)
            }
            Command::SaveApiKey {
                provider,
                secret,
                endpoint,
            } => {
                let saved = self.save_credential(provider, &secret, endpoint).await?;
                Response::ActiveProvider(saved.active)
            }
            Command::DeleteApiKey { provider } => {
                Response::ActiveProvider(self.delete_credential(provider).await?)
            }
            Command::GetMaskedApiKey { provider } => {
                Response::MaskedKey(self.masked_credential(provider).await)
            }
            Command::DetectProvider { secret } => Response::Detected(self.detect_provider(&secret)),
            Command::GetActiveProvider => Response::ActiveProvider(self.active_provider().await),
            Command::SetSelectedProvider { provider } => {
                Response::ActiveProvider(self.set_preferred_provider(provider).await?)
            }
            Command::GetSelectedProvider => {
                Response::SelectedProvider(self.preferred_provider().await)
            }
            Command::GetTemplate { id } => Response::Template(self.template(id).await.into()),
            Command::SetTemplate { id, body } => {
                self.set_template(id, &body).await?;
                Response::Template(self.template(id).await.into())
            }
            Command::ResetTemplate { id } => {
                self.reset_template(id).await?;
                Response::Template(self.template(id).await.into())
            }
            Command::GetHistory => Response::History(self.history().await?),
            Command::DeleteHistoryItem { index } => {
                self.delete_history_entry(index).await?;
                Response::History(self.history().await?)
            }
            Command::ClearHistory => {
                self.clear_history().await?;
                Response::Done
            }
            Command::GetSupportedLocales => Response::Locales(self.supported_locales()),
        };
        Ok(response)
    }
}
