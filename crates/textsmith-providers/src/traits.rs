//! Adapter trait — the uniform contract every provider implements.
//!
//! An adapter turns one prompt into one completion over its provider's wire
//! protocol, applying its own retry policy and error mapping.

use async_trait::async_trait;

use textsmith_core::cancel::CancelToken;
use textsmith_core::error::DispatchError;
use textsmith_core::types::{Credentials, Route};

#[async_trait]
pub trait Adapter: Send + Sync {
    /// Which route this adapter serves.
    fn route(&self) -> Route;

    /// Display name used in result labels (e.g. `"Groq"`).
    fn label(&self) -> &str;

    /// Send `prompt` and return the trimmed completion text.
    ///
    /// Every non-success outcome is a terminal [`DispatchError`]; retries, if
    /// any, have already happened inside the adapter.
    async fn invoke(
        &self,
        prompt: &str,
        credentials: &Credentials,
        cancel: &CancelToken,
    ) -> Result<String, DispatchError>;
}
