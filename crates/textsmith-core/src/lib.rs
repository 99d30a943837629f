//! Core building blocks for Textsmith.
//!
//! # Architecture
//!
//! - [`types`] — request axes, template ids, provider tags, dispatch results
//! - [`error`] — the uniform [`DispatchError`] and its [`ErrorKind`] taxonomy
//! - [`config`] — `~/.textsmith/config.json` schema, loader and env overrides
//! - [`storage`] — async key-value capability plus memory and JSON-file stores
//! - [`vault`] — obfuscated per-provider credentials and the preferred provider
//! - [`history`] — capped log of processed requests
//! - [`cancel`] — cancellation token threaded through adapter calls

pub mod cancel;
pub mod config;
pub mod error;
pub mod history;
pub mod storage;
pub mod types;
pub mod utils;
pub mod vault;

pub use cancel::{CancelHandle, CancelToken};
pub use error::{DispatchError, ErrorKind};
pub use history::HistoryLog;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use types::{
    Credentials, CustomEndpoint, DispatchResult, HistoryEntry, ProcessingIntent, ProcessingStyle,
    Provider, Route, TemplateId,
};
pub use vault::{CredentialVault, ObfuscationKey, VaultEvent};
