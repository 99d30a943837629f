//! Provider layer for Textsmith.
//!
//! # Architecture
//!
//! - [`registry`] — static specs, key-format detection, active provider resolution
//! - [`traits::Adapter`] — trait every provider adapter implements
//! - [`policy`] — per-adapter retry policy and the shared send loop
//! - [`errors`] — HTTP status → [`textsmith_core::ErrorKind`] mapping
//! - one module per wire protocol: [`pollinations`], [`openai_compat`],
//!   [`claude`], [`gemini`], [`cohere`], [`custom`]
//! - [`adapters::AdapterSet`] — route → adapter table built from config

pub mod adapters;
pub mod claude;
pub mod cohere;
pub mod custom;
pub mod errors;
pub mod gemini;
pub mod openai_compat;
pub mod policy;
pub mod pollinations;
pub mod registry;
pub mod traits;

pub use adapters::AdapterSet;
pub use policy::RetryPolicy;
pub use registry::{
    active_provider, detect, find_by_name, list_providers, ProviderSpec, FREE_PROVIDER, PROVIDERS,
};
pub use traits::Adapter;
