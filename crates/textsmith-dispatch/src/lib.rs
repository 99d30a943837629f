//! Dispatch layer for Textsmith.
//!
//! # Architecture
//!
//! - [`orchestrator::Dispatcher`] — resolves the route (free, declared or
//!   auto-detected provider) and invokes exactly one adapter
//! - [`assistant::Assistant`] — facade over vault, prompt engine, dispatcher
//!   and history
//! - [`command`] — closed `Command`/`Response` enums handled by the facade

pub mod assistant;
pub mod command;
pub mod orchestrator;

pub use assistant::{Assistant, ProcessOutput, ProcessRequest, SaveOutcome};
pub use command::{AssistantError, Command, Response, TemplateView};
pub use orchestrator::{Dispatcher, ResolvedRoute};
