//! Prompt Template Engine for Textsmith.
//!
//! # Architecture
//!
//! - [`builtin`] — compiled-in `en` and `tr` catalogs (six templates each)
//! - [`source`] — [`TemplateSource`] plus on-disk `prompts.json` catalogs
//! - [`overrides`] — user-edited templates kept in the key-value store
//! - [`engine::PromptEngine`] — template resolution, placeholder filling and
//!   the free-tier length budget

pub mod builtin;
pub mod engine;
pub mod overrides;
pub mod source;

pub use builtin::LocaleStrings;
pub use engine::{PromptEngine, RenderRequest, ResolvedTemplate, TemplateOrigin, MAX_PROMPT_LENGTH};
pub use overrides::TemplateOverrides;
pub use source::{BuiltinSource, CatalogSource, TemplateSource};
