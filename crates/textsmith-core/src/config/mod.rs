//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use textsmith_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Prompt budget: {}", cfg.prompts.max_prompt_length);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{get_config_path, load_config, save_config};
pub use schema::Config;
