//! Shared CLI helpers — path expansion, assistant wiring, output.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use textsmith_core::config::Config;
use textsmith_core::storage::{JsonFileStore, KeyValueStore};
use textsmith_core::utils::get_vault_key_path;
use textsmith_core::vault::ObfuscationKey;
use textsmith_dispatch::{Assistant, AssistantError};

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Build the assistant over the configured JSON store.
pub fn build_assistant(config: &Config) -> Result<Assistant> {
    let store_path = expand_tilde(&config.storage.path);
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(store_path));

    let key = if config.vault.persist_key {
        let path = get_vault_key_path();
        ObfuscationKey::load_or_create(&path)
            .with_context(|| format!("failed to load vault key from {}", path.display()))?
    } else {
        ObfuscationKey::generate()
    };

    Assistant::from_config(config, store, key)
}

/// Use `arg` when given, else read all of stdin.
pub fn text_or_stdin(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

/// Print a provider result to stdout.
pub fn print_result(text: &str, provider_label: &str) {
    println!();
    println!("{}", format!("✎ {provider_label}").cyan().bold());
    if text.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{text}");
    }
    println!();
}

/// Print an error with a remediation hint when the user can fix it.
pub fn print_error(err: &AssistantError) {
    eprintln!("{} {}", "✗".red().bold(), err);
    if err.kind().is_some_and(|k| k.needs_remediation()) {
        eprintln!(
            "  {}",
            "Check your API key or endpoint with `textsmith key set`.".dimmed()
        );
    }
}

/// Print a "thinking" placeholder (for non-log mode).
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
