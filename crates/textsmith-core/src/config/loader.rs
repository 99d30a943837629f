//! Config loader — reads `~/.textsmith/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.textsmith/config.json`
//! 3. Environment variables `TEXTSMITH_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info, warn};

use super::schema::Config;
use crate::types::Provider;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the given path (or the default one) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let val = std::env::var(name).ok()?;
    match val.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {name}: cannot parse '{val}'");
            None
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `TEXTSMITH_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `TEXTSMITH_LOCALE__UI`, `TEXTSMITH_LOCALE__OUTPUT`
/// - `TEXTSMITH_PROMPTS__MAX_PROMPT_LENGTH`, `TEXTSMITH_PROMPTS__TEMPLATES_DIR`
/// - `TEXTSMITH_PROVIDERS__<NAME>__URL` / `__MODEL` for openai, claude, cohere, groq
/// - `TEXTSMITH_PROVIDERS__FREE__URL`, `TEXTSMITH_PROVIDERS__GEMINI__BASE_URL`
/// - `TEXTSMITH_DISPATCH__TIMEOUT_SECS`, `__MAX_RETRIES`, `__RETRY_DELAY_MS`
/// - `TEXTSMITH_STORAGE__PATH`, `TEXTSMITH_VAULT__PERSIST_KEY`, `TEXTSMITH_HISTORY__LIMIT`
fn apply_env_overrides(mut config: Config) -> Config {
    // Locale
    if let Ok(val) = std::env::var("TEXTSMITH_LOCALE__UI") {
        config.locale.ui = val;
    }
    if let Ok(val) = std::env::var("TEXTSMITH_LOCALE__OUTPUT") {
        config.locale.output = val;
    }

    // Prompts
    if let Some(n) = env_parse("TEXTSMITH_PROMPTS__MAX_PROMPT_LENGTH") {
        config.prompts.max_prompt_length = n;
    }
    if let Ok(val) = std::env::var("TEXTSMITH_PROMPTS__TEMPLATES_DIR") {
        config.prompts.templates_dir = Some(val);
    }

    // Provider endpoints
    for provider in [
        Provider::OpenAi,
        Provider::Claude,
        Provider::Cohere,
        Provider::Groq,
    ] {
        apply_endpoint_env(&mut config, provider);
    }
    if let Ok(val) = std::env::var("TEXTSMITH_PROVIDERS__FREE__URL") {
        config.providers.free.url = val;
    }
    if let Ok(val) = std::env::var("TEXTSMITH_PROVIDERS__GEMINI__BASE_URL") {
        config.providers.gemini.base_url = val;
    }

    // Dispatch
    if let Some(n) = env_parse("TEXTSMITH_DISPATCH__TIMEOUT_SECS") {
        config.dispatch.timeout_secs = n;
    }
    if let Some(n) = env_parse("TEXTSMITH_DISPATCH__MAX_RETRIES") {
        config.dispatch.max_retries = n;
    }
    if let Some(n) = env_parse("TEXTSMITH_DISPATCH__RETRY_DELAY_MS") {
        config.dispatch.retry_delay_ms = n;
    }

    // Storage, vault, history
    if let Ok(val) = std::env::var("TEXTSMITH_STORAGE__PATH") {
        config.storage.path = val;
    }
    if let Ok(val) = std::env::var("TEXTSMITH_VAULT__PERSIST_KEY") {
        config.vault.persist_key = val == "true" || val == "1";
    }
    if let Some(n) = env_parse("TEXTSMITH_HISTORY__LIMIT") {
        config.history.limit = n;
    }

    config
}

/// Apply env var overrides for a single URL + model provider.
fn apply_endpoint_env(config: &mut Config, provider: Provider) {
    let name = provider.as_str().to_ascii_uppercase();
    let Some(endpoint) = config.providers.endpoint_mut(provider) else {
        return;
    };
    if let Ok(val) = std::env::var(format!("TEXTSMITH_PROVIDERS__{name}__URL")) {
        endpoint.url = val;
    }
    if let Ok(val) = std::env::var(format!("TEXTSMITH_PROVIDERS__{name}__MODEL")) {
        endpoint.model = val;
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.prompts.max_prompt_length, 6000);
        assert_eq!(config.dispatch.retry_delay_ms, 2000);
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "locale": { "ui": "tr", "output": "Türkçe" },
            "history": { "limit": 5 }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.locale.ui, "tr");
        assert_eq!(config.locale.output, "Türkçe");
        assert_eq!(config.history.limit, 5);
        // Default preserved
        assert_eq!(config.locale.fallback, "en");
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.history.limit, 20);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");

        let mut config = Config::default();
        config.providers.groq.model = "llama-3.1-8b-instant".to_string();
        config.prompts.templates_dir = Some("/opt/templates".to_string());

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.providers.groq.model, "llama-3.1-8b-instant");
        assert_eq!(
            reloaded.prompts.templates_dir.as_deref(),
            Some("/opt/templates")
        );
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(raw["dispatch"].get("timeoutSecs").is_some());
        assert!(raw["dispatch"].get("timeout_secs").is_none());
    }

    #[test]
    fn test_env_override_endpoint() {
        std::env::set_var("TEXTSMITH_PROVIDERS__COHERE__URL", "http://127.0.0.1:1/chat");
        std::env::set_var("TEXTSMITH_PROVIDERS__COHERE__MODEL", "command-r");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.cohere.url, "http://127.0.0.1:1/chat");
        assert_eq!(config.providers.cohere.model, "command-r");
        std::env::remove_var("TEXTSMITH_PROVIDERS__COHERE__URL");
        std::env::remove_var("TEXTSMITH_PROVIDERS__COHERE__MODEL");
    }

    #[test]
    fn test_env_override_history_limit() {
        std::env::set_var("TEXTSMITH_HISTORY__LIMIT", "7");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.history.limit, 7);
        std::env::remove_var("TEXTSMITH_HISTORY__LIMIT");
    }

    #[test]
    fn test_env_override_unparseable_is_ignored() {
        std::env::set_var("TEXTSMITH_DISPATCH__MAX_RETRIES", "lots");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.dispatch.max_retries, 2);
        std::env::remove_var("TEXTSMITH_DISPATCH__MAX_RETRIES");
    }
}
