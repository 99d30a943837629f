//! Configuration schema.
//!
//! Hierarchy: `Config` → `LocaleConfig`, `PromptsConfig`, `ProvidersConfig`,
//! `DispatchConfig`, `StorageConfig`, `VaultConfig`, `HistoryConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! Every field has a default, so a partial (or empty) file is valid.

use serde::{Deserialize, Serialize};

use crate::types::Provider;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.textsmith/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub locale: LocaleConfig,
    pub prompts: PromptsConfig,
    pub providers: ProvidersConfig,
    pub dispatch: DispatchConfig,
    pub storage: StorageConfig,
    pub vault: VaultConfig,
    pub history: HistoryConfig,
}

// ─────────────────────────────────────────────
// Locale & prompts
// ─────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleConfig {
    /// Locale whose built-in templates are used (`"en"`, `"tr"`).
    pub ui: String,
    /// Locale tried when `ui` has no catalog.
    pub fallback: String,
    /// Default output language written into prompts.
    pub output: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            ui: "en".to_string(),
            fallback: "en".to_string(),
            output: "English".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptsConfig {
    /// Budget for the rendered prompt on the free tier, in characters.
    pub max_prompt_length: usize,
    /// Optional directory holding `<locale>/prompts.json` catalogs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            max_prompt_length: 6000,
            templates_dir: None,
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Endpoint and generation parameters for a chat-style provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// Full request URL.
    pub url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl EndpointConfig {
    fn new(url: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            url: url.to_string(),
            model: model.to_string(),
            max_tokens,
            temperature: 0.7,
        }
    }
}

/// The no-credential free service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FreeConfig {
    /// Base URL; the model is sent as the `model` query parameter.
    pub url: String,
    pub model: String,
}

impl Default for FreeConfig {
    fn default() -> Self {
        Self {
            url: "https://text.pollinations.ai".to_string(),
            model: "mistral".to_string(),
        }
    }
}

/// Gemini uses a model-in-path URL, so it carries a base plus a model list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeminiConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1`.
    pub base_url: String,
    /// Model tried first.
    pub preferred_model: String,
    /// Models tried in order after the preferred one fails.
    pub fallback_models: Vec<String>,
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1".to_string(),
            preferred_model: "gemini-2.5-flash".to_string(),
            fallback_models: [
                "gemini-2.0-flash",
                "gemini-2.0-flash-001",
                "gemini-2.5-pro",
                "gemini-1.5-flash",
                "gemini-1.5-pro",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_output_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// Custom endpoints come from the vault; only generation parameters live here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomConfig {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for CustomConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

fn default_openai() -> EndpointConfig {
    EndpointConfig::new(
        "https://api.openai.com/v1/chat/completions",
        "gpt-4o-mini",
        1000,
    )
}

fn default_claude() -> EndpointConfig {
    EndpointConfig::new(
        "https://api.anthropic.com/v1/messages",
        "claude-3-5-haiku-20241022",
        1000,
    )
}

fn default_groq() -> EndpointConfig {
    EndpointConfig::new(
        "https://api.groq.com/openai/v1/chat/completions",
        "llama-3.3-70b-versatile",
        2000,
    )
}

fn default_cohere() -> EndpointConfig {
    EndpointConfig::new("https://api.cohere.com/v1/chat", "command", 1000)
}

/// All provider endpoints. Defaults are the public production URLs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub free: FreeConfig,
    #[serde(default = "default_openai")]
    pub openai: EndpointConfig,
    #[serde(default = "default_claude")]
    pub claude: EndpointConfig,
    pub gemini: GeminiConfig,
    #[serde(default = "default_cohere")]
    pub cohere: EndpointConfig,
    #[serde(default = "default_groq")]
    pub groq: EndpointConfig,
    pub custom: CustomConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            free: FreeConfig::default(),
            openai: default_openai(),
            claude: default_claude(),
            gemini: GeminiConfig::default(),
            cohere: default_cohere(),
            groq: default_groq(),
            custom: CustomConfig::default(),
        }
    }
}

impl ProvidersConfig {
    /// Endpoint for the providers that share the plain URL + model shape.
    pub fn endpoint(&self, provider: Provider) -> Option<&EndpointConfig> {
        match provider {
            Provider::OpenAi => Some(&self.openai),
            Provider::Claude => Some(&self.claude),
            Provider::Cohere => Some(&self.cohere),
            Provider::Groq => Some(&self.groq),
            Provider::Gemini | Provider::Custom => None,
        }
    }

    pub(crate) fn endpoint_mut(&mut self, provider: Provider) -> Option<&mut EndpointConfig> {
        match provider {
            Provider::OpenAi => Some(&mut self.openai),
            Provider::Claude => Some(&mut self.claude),
            Provider::Cohere => Some(&mut self.cohere),
            Provider::Groq => Some(&mut self.groq),
            Provider::Gemini | Provider::Custom => None,
        }
    }
}

// ─────────────────────────────────────────────
// Dispatch, storage, vault, history
// ─────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchConfig {
    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
    /// Extra attempts after a 503, for adapters that retry at all.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            max_retries: 2,
            retry_delay_ms: 2000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// JSON store file. `~` is expanded.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "~/.textsmith/store.json".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultConfig {
    /// Keep the obfuscation key in `~/.textsmith/vault.key` so stored
    /// credentials stay readable across runs.
    pub persist_key: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self { persist_key: true }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: crate::history::DEFAULT_HISTORY_LIMIT,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
