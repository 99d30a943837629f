//! Core types for Textsmith — the request axes, template identifiers,
//! provider tags and the dispatch result contract.
//!
//! Every string-tagged value that crosses a boundary (config, storage, CLI)
//! is modelled as a closed enum here so that matches over intents, styles and
//! providers are checked at compile time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Request axes
// ─────────────────────────────────────────────

/// The transformation the user asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessingIntent {
    #[serde(rename = "improve")]
    Improve,
    #[serde(rename = "toPrompt")]
    ToPrompt,
    #[serde(rename = "summarize")]
    Summarize,
}

impl ProcessingIntent {
    pub const ALL: [ProcessingIntent; 3] = [
        ProcessingIntent::Improve,
        ProcessingIntent::ToPrompt,
        ProcessingIntent::Summarize,
    ];

    /// Wire name (`"improve"`, `"toPrompt"`, `"summarize"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingIntent::Improve => "improve",
            ProcessingIntent::ToPrompt => "toPrompt",
            ProcessingIntent::Summarize => "summarize",
        }
    }
}

impl FromStr for ProcessingIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "improve" => Ok(ProcessingIntent::Improve),
            "toPrompt" | "to-prompt" | "to_prompt" => Ok(ProcessingIntent::ToPrompt),
            "summarize" => Ok(ProcessingIntent::Summarize),
            other => Err(format!("unknown intent '{other}'")),
        }
    }
}

impl fmt::Display for ProcessingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much freedom the model gets when rewriting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessingStyle {
    #[serde(rename = "faithful")]
    Faithful,
    #[serde(rename = "enhance")]
    Enhance,
}

impl ProcessingStyle {
    pub const ALL: [ProcessingStyle; 2] = [ProcessingStyle::Faithful, ProcessingStyle::Enhance];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStyle::Faithful => "faithful",
            ProcessingStyle::Enhance => "enhance",
        }
    }
}

impl FromStr for ProcessingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "faithful" => Ok(ProcessingStyle::Faithful),
            "enhance" => Ok(ProcessingStyle::Enhance),
            other => Err(format!("unknown style '{other}'")),
        }
    }
}

impl fmt::Display for ProcessingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Template identifiers
// ─────────────────────────────────────────────

/// One of the six fixed prompt templates.
///
/// The `(intent, style)` → id table is total: every combination has exactly
/// one template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Template1,
    Template2,
    Template3,
    Template4,
    Template5,
    Template6,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::Template1,
        TemplateId::Template2,
        TemplateId::Template3,
        TemplateId::Template4,
        TemplateId::Template5,
        TemplateId::Template6,
    ];

    /// Decision table: intent × style.
    pub fn from_parts(intent: ProcessingIntent, style: ProcessingStyle) -> Self {
        use ProcessingIntent::*;
        use ProcessingStyle::*;
        match (intent, style) {
            (Improve, Faithful) => TemplateId::Template1,
            (Improve, Enhance) => TemplateId::Template2,
            (ToPrompt, Faithful) => TemplateId::Template3,
            (ToPrompt, Enhance) => TemplateId::Template4,
            (Summarize, Faithful) => TemplateId::Template5,
            (Summarize, Enhance) => TemplateId::Template6,
        }
    }

    /// Resolve from raw wire names. Anything unrecognised falls back to
    /// `Template1` (improve + faithful) instead of failing.
    pub fn from_names(intent: &str, style: &str) -> Self {
        match (intent.parse(), style.parse()) {
            (Ok(i), Ok(s)) => TemplateId::from_parts(i, s),
            _ => TemplateId::Template1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Template1 => "template1",
            TemplateId::Template2 => "template2",
            TemplateId::Template3 => "template3",
            TemplateId::Template4 => "template4",
            TemplateId::Template5 => "template5",
            TemplateId::Template6 => "template6",
        }
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown template id '{s}'"))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// A credential-backed AI provider.
///
/// The free default service is not a variant; it is what [`Route::Free`]
/// stands for when no provider resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Claude,
    Gemini,
    Cohere,
    Groq,
    Custom,
}

impl Provider {
    /// Storage/wire tag (`"openai"`, `"claude"`, …).
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::Cohere => "cohere",
            Provider::Groq => "groq",
            Provider::Custom => "custom",
        }
    }

    /// Human-readable name used in result labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Claude => "Claude",
            Provider::Gemini => "Google Gemini",
            Provider::Cohere => "Cohere",
            Provider::Groq => "Groq",
            Provider::Custom => "Custom API",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "claude" | "anthropic" => Ok(Provider::Claude),
            "gemini" | "google" => Ok(Provider::Gemini),
            "cohere" => Ok(Provider::Cohere),
            "groq" => Ok(Provider::Groq),
            "custom" => Ok(Provider::Custom),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which adapter a dispatch ends up calling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// The no-credential free service.
    Free,
    Provider(Provider),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Free => f.write_str("free"),
            Route::Provider(p) => f.write_str(p.as_str()),
        }
    }
}

// ─────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────

/// Endpoint override stored alongside a `custom` credential.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEndpoint {
    pub url: String,
    /// Optional model name sent in the request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Everything an adapter needs to authenticate one call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub secret: String,
    pub endpoint: Option<CustomEndpoint>,
}

impl Credentials {
    pub fn new(secret: impl Into<String>) -> Self {
        Credentials {
            secret: secret.into(),
            endpoint: None,
        }
    }

    /// No secret at all (the free route).
    pub fn anonymous() -> Self {
        Credentials::default()
    }

    pub fn with_endpoint(mut self, endpoint: CustomEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }
}

// Never print the secret, even in debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret", &crate::utils::mask_secret(&self.secret))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

// ─────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────

/// Successful outcome of one dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub text: String,
    pub provider_label: String,
}

/// One processed request, kept by the caller's history log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub intent: ProcessingIntent,
    pub style: ProcessingStyle,
    pub input_text: String,
    pub result_text: String,
    pub provider_label: String,
    #[serde(default)]
    pub output_language: String,
    pub timestamp: DateTime<Utc>,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
