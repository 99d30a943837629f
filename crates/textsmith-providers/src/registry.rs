//! Provider registry — static specs for the six credential-backed providers
//! plus the free default service.
//!
//! Each `ProviderSpec` describes how to reach a provider and how to recognise
//! its keys. Two orders matter here:
//! - [`PROVIDERS`] is the scan order used when no preference is set.
//! - [`detect`] sniffs key formats in its own fixed priority order, because
//!   `sk-ant-` keys also start with `sk-`.

use tracing::debug;

use textsmith_core::types::Provider;
use textsmith_core::vault::CredentialVault;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// How the secret travels with a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// No credential (free service).
    None,
    /// `Authorization: Bearer <secret>`.
    Bearer,
    /// `x-api-key: <secret>` plus a version header.
    ApiKeyHeader,
    /// `?key=<secret>` in the URL.
    QueryKey,
}

/// Shape of a provider's raw key, used for auto-detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySignature {
    /// Starts with `prefix` and is strictly longer than `longer_than` chars.
    Prefix {
        prefix: &'static str,
        longer_than: usize,
    },
    /// Exactly `len` chars drawn from `[A-Za-z0-9_-]`.
    UrlSafe { len: usize },
}

impl KeySignature {
    pub fn matches(&self, secret: &str) -> bool {
        let len = secret.chars().count();
        match *self {
            KeySignature::Prefix {
                prefix,
                longer_than,
            } => secret.starts_with(prefix) && len > longer_than,
            KeySignature::UrlSafe { len: expected } => {
                len == expected
                    && secret
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            }
        }
    }
}

/// Static metadata describing one provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// `None` for the free service.
    pub provider: Option<Provider>,
    /// Internal tag (e.g. `"groq"`).
    pub name: &'static str,
    /// Human-readable name for labels and logs.
    pub display_name: &'static str,
    /// Production endpoint. Gemini's contains a `{model}` slot; custom has none.
    pub default_endpoint: Option<&'static str>,
    pub auth: AuthScheme,
    /// `None` when keys have no recognisable format.
    pub signature: Option<KeySignature>,
}

// ─────────────────────────────────────────────
// Specs (in scan order)
// ─────────────────────────────────────────────

/// Every credential-backed provider, in the fixed scan order.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        provider: Some(Provider::OpenAi),
        name: "openai",
        display_name: "OpenAI",
        default_endpoint: Some("https://api.openai.com/v1/chat/completions"),
        auth: AuthScheme::Bearer,
        signature: Some(KeySignature::Prefix {
            prefix: "sk-",
            longer_than: 40,
        }),
    },
    ProviderSpec {
        provider: Some(Provider::Claude),
        name: "claude",
        display_name: "Claude",
        default_endpoint: Some("https://api.anthropic.com/v1/messages"),
        auth: AuthScheme::ApiKeyHeader,
        signature: Some(KeySignature::Prefix {
            prefix: "sk-ant-",
            longer_than: 30,
        }),
    },
    ProviderSpec {
        provider: Some(Provider::Gemini),
        name: "gemini",
        display_name: "Google Gemini",
        default_endpoint: Some(
            "https://generativelanguage.googleapis.com/v1/models/{model}:generateContent",
        ),
        auth: AuthScheme::QueryKey,
        signature: Some(KeySignature::UrlSafe { len: 39 }),
    },
    ProviderSpec {
        provider: Some(Provider::Cohere),
        name: "cohere",
        display_name: "Cohere",
        default_endpoint: Some("https://api.cohere.com/v1/chat"),
        auth: AuthScheme::Bearer,
        signature: Some(KeySignature::Prefix {
            prefix: "cohere_",
            longer_than: 30,
        }),
    },
    ProviderSpec {
        provider: Some(Provider::Groq),
        name: "groq",
        display_name: "Groq",
        default_endpoint: Some("https://api.groq.com/openai/v1/chat/completions"),
        auth: AuthScheme::Bearer,
        signature: Some(KeySignature::Prefix {
            prefix: "gsk_",
            longer_than: 30,
        }),
    },
    ProviderSpec {
        provider: Some(Provider::Custom),
        name: "custom",
        display_name: "Custom API",
        default_endpoint: None,
        auth: AuthScheme::Bearer,
        signature: None,
    },
];

/// The no-credential default service.
pub static FREE_PROVIDER: ProviderSpec = ProviderSpec {
    provider: None,
    name: "free",
    display_name: "Pollinations AI (Free)",
    default_endpoint: Some("https://text.pollinations.ai?model=mistral"),
    auth: AuthScheme::None,
    signature: None,
};

/// Key-format sniffing order; first match wins.
const DETECTION_ORDER: [Provider; 5] = [
    Provider::Claude,
    Provider::OpenAi,
    Provider::Groq,
    Provider::Cohere,
    Provider::Gemini,
];

// ─────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────

/// Provider tags in scan order.
pub fn list_providers() -> Vec<Provider> {
    PROVIDERS.iter().filter_map(|s| s.provider).collect()
}

/// Find a spec by tag (`"openai"`, `"free"`, …).
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    let name = name.to_ascii_lowercase();
    if name == FREE_PROVIDER.name {
        return Some(&FREE_PROVIDER);
    }
    PROVIDERS.iter().find(|s| s.name == name)
}

pub fn spec_for(provider: Provider) -> &'static ProviderSpec {
    PROVIDERS
        .iter()
        .find(|s| s.provider == Some(provider))
        .unwrap_or(&PROVIDERS[0])
}

/// Infer a provider from a raw key. `None` means unknown (or custom).
pub fn detect(secret: &str) -> Option<Provider> {
    let secret = secret.trim();
    DETECTION_ORDER.into_iter().find(|p| {
        spec_for(*p)
            .signature
            .is_some_and(|signature| signature.matches(secret))
    })
}

/// Provider to dispatch to: the preference while its credential exists,
/// else the first provider in scan order holding a credential, else `None`
/// (meaning the free service).
pub async fn active_provider(vault: &CredentialVault) -> Option<Provider> {
    if let Some(preferred) = vault.preferred().await {
        if vault.has_credential(preferred).await {
            debug!(provider = %preferred, "Using preferred provider");
            return Some(preferred);
        }
        debug!(provider = %preferred, "Preferred provider has no credential, scanning");
    }

    for provider in list_providers() {
        if vault.has_credential(provider).await {
            debug!(provider = %provider, "Using first provider with a credential");
            return Some(provider);
        }
    }
    None
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
