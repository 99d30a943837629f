//! Credential vault — per-provider secrets kept obfuscated at rest.
//!
//! Secrets are XOR-ed with a repeating 32-byte key and base64 encoded before
//! they reach the store. This hides keys from casual inspection of the store
//! file; it is obfuscation, not security. Anyone holding the key file (or the
//! process memory) can recover every secret.
//!
//! By default the key is generated per process, so values written by an
//! earlier process decode to `None` instead of garbage: a magic prefix is
//! mixed into every encoded value and checked on read. Callers that need
//! secrets to survive restarts use [`ObfuscationKey::load_or_create`].
//!
//! Storage layout:
//! - `credential:<provider>` — obfuscated secret
//! - `credential:<provider>:endpoint` / `:model` — custom endpoint, plain text
//! - `selected_provider` — preferred provider tag

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::storage::KeyValueStore;
use crate::types::{Credentials, CustomEndpoint, Provider};
use crate::utils::mask_secret;

const KEY_LEN: usize = 32;
const MAGIC: &[u8] = b"tsv1:";
const PREFERENCE_KEY: &str = "selected_provider";
const EVENT_CAPACITY: usize = 32;

// ─────────────────────────────────────────────
// Obfuscation key
// ─────────────────────────────────────────────

/// Repeating XOR key.
#[derive(Clone, PartialEq, Eq)]
pub struct ObfuscationKey([u8; KEY_LEN]);

impl ObfuscationKey {
    /// Fresh random key for this process.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Read a base64 key file, or create one with a fresh key.
    ///
    /// An unreadable or malformed file is replaced, which orphans every secret
    /// encoded with the old key (they decode to `None`).
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if let Ok(content) = std::fs::read_to_string(path) {
            match STANDARD.decode(content.trim()) {
                Ok(bytes) if bytes.len() == KEY_LEN => {
                    let mut key = [0u8; KEY_LEN];
                    key.copy_from_slice(&bytes);
                    debug!(path = %path.display(), "Loaded vault key");
                    return Ok(Self(key));
                }
                _ => warn!(path = %path.display(), "Vault key file is malformed, regenerating"),
            }
        }

        let key = Self::generate();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, STANDARD.encode(key.0))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "Created new vault key");
        Ok(key)
    }

    fn apply(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .zip(self.0.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }

    pub fn encode(&self, secret: &str) -> String {
        let mut plain = Vec::with_capacity(MAGIC.len() + secret.len());
        plain.extend_from_slice(MAGIC);
        plain.extend_from_slice(secret.as_bytes());
        STANDARD.encode(self.apply(&plain))
    }

    /// `None` on bad base64, a foreign key, or invalid UTF-8.
    pub fn decode(&self, encoded: &str) -> Option<String> {
        let raw = STANDARD.decode(encoded.trim()).ok()?;
        let plain = self.apply(&raw);
        let body = plain.strip_prefix(MAGIC)?;
        String::from_utf8(body.to_vec()).ok()
    }
}

impl std::fmt::Debug for ObfuscationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ObfuscationKey(..)")
    }
}

// ─────────────────────────────────────────────
// Vault
// ─────────────────────────────────────────────

/// Change notification for live listeners (UI, status views).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultEvent {
    CredentialSaved(Provider),
    CredentialDeleted(Provider),
    PreferenceChanged(Option<Provider>),
}

/// Process-wide credential store.
///
/// Writes to different providers are independent. No read-then-invoke
/// atomicity is offered: a concurrent delete may land mid-dispatch.
pub struct CredentialVault {
    store: Arc<dyn KeyValueStore>,
    key: ObfuscationKey,
    events: broadcast::Sender<VaultEvent>,
}

fn secret_key(provider: Provider) -> String {
    format!("credential:{}", provider.as_str())
}

fn endpoint_key(provider: Provider) -> String {
    format!("credential:{}:endpoint", provider.as_str())
}

fn model_key(provider: Provider) -> String {
    format!("credential:{}:model", provider.as_str())
}

impl CredentialVault {
    pub fn new(store: Arc<dyn KeyValueStore>, key: ObfuscationKey) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, key, events }
    }

    /// Vault with a per-process random key.
    pub fn ephemeral(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, ObfuscationKey::generate())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<VaultEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: VaultEvent) {
        // No receivers is fine: notifications are advisory.
        let _ = self.events.send(event);
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Credential store read failed");
                None
            }
        }
    }

    /// Store (or overwrite) a provider's secret, byte for byte. An empty
    /// secret reads back as absent.
    ///
    /// For [`Provider::Custom`] an endpoint is also recorded when supplied;
    /// an existing endpoint is kept when it is not.
    pub async fn put(
        &self,
        provider: Provider,
        secret: &str,
        endpoint: Option<CustomEndpoint>,
    ) -> Result<()> {
        self.store
            .set(&secret_key(provider), self.key.encode(secret))
            .await?;

        if let Some(endpoint) = endpoint {
            if provider == Provider::Custom {
                self.store.set(&endpoint_key(provider), endpoint.url).await?;
                match endpoint.model.filter(|m| !m.is_empty()) {
                    Some(model) => self.store.set(&model_key(provider), model).await?,
                    None => self.store.remove(&model_key(provider)).await?,
                }
            } else {
                warn!(provider = %provider, "Endpoint ignored for non-custom provider");
            }
        }

        info!(provider = %provider, "Credential saved");
        self.notify(VaultEvent::CredentialSaved(provider));
        Ok(())
    }

    /// Decoded secret, or `None` when absent or undecodable.
    pub async fn get(&self, provider: Provider) -> Option<String> {
        let encoded = self.read(&secret_key(provider)).await?;
        let decoded = self.key.decode(&encoded);
        if decoded.is_none() {
            warn!(provider = %provider, "Stored credential could not be decoded");
        }
        decoded.filter(|s| !s.is_empty())
    }

    /// Remove the secret and endpoint; clears the preference if it named
    /// this provider.
    pub async fn delete(&self, provider: Provider) -> Result<()> {
        let keys = [
            secret_key(provider),
            endpoint_key(provider),
            model_key(provider),
        ];
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.store.remove_many(&refs).await?;
        info!(provider = %provider, "Credential deleted");
        self.notify(VaultEvent::CredentialDeleted(provider));

        if self.preferred().await == Some(provider) {
            self.store.remove(PREFERENCE_KEY).await?;
            self.notify(VaultEvent::PreferenceChanged(None));
        }
        Ok(())
    }

    /// `"..." + last 4 chars`, `None` when absent or too short to mask.
    pub async fn mask(&self, provider: Provider) -> Option<String> {
        self.get(provider).await.as_deref().and_then(mask_secret)
    }

    pub async fn has_credential(&self, provider: Provider) -> bool {
        self.get(provider).await.is_some()
    }

    pub async fn custom_endpoint(&self, provider: Provider) -> Option<CustomEndpoint> {
        let url = self.read(&endpoint_key(provider)).await?;
        if url.trim().is_empty() {
            return None;
        }
        let model = self.read(&model_key(provider)).await;
        Some(CustomEndpoint { url, model })
    }

    /// Secret plus endpoint, ready for an adapter.
    pub async fn credentials(&self, provider: Provider) -> Option<Credentials> {
        let secret = self.get(provider).await?;
        let mut creds = Credentials::new(secret);
        creds.endpoint = self.custom_endpoint(provider).await;
        Some(creds)
    }

    pub async fn preferred(&self) -> Option<Provider> {
        let tag = self.read(PREFERENCE_KEY).await?;
        match tag.parse() {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!(tag = %tag, error = %e, "Ignoring unknown preferred provider");
                None
            }
        }
    }

    /// Set or clear the preference. A provider without a credential clears
    /// it instead. Returns the preference now in effect.
    pub async fn set_preferred(&self, provider: Option<Provider>) -> Result<Option<Provider>> {
        let effective = match provider {
            Some(p) if self.has_credential(p).await => Some(p),
            Some(p) => {
                debug!(provider = %p, "No credential for requested preference, clearing");
                None
            }
            None => None,
        };

        match effective {
            Some(p) => {
                self.store
                    .set(PREFERENCE_KEY, p.as_str().to_string())
                    .await?
            }
            None => self.store.remove(PREFERENCE_KEY).await?,
        }
        self.notify(VaultEvent::PreferenceChanged(effective));
        Ok(effective)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn vault() -> (Arc<MemoryStore>, CredentialVault) {
        let store = Arc::new(MemoryStore::new());
        let vault = CredentialVault::ephemeral(store.clone());
        (store, vault)
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let (_, vault) = vault();
        vault
            .put(Provider::Groq, "gsk_abcdefghijklmnopqrstuvwxyz123456", None)
            .await
            .unwrap();
        assert_eq!(
            vault.get(Provider::Groq).await.as_deref(),
            Some("gsk_abcdefghijklmnopqrstuvwxyz123456")
        );
        assert_eq!(vault.get(Provider::OpenAi).await, None);
    }

    #[tokio::test]
    async fn test_put_get_keeps_surrounding_whitespace() {
        let (_, vault) = vault();
        vault.put(Provider::Cohere, "  padded key \n", None).await.unwrap();
        assert_eq!(vault.get(Provider::Cohere).await.as_deref(), Some("  padded key \n"));

        vault.put(Provider::Cohere, "", None).await.unwrap();
        assert_eq!(vault.get(Provider::Cohere).await, None);
        assert!(!vault.has_credential(Provider::Cohere).await);
    }

    #[tokio::test]
    async fn test_stored_value_is_not_plain_text() {
        let (store, vault) = vault();
        vault.put(Provider::OpenAi, "sk-plainsecret", None).await.unwrap();
        let raw = store.get("credential:openai").await.unwrap().unwrap();
        assert!(!raw.contains("plainsecret"));
    }

    #[tokio::test]
    async fn test_foreign_key_fails_soft() {
        let store = Arc::new(MemoryStore::new());
        let first = CredentialVault::ephemeral(store.clone());
        first.put(Provider::Claude, "sk-ant-secret", None).await.unwrap();

        let second = CredentialVault::ephemeral(store);
        assert_eq!(second.get(Provider::Claude).await, None);
        assert!(!second.has_credential(Provider::Claude).await);
    }

    #[tokio::test]
    async fn test_garbage_value_fails_soft() {
        let (store, vault) = vault();
        store
            .set("credential:cohere", "!!not-base64!!".into())
            .await
            .unwrap();
        assert_eq!(vault.get(Provider::Cohere).await, None);
    }

    #[tokio::test]
    async fn test_shared_key_survives_new_vault() {
        let store = Arc::new(MemoryStore::new());
        let key = ObfuscationKey::from_bytes([7u8; KEY_LEN]);
        CredentialVault::new(store.clone(), key.clone())
            .put(Provider::Cohere, "cohere_secret", None)
            .await
            .unwrap();
        let again = CredentialVault::new(store, key);
        assert_eq!(again.get(Provider::Cohere).await.as_deref(), Some("cohere_secret"));
    }

    #[tokio::test]
    async fn test_mask() {
        let (_, vault) = vault();
        assert_eq!(vault.mask(Provider::OpenAi).await, None);
        vault.put(Provider::OpenAi, "sk-1234567890wxyz", None).await.unwrap();
        assert_eq!(vault.mask(Provider::OpenAi).await.as_deref(), Some("...wxyz"));
        vault.put(Provider::Groq, "abcd", None).await.unwrap();
        assert_eq!(vault.mask(Provider::Groq).await, None);
    }

    #[tokio::test]
    async fn test_custom_endpoint_round_trip() {
        let (_, vault) = vault();
        let endpoint = CustomEndpoint {
            url: "https://llm.example.com/v1/chat".into(),
            model: Some("my-model".into()),
        };
        vault
            .put(Provider::Custom, "token", Some(endpoint.clone()))
            .await
            .unwrap();
        assert_eq!(vault.custom_endpoint(Provider::Custom).await, Some(endpoint.clone()));

        let creds = vault.credentials(Provider::Custom).await.unwrap();
        assert_eq!(creds.secret, "token");
        assert_eq!(creds.endpoint, Some(endpoint));

        // Re-saving without an endpoint keeps the old one.
        vault.put(Provider::Custom, "token2", None).await.unwrap();
        assert!(vault.custom_endpoint(Provider::Custom).await.is_some());

        vault.delete(Provider::Custom).await.unwrap();
        assert_eq!(vault.custom_endpoint(Provider::Custom).await, None);
    }

    #[tokio::test]
    async fn test_endpoint_ignored_for_other_providers() {
        let (store, vault) = vault();
        let endpoint = CustomEndpoint {
            url: "https://x".into(),
            model: None,
        };
        vault.put(Provider::OpenAi, "sk-x", Some(endpoint)).await.unwrap();
        assert_eq!(store.get("credential:openai:endpoint").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_preference_requires_credential() {
        let (_, vault) = vault();
        assert_eq!(vault.set_preferred(Some(Provider::Groq)).await.unwrap(), None);
        assert_eq!(vault.preferred().await, None);

        vault.put(Provider::Groq, "gsk_x", None).await.unwrap();
        assert_eq!(
            vault.set_preferred(Some(Provider::Groq)).await.unwrap(),
            Some(Provider::Groq)
        );
        assert_eq!(vault.preferred().await, Some(Provider::Groq));
    }

    #[tokio::test]
    async fn test_delete_clears_matching_preference_only() {
        let (_, vault) = vault();
        vault.put(Provider::Groq, "gsk_x", None).await.unwrap();
        vault.put(Provider::OpenAi, "sk-x", None).await.unwrap();
        vault.set_preferred(Some(Provider::Groq)).await.unwrap();

        vault.delete(Provider::OpenAi).await.unwrap();
        assert_eq!(vault.preferred().await, Some(Provider::Groq));

        vault.delete(Provider::Groq).await.unwrap();
        assert_eq!(vault.preferred().await, None);
    }

    #[tokio::test]
    async fn test_events_are_broadcast() {
        let (_, vault) = vault();
        let mut rx = vault.subscribe();
        vault.put(Provider::Gemini, "key", None).await.unwrap();
        vault.set_preferred(Some(Provider::Gemini)).await.unwrap();
        vault.delete(Provider::Gemini).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), VaultEvent::CredentialSaved(Provider::Gemini));
        assert_eq!(
            rx.recv().await.unwrap(),
            VaultEvent::PreferenceChanged(Some(Provider::Gemini))
        );
        assert_eq!(rx.recv().await.unwrap(), VaultEvent::CredentialDeleted(Provider::Gemini));
        assert_eq!(rx.recv().await.unwrap(), VaultEvent::PreferenceChanged(None));
    }

    #[test]
    fn test_key_file_load_or_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys").join("vault.key");
        let first = ObfuscationKey::load_or_create(&path).unwrap();
        let second = ObfuscationKey::load_or_create(&path).unwrap();
        assert_eq!(first, second);

        std::fs::write(&path, "short").unwrap();
        let third = ObfuscationKey::load_or_create(&path).unwrap();
        assert_ne!(first, third);
    }

    #[test]
    fn test_decode_handles_unicode() {
        let key = ObfuscationKey::generate();
        let encoded = key.encode("şifre-ğüı");
        assert_eq!(key.decode(&encoded).as_deref(), Some("şifre-ğüı"));
    }
}
