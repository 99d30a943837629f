//! Where default template bodies come from.
//!
//! [`BuiltinSource`] serves the compiled-in catalogs. [`CatalogSource`] reads
//! `<dir>/<locale>/prompts.json` files shaped like
//! `{ "template1": { "content": "..." }, ... }` and falls back to the
//! built-ins for anything a file does not provide.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use textsmith_core::types::TemplateId;

use crate::builtin::{self, LocaleStrings};

/// Localized default templates.
pub trait TemplateSource: Send + Sync {
    /// Default body for `id` in `locale`, if this source has one.
    fn template(&self, id: TemplateId, locale: &str) -> Option<String>;

    /// Missing-input strings and truncation notice for `locale`.
    fn strings(&self, locale: &str) -> Option<LocaleStrings>;

    /// Locales this source knows about.
    fn locales(&self) -> Vec<String>;
}

/// Compiled-in `en` and `tr` catalogs.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinSource;

impl TemplateSource for BuiltinSource {
    fn template(&self, id: TemplateId, locale: &str) -> Option<String> {
        builtin::catalog(locale).map(|c| c.template(id).to_string())
    }

    fn strings(&self, locale: &str) -> Option<LocaleStrings> {
        builtin::catalog(locale).map(|c| c.strings())
    }

    fn locales(&self) -> Vec<String> {
        vec!["en".to_string(), "tr".to_string()]
    }
}

// ─────────────────────────────────────────────
// On-disk catalogs
// ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogStrings {
    untitled: Option<String>,
    no_instructions: Option<String>,
    truncation_notice: Option<String>,
}

#[derive(Debug, Default)]
struct LocaleCatalog {
    templates: HashMap<TemplateId, String>,
    strings: Option<CatalogStrings>,
}

/// Catalog files loaded once from a directory tree.
#[derive(Debug, Default)]
pub struct CatalogSource {
    catalogs: HashMap<String, LocaleCatalog>,
}

impl CatalogSource {
    /// Load every `<dir>/<locale>/prompts.json`. Malformed files are skipped
    /// with a warning; a missing directory is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("reading template directory {}", dir.display()))?;

        let mut catalogs = HashMap::new();
        for entry in entries.flatten() {
            let path = entry.path().join("prompts.json");
            if !path.is_file() {
                continue;
            }
            let locale = entry.file_name().to_string_lossy().to_ascii_lowercase();
            match Self::parse_file(&path) {
                Ok(catalog) => {
                    debug!(
                        locale = %locale,
                        templates = catalog.templates.len(),
                        "Loaded prompt catalog"
                    );
                    catalogs.insert(locale, catalog);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping prompt catalog"),
            }
        }

        Ok(Self { catalogs })
    }

    fn parse_file(path: &Path) -> Result<LocaleCatalog> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<LocaleCatalog> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(content)?;
        let mut catalog = LocaleCatalog::default();

        for (key, value) in raw {
            if key == "strings" {
                catalog.strings = Some(serde_json::from_value(value)?);
                continue;
            }
            let Ok(id) = key.parse::<TemplateId>() else {
                debug!(key = %key, "Ignoring unknown catalog key");
                continue;
            };
            let entry: CatalogEntry = serde_json::from_value(value)?;
            catalog.templates.insert(id, entry.content);
        }
        Ok(catalog)
    }

    fn lookup(&self, locale: &str) -> Option<&LocaleCatalog> {
        let locale = locale.to_ascii_lowercase();
        self.catalogs.get(&locale).or_else(|| {
            let lang = locale.split(['-', '_']).next()?;
            self.catalogs.get(lang)
        })
    }
}

impl TemplateSource for CatalogSource {
    fn template(&self, id: TemplateId, locale: &str) -> Option<String> {
        self.lookup(locale)
            .and_then(|c| c.templates.get(&id).cloned())
            .or_else(|| BuiltinSource.template(id, locale))
    }

    fn strings(&self, locale: &str) -> Option<LocaleStrings> {
        let base = BuiltinSource
            .strings(locale)
            .unwrap_or_else(|| builtin::default_catalog().strings());
        let Some(overrides) = self.lookup(locale).and_then(|c| c.strings.as_ref()) else {
            return BuiltinSource.strings(locale);
        };
        Some(LocaleStrings {
            untitled: overrides.untitled.clone().unwrap_or(base.untitled),
            no_instructions: overrides
                .no_instructions
                .clone()
                .unwrap_or(base.no_instructions),
            truncation_notice: overrides
                .truncation_notice
                .clone()
                .unwrap_or(base.truncation_notice),
        })
    }

    fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.catalogs.keys().cloned().collect();
        for builtin in BuiltinSource.locales() {
            if !locales.contains(&builtin) {
                locales.push(builtin);
            }
        }
        locales.sort();
        locales
    }
}
