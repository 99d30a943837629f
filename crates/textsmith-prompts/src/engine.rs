//! Prompt rendering with a length budget.
//!
//! Rendering never fails: a broken override store or a locale without a
//! catalog degrades to the next template source, ending at the built-in
//! `en` catalog.

use std::borrow::Cow;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use textsmith_core::types::{ProcessingIntent, ProcessingStyle, TemplateId};

use crate::builtin::{self, LocaleStrings};
use crate::overrides::TemplateOverrides;
use crate::source::TemplateSource;

/// Default budget for a rendered prompt on the free tier.
pub const MAX_PROMPT_LENGTH: usize = 6000;

/// Minimum characters reserved for the truncation notice when cutting the
/// selection. Longer notices reserve their own length.
const TRUNCATION_MARGIN: usize = 50;

// ─────────────────────────────────────────────
// Placeholders
// ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Text,
    Title,
    Instructions,
    Language,
    Nonce,
}

/// Accepted tokens. The Turkish spellings keep older custom templates working.
const TOKENS: &[(&str, Slot)] = &[
    ("{Selected_Text}", Slot::Text),
    ("{Seçilen_Metin}", Slot::Text),
    ("{Page_Title}", Slot::Title),
    ("{Sayfa_Başlığı}", Slot::Title),
    ("{Extra_Instructions}", Slot::Instructions),
    ("{Ek_Talimatlar}", Slot::Instructions),
    ("{Target_Language}", Slot::Language),
    ("{Hedef_Dil}", Slot::Language),
    ("{Randomness}", Slot::Nonce),
];

struct SlotValues<'a> {
    text: &'a str,
    title: &'a str,
    instructions: &'a str,
    language: &'a str,
    nonce: &'a str,
}

impl SlotValues<'_> {
    fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Text => self.text,
            Slot::Title => self.title,
            Slot::Instructions => self.instructions,
            Slot::Language => self.language,
            Slot::Nonce => self.nonce,
        }
    }
}

/// Replace every token in one pass, so substituted values are never
/// re-scanned for tokens.
fn fill(template: &str, values: &SlotValues<'_>) -> String {
    let mut out = String::with_capacity(template.len() + values.text.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match TOKENS.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, slot)) => {
                out.push_str(values.get(*slot));
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Number of places the selected text will be substituted into.
fn text_slots(template: &str) -> usize {
    let mut count = 0;
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        let tail = &rest[pos..];
        match TOKENS.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, slot)) => {
                if *slot == Slot::Text {
                    count += 1;
                }
                rest = &tail[token.len()..];
            }
            None => rest = &tail[1..],
        }
    }
    count
}

/// Cut `text` so it fits in `allowance` characters including the notice.
fn truncate_with_notice(text: &str, allowance: usize, notice: &str) -> String {
    let suffix = format!("\n\n{notice}");
    let suffix_len = suffix.chars().count();
    if suffix_len > allowance {
        return notice.chars().take(allowance).collect();
    }
    let keep = allowance.saturating_sub(suffix_len.max(TRUNCATION_MARGIN));
    let head: String = text.chars().take(keep).collect();
    format!("{head}{suffix}")
}

// ─────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────

/// Inputs for one rendered prompt.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    pub intent: ProcessingIntent,
    pub style: ProcessingStyle,
    pub selected_text: String,
    /// Blank or `None` renders the locale's "unspecified" string.
    pub page_title: Option<String>,
    /// Blank or `None` renders the locale's "none" string.
    pub extra_instructions: Option<String>,
    pub output_language: String,
    /// True when no provider resolves and the free service will be used.
    /// Only then is the selection truncated to fit the budget.
    pub free_tier: bool,
}

/// Where an effective template body came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateOrigin {
    Custom,
    Locale(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub id: TemplateId,
    pub body: String,
    pub origin: TemplateOrigin,
}

// ─────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────

pub struct PromptEngine {
    source: Arc<dyn TemplateSource>,
    overrides: Option<TemplateOverrides>,
    locale: String,
    fallback_locale: String,
    max_prompt_length: usize,
}

impl PromptEngine {
    pub fn new(source: Arc<dyn TemplateSource>, locale: impl Into<String>) -> Self {
        Self {
            source,
            overrides: None,
            locale: locale.into(),
            fallback_locale: builtin::DEFAULT_LOCALE.to_string(),
            max_prompt_length: MAX_PROMPT_LENGTH,
        }
    }

    pub fn with_overrides(mut self, overrides: TemplateOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    pub fn with_max_prompt_length(mut self, max: usize) -> Self {
        self.max_prompt_length = max;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn overrides(&self) -> Option<&TemplateOverrides> {
        self.overrides.as_ref()
    }

    /// Locales the template source can serve.
    pub fn supported_locales(&self) -> Vec<String> {
        self.source.locales()
    }

    /// Localized default: UI locale, then fallback locale, then built-in `en`.
    pub fn default_template(&self, id: TemplateId) -> ResolvedTemplate {
        for locale in [&self.locale, &self.fallback_locale] {
            if let Some(body) = self.source.template(id, locale) {
                return ResolvedTemplate {
                    id,
                    body,
                    origin: TemplateOrigin::Locale(locale.clone()),
                };
            }
        }
        let catalog = builtin::default_catalog();
        ResolvedTemplate {
            id,
            body: catalog.template(id).to_string(),
            origin: TemplateOrigin::Locale(catalog.locale.to_string()),
        }
    }

    /// Effective body for `id`: the user's override when present, else the
    /// localized default.
    pub async fn resolve_template(&self, id: TemplateId) -> ResolvedTemplate {
        if let Some(overrides) = &self.overrides {
            match overrides.get(id).await {
                Ok(Some(body)) => {
                    debug!(template = %id, "Using custom template");
                    return ResolvedTemplate {
                        id,
                        body,
                        origin: TemplateOrigin::Custom,
                    };
                }
                Ok(None) => {}
                Err(e) => warn!(template = %id, error = %e, "Custom template lookup failed"),
            }
        }
        self.default_template(id)
    }

    fn strings(&self) -> LocaleStrings {
        self.source
            .strings(&self.locale)
            .or_else(|| self.source.strings(&self.fallback_locale))
            .unwrap_or_else(|| builtin::default_catalog().strings())
    }

    /// Render the final prompt with a fresh six-digit nonce.
    pub async fn render(&self, request: &RenderRequest) -> String {
        let nonce = rand::thread_rng().gen_range(0..1_000_000u32);
        self.render_with_nonce(request, nonce).await
    }

    /// Render with a caller-chosen nonce.
    pub async fn render_with_nonce(&self, request: &RenderRequest, nonce: u32) -> String {
        let id = TemplateId::from_parts(request.intent, request.style);
        let template = self.resolve_template(id).await;
        let strings = self.strings();

        let title = non_blank(request.page_title.as_deref()).unwrap_or(strings.untitled.as_str());
        let instructions = non_blank(request.extra_instructions.as_deref())
            .unwrap_or(strings.no_instructions.as_str());

        // Zero-padded so the base length equals the final length minus the text.
        let nonce = format!("{:06}", nonce % 1_000_000);
        let base = SlotValues {
            text: "",
            title,
            instructions,
            language: &request.output_language,
            nonce: &nonce,
        };

        let base_length = fill(&template.body, &base).chars().count();
        let max_text_length = self.max_prompt_length.saturating_sub(base_length);
        let text_length = request.selected_text.chars().count();
        // Custom templates may repeat the text slot; split the allowance.
        let slots = text_slots(&template.body);

        let text: Cow<'_, str> = if request.free_tier
            && slots > 0
            && text_length * slots > max_text_length
        {
            let allowance = max_text_length / slots;
            let cut = truncate_with_notice(
                &request.selected_text,
                allowance,
                &strings.truncation_notice,
            );
            debug!(
                template = %id,
                text_length,
                slots,
                allowance,
                "Selection truncated for free tier"
            );
            Cow::Owned(cut)
        } else {
            Cow::Borrowed(request.selected_text.as_str())
        };

        fill(&template.body, &SlotValues { text: &text, ..base })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BuiltinSource;
    use textsmith_core::storage::MemoryStore;

    fn engine() -> PromptEngine {
        PromptEngine::new(Arc::new(BuiltinSource), "en")
    }

    fn request(text: &str, free_tier: bool) -> RenderRequest {
        RenderRequest {
            intent: ProcessingIntent::Improve,
            style: ProcessingStyle::Faithful,
            selected_text: text.to_string(),
            page_title: Some("Test Page".into()),
            extra_instructions: None,
            output_language: "English".into(),
            free_tier,
        }
    }

    #[test]
    fn test_fill_replaces_both_spellings() {
        let values = SlotValues {
            text: "T",
            title: "P",
            instructions: "I",
            language: "L",
            nonce: "000042",
        };
        let template = concat!(
            "{Selected_Text}|{Seçilen_Metin}|{Page_Title}|{Sayfa_Başlığı}|",
            "{Ek_Talimatlar}|{Hedef_Dil}|{Randomness}|{Unknown}",
        );
        let out = fill(template, &values);
        assert_eq!(out, "T|T|P|P|I|L|000042|{Unknown}");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let values = SlotValues {
            text: "{Page_Title}",
            title: "P",
            instructions: "",
            language: "",
            nonce: "",
        };
        assert_eq!(fill("[{Selected_Text}]", &values), "[{Page_Title}]");
    }

    #[tokio::test]
    async fn test_render_substitutes_defaults() {
        let mut req = request("Bu metin test içindir.", true);
        req.page_title = Some("   ".into());
        let out = engine().render(&req).await;
        assert!(out.contains("Bu metin test içindir."));
        assert!(out.contains("CONTEXT (Page Title): Unspecified"));
        assert!(out.contains("apply if present): None"));
        assert!(out.contains("OUTPUT LANGUAGE: English"));
        assert!(!out.contains("{Selected_Text}"));
    }

    #[tokio::test]
    async fn test_render_turkish_locale_defaults() {
        let engine = PromptEngine::new(Arc::new(BuiltinSource), "tr");
        let mut req = request("metin", false);
        req.page_title = None;
        let out = engine.render(&req).await;
        assert!(out.contains("BAĞLAM (Sayfa Başlığı): Belirtilmemiş"));
        assert!(out.contains("EK TALİMAT (Varsa uygula): Yok"));
    }

    #[tokio::test]
    async fn test_unknown_locale_falls_back() {
        let engine = PromptEngine::new(Arc::new(BuiltinSource), "ja");
        let resolved = engine.resolve_template(TemplateId::Template2).await;
        assert_eq!(resolved.origin, TemplateOrigin::Locale("en".into()));
    }

    #[tokio::test]
    async fn test_free_tier_truncates_within_budget() {
        let long = "a".repeat(10_000);
        for intent in ProcessingIntent::ALL {
            for style in ProcessingStyle::ALL {
                let mut req = request(&long, true);
                req.intent = intent;
                req.style = style;
                let out = engine().render(&req).await;
                assert!(out.chars().count() <= MAX_PROMPT_LENGTH);
                assert!(out.contains("[Text shortened because it was too long]"));
            }
        }
    }

    #[tokio::test]
    async fn test_repeated_text_slot_stays_within_budget() {
        let overrides = TemplateOverrides::new(Arc::new(MemoryStore::new()));
        overrides
            .set(TemplateId::Template1, "A: {Selected_Text}\nB: {Seçilen_Metin}")
            .await
            .unwrap();
        let engine = engine().with_overrides(overrides);

        let out = engine.render(&request(&"x".repeat(10_000), true)).await;
        assert!(out.chars().count() <= MAX_PROMPT_LENGTH);
        assert_eq!(out.matches("[Text shortened because it was too long]").count(), 2);
    }

    /// Built-in templates with a caller-chosen truncation notice.
    struct LongNoticeSource(String);

    impl TemplateSource for LongNoticeSource {
        fn template(&self, id: TemplateId, locale: &str) -> Option<String> {
            BuiltinSource.template(id, locale)
        }

        fn strings(&self, _locale: &str) -> Option<LocaleStrings> {
            Some(LocaleStrings {
                truncation_notice: self.0.clone(),
                ..builtin::default_catalog().strings()
            })
        }

        fn locales(&self) -> Vec<String> {
            vec!["en".to_string()]
        }
    }

    #[tokio::test]
    async fn test_long_catalog_notice_reserves_its_length() {
        let notice = format!("[{}]", "n".repeat(300));
        let engine = PromptEngine::new(Arc::new(LongNoticeSource(notice.clone())), "en");

        let out = engine.render(&request(&"y".repeat(10_000), true)).await;
        assert!(out.chars().count() <= MAX_PROMPT_LENGTH);
        assert!(out.contains(&notice));
    }

    #[test]
    fn test_truncate_with_notice_bounds() {
        let cut = truncate_with_notice(&"z".repeat(500), 100, "NOTICE");
        assert_eq!(cut.chars().count(), 100 - TRUNCATION_MARGIN + "\n\nNOTICE".len());
        assert!(cut.ends_with("\n\nNOTICE"));

        // Too small for the notice itself: the notice is cut instead.
        assert_eq!(truncate_with_notice("abc", 3, "NOTICE"), "NOT");
        assert_eq!(text_slots("{Selected_Text} {Page_Title} {Seçilen_Metin}"), 2);
    }

    #[tokio::test]
    async fn test_paid_provider_never_truncates() {
        let long = "b".repeat(10_000);
        let out = engine().render(&request(&long, false)).await;
        assert!(out.contains(&long));
        assert!(!out.contains("[Text shortened"));
        assert!(out.chars().count() > MAX_PROMPT_LENGTH);
    }

    #[tokio::test]
    async fn test_short_text_untouched_on_free_tier() {
        let out = engine().render(&request("short", true)).await;
        assert!(out.contains("TEXT TO PROCESS: short"));
        assert!(!out.contains("[Text shortened"));
    }

    #[tokio::test]
    async fn test_truncation_counts_characters() {
        let engine = engine().with_max_prompt_length(4000);
        let text = "ş".repeat(5000);
        let out = engine.render(&request(&text, true)).await;
        assert!(out.chars().count() <= 4000);
        assert!(out.len() > 4000); // multi-byte chars
    }

    #[tokio::test]
    async fn test_override_takes_precedence_and_reset_restores() {
        let overrides = TemplateOverrides::new(Arc::new(MemoryStore::new()));
        let engine = engine().with_overrides(overrides.clone());

        overrides
            .set(TemplateId::Template5, "Summarise {Selected_Text} in {Target_Language}")
            .await
            .unwrap();
        let mut req = request("abc", false);
        req.intent = ProcessingIntent::Summarize;
        assert_eq!(engine.render(&req).await, "Summarise abc in English");

        overrides.reset(TemplateId::Template5).await.unwrap();
        let resolved = engine.resolve_template(TemplateId::Template5).await;
        assert_eq!(resolved.origin, TemplateOrigin::Locale("en".into()));
    }

    #[tokio::test]
    async fn test_preview_idempotent_apart_from_nonce() {
        let overrides = TemplateOverrides::new(Arc::new(MemoryStore::new()));
        overrides
            .set(TemplateId::Template1, "{Selected_Text} #{Randomness}")
            .await
            .unwrap();
        let engine = engine().with_overrides(overrides);
        let req = request("same", true);

        let a = engine.render_with_nonce(&req, 7).await;
        let b = engine.render_with_nonce(&req, 123456).await;
        assert_eq!(a, "same #000007");
        assert_eq!(b, "same #123456");

        let strip = |s: &str| s.rsplit_once('#').map(|(head, _)| head.to_string());
        let c = engine.render(&req).await;
        let d = engine.render(&req).await;
        assert_eq!(strip(&c), strip(&d));
        assert_eq!(c.chars().count(), d.chars().count());
    }
}
