//! Bilingual (English/Irish) content resolution.
//!
//! Every entity carries parallel English and Irish text fields. Callers pass
//! the requested [`Language`] explicitly; there is no ambient "current
//! language". All field pairs go through [`BilingualText::resolve`], with an
//! optional gate that can veto the Irish variant.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// A supported content language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ga")]
    Irish,
}

impl Language {
    /// Parse a language code (`"en"`, `"ga"`, `"ga-IE"`, ...).
    ///
    /// Anything that is not recognisably Irish resolves to English, which is
    /// the site's fallback language.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ga" => Language::Irish,
            _ => Language::English,
        }
    }

    /// Like [`Language::from_code`] but treats a missing code as English.
    pub fn from_optional(code: Option<&str>) -> Self {
        code.map(Self::from_code).unwrap_or_default()
    }

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Irish => "ga",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// An English value paired with its optional Irish translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BilingualText<'a> {
    pub en: &'a str,
    pub ga: Option<&'a str>,
}

impl<'a> BilingualText<'a> {
    pub fn new(en: &'a str, ga: Option<&'a str>) -> Self {
        Self { en, ga }
    }

    /// Pick the Irish value when Irish is requested and a non-blank
    /// translation exists; otherwise the English value.
    pub fn resolve(self, language: Language) -> &'a str {
        self.resolve_gated(language, true)
    }

    /// As [`resolve`](Self::resolve), but the Irish value is only eligible
    /// when `irish_allowed` is true.
    pub fn resolve_gated(self, language: Language, irish_allowed: bool) -> &'a str {
        match (language, self.ga) {
            (Language::Irish, Some(ga)) if irish_allowed && !ga.trim().is_empty() => ga,
            _ => self.en,
        }
    }
}

/// Resolve an Action's progress `update` text for public display.
///
/// Unapproved progress text never leaks: the result is empty whenever
/// `is_approved` is false, in every language. The Irish text additionally
/// requires `is_ga_approved`.
pub fn resolve_update<'a>(
    update: &'a str,
    update_ga: Option<&'a str>,
    language: Language,
    is_approved: bool,
    is_ga_approved: bool,
) -> &'a str {
    if !is_approved {
        return "";
    }
    BilingualText::new(update, update_ga).resolve_gated(language, is_ga_approved)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_recognises_irish_variants() {
        assert_eq!(Language::from_code("ga"), Language::Irish);
        assert_eq!(Language::from_code("GA"), Language::Irish);
        assert_eq!(Language::from_code("ga-IE"), Language::Irish);
        assert_eq!(Language::from_code("ga_IE"), Language::Irish);
    }

    #[test]
    fn from_code_falls_back_to_english() {
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("fr"), Language::English);
        assert_eq!(Language::from_code(""), Language::English);
        assert_eq!(Language::from_optional(None), Language::English);
    }

    #[test]
    fn language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Irish).unwrap(), "\"ga\"");
        assert_eq!(Language::English.code(), "en");
    }

    #[test]
    fn resolve_prefers_irish_when_present() {
        let text = BilingualText::new("Digital Services", Some("Seirbhísí Digiteacha"));
        assert_eq!(text.resolve(Language::Irish), "Seirbhísí Digiteacha");
        assert_eq!(text.resolve(Language::English), "Digital Services");
    }

    #[test]
    fn resolve_falls_back_on_missing_or_blank_irish() {
        assert_eq!(BilingualText::new("EN", None).resolve(Language::Irish), "EN");
        assert_eq!(BilingualText::new("EN", Some("")).resolve(Language::Irish), "EN");
        assert_eq!(BilingualText::new("EN", Some("   ")).resolve(Language::Irish), "EN");
    }

    #[test]
    fn gate_vetoes_irish() {
        let text = BilingualText::new("EN", Some("GA"));
        assert_eq!(text.resolve_gated(Language::Irish, false), "EN");
        assert_eq!(text.resolve_gated(Language::Irish, true), "GA");
    }

    #[test]
    fn update_hidden_when_not_approved_in_every_language() {
        for language in [Language::English, Language::Irish] {
            for ga_approved in [false, true] {
                assert_eq!(
                    resolve_update("Visible update", Some("GA"), language, false, ga_approved),
                    ""
                );
            }
        }
    }

    #[test]
    fn update_irish_requires_ga_approval() {
        assert_eq!(
            resolve_update("English update", Some("Irish update"), Language::Irish, true, true),
            "Irish update"
        );
        assert_eq!(
            resolve_update("English update", Some("Irish update"), Language::Irish, true, false),
            "English update"
        );
    }

    #[test]
    fn update_irish_blank_falls_back_to_english() {
        assert_eq!(
            resolve_update("English update", Some(""), Language::Irish, true, true),
            "English update"
        );
    }

    #[test]
    fn update_empty_when_approved_but_blank() {
        assert_eq!(resolve_update("", None, Language::English, true, false), "");
    }
}
