//! Translation lookup keyed by opaque message codes.
//!
//! Handlers never reach for a global translator: an implementation of
//! [`Translate`] is built once at startup and passed through application
//! state. [`Catalog`] is the built-in implementation backed by the JSON
//! files under `locales/`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Fr, Locale::Es];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Es => "es",
        }
    }

    /// Match a BCP 47 tag on its primary subtag (`fr-CA` -> `fr`), ignoring case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(primary))
    }

    /// Pick the response locale: `lng` query parameter, then the first
    /// supported `Accept-Language` entry in header order, then `fallback`.
    pub fn negotiate(query: Option<&str>, accept_language: Option<&str>, fallback: Locale) -> Self {
        if let Some(locale) = query.and_then(Self::from_tag) {
            return locale;
        }

        accept_language
            .into_iter()
            .flat_map(|header| header.split(','))
            .filter_map(|entry| entry.split(';').next())
            .find_map(Self::from_tag)
            .unwrap_or(fallback)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message lookup by locale and code.
///
/// Missing messages fall back to English, then to the code itself.
pub trait Translate: Send + Sync {
    /// Raw template for `code` in exactly `locale`, without fallback.
    fn lookup(&self, locale: Locale, code: &str) -> Option<&str>;

    fn translate(&self, locale: Locale, code: &str) -> String {
        self.translate_with(locale, code, &[])
    }

    /// Translate and substitute `{{name}}` placeholders from `args`.
    fn translate_with(&self, locale: Locale, code: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .lookup(locale, code)
            .or_else(|| self.lookup(Locale::En, code))
            .unwrap_or(code);
        interpolate(template, args)
    }
}

fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{{{name}}}}}"), value)
    })
}

/// In-memory message catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<Locale, HashMap<String, String>>,
}

impl Catalog {
    /// Catalog with the locale files shipped in the crate.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_sources(&[
            (Locale::En, include_str!("../locales/en.json")),
            (Locale::Fr, include_str!("../locales/fr.json")),
            (Locale::Es, include_str!("../locales/es.json")),
        ])
    }

    /// Build a catalog from nested JSON documents.
    ///
    /// Nested objects are flattened into dotted codes, so
    /// `{"games": {"list_success": "..."}}` defines `games.list_success`.
    pub fn from_sources(sources: &[(Locale, &str)]) -> Result<Self, CoreError> {
        let mut messages = HashMap::new();

        for (locale, source) in sources {
            let tree: Value = serde_json::from_str(source).map_err(|e| {
                CoreError::Internal(format!("invalid locale file for {locale}: {e}"))
            })?;

            let mut flat = HashMap::new();
            flatten("", &tree, &mut flat);
            messages.insert(*locale, flat);
        }

        Ok(Self { messages })
    }
}

impl Translate for Catalog {
    fn lookup(&self, locale: Locale, code: &str) -> Option<&str> {
        self.messages
            .get(&locale)
            .and_then(|m| m.get(code))
            .map(String::as_str)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let code = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&code, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_sources(&[
            (
                Locale::En,
                r#"{"welcome": "Welcome", "errors": {"game_not_found": "Game not found"},
                    "validation": {"too_long": "{{field}} must be at most {{max}} characters"}}"#,
            ),
            (Locale::Fr, r#"{"welcome": "Bienvenue"}"#),
        ])
        .unwrap()
    }

    #[test]
    fn translates_in_requested_locale() {
        assert_eq!(catalog().translate(Locale::Fr, "welcome"), "Bienvenue");
    }

    #[test]
    fn nested_codes_are_flattened() {
        assert_eq!(
            catalog().translate(Locale::En, "errors.game_not_found"),
            "Game not found"
        );
    }

    #[test]
    fn falls_back_to_english_then_code() {
        let catalog = catalog();
        assert_eq!(
            catalog.translate(Locale::Fr, "errors.game_not_found"),
            "Game not found"
        );
        assert_eq!(catalog.translate(Locale::Es, "no.such.code"), "no.such.code");
    }

    #[test]
    fn interpolates_placeholders() {
        assert_eq!(
            catalog().translate_with(
                Locale::En,
                "validation.too_long",
                &[("field", "title"), ("max", "255")]
            ),
            "title must be at most 255 characters"
        );
    }

    #[test]
    fn builtin_catalog_covers_every_locale() {
        let catalog = Catalog::builtin().unwrap();
        for locale in Locale::ALL {
            assert!(catalog.lookup(locale, "welcome").is_some(), "{locale}");
            assert!(catalog.lookup(locale, "errors.game_not_found").is_some(), "{locale}");
            assert!(catalog.lookup(locale, "games.list_success").is_some(), "{locale}");
            assert!(catalog.lookup(locale, "validation.required").is_some(), "{locale}");
        }
    }

    #[test]
    fn negotiation_prefers_query_then_header() {
        assert_eq!(Locale::negotiate(Some("es"), Some("fr"), Locale::En), Locale::Es);
        assert_eq!(
            Locale::negotiate(None, Some("de-DE, fr-CA;q=0.8, en;q=0.5"), Locale::En),
            Locale::Fr
        );
        assert_eq!(Locale::negotiate(Some("de"), Some("it"), Locale::En), Locale::En);
        assert_eq!(Locale::negotiate(None, None, Locale::Es), Locale::Es);
    }

    #[test]
    fn tags_match_on_primary_subtag() {
        assert_eq!(Locale::from_tag("FR-ca"), Some(Locale::Fr));
        assert_eq!(Locale::from_tag("es_MX"), Some(Locale::Es));
        assert_eq!(Locale::from_tag("*"), None);
    }
}
