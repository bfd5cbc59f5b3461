//! # Translation Dictionaries
//!
//! [`I18nConfig`] maps each configured [`Locale`] to a flat [`Dictionary`]
//! of message keys. Both key sets are closed: an unrecognized locale or a
//! key outside `[a-zA-Z0-9_.]+` fails deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, MessageKey};

/// Flat mapping from message key to translated text.
pub type Dictionary = BTreeMap<MessageKey, String>;

/// Per-locale dictionaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18nConfig(BTreeMap<Locale, Dictionary>);

impl I18nConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary for `locale`, if configured.
    pub fn dictionary(&self, locale: Locale) -> Option<&Dictionary> {
        self.0.get(&locale)
    }

    /// Raw lookup in one locale, without fallback.
    pub fn message(&self, locale: Locale, key: &str) -> Option<&str> {
        self.0
            .get(&locale)
            .and_then(|dictionary| dictionary.get(key))
            .map(String::as_str)
    }

    /// Configured locales in canonical order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, locale: Locale, key: MessageKey, text: impl Into<String>) {
        self.0.entry(locale).or_default().insert(key, text.into());
    }
}

impl FromIterator<(Locale, Dictionary)> for I18nConfig {
    fn from_iter<I: IntoIterator<Item = (Locale, Dictionary)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_locale_dictionaries() {
        let i18n: I18nConfig = serde_json::from_value(json!({
            "en": { "home.title": "Welcome" },
            "fr": { "home.title": "Bienvenue" }
        }))
        .unwrap();
        assert_eq!(i18n.message(Locale::Fr, "home.title"), Some("Bienvenue"));
        assert_eq!(i18n.locales().collect::<Vec<_>>(), vec![Locale::En, Locale::Fr]);
    }

    #[test]
    fn rejects_unknown_locale_and_bad_keys() {
        assert!(serde_json::from_value::<I18nConfig>(json!({ "de": {} })).is_err());
        assert!(serde_json::from_value::<I18nConfig>(json!({ "en": { "home title!": "x" } })).is_err());
    }

    #[test]
    fn insert_creates_locale_on_demand() {
        let mut i18n = I18nConfig::new();
        assert!(i18n.is_empty());
        i18n.insert(Locale::En, MessageKey::new("a.b").unwrap(), "text");
        assert_eq!(i18n.message(Locale::En, "a.b"), Some("text"));
        assert!(i18n.dictionary(Locale::Fr).is_none());
    }

    #[test]
    fn empty_dictionary_round_trips() {
        let i18n: I18nConfig = serde_json::from_value(json!({ "en": {} })).unwrap();
        assert_eq!(serde_json::to_value(&i18n).unwrap(), json!({ "en": {} }));
    }
}
