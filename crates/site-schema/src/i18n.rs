//! # Message Resolution
//!
//! Read-side view of the validated translation dictionaries for one
//! requested locale. Missing messages fall back to the default locale
//! (`en`), then to the key itself, so a renderer always has text to show.

use site_core::{I18nConfig, Locale, MessageKey, Section, ValidationError};

/// Translations for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    i18n: &'a I18nConfig,
    locale: Locale,
}

impl<'a> Messages<'a> {
    pub fn new(i18n: &'a I18nConfig, locale: Locale) -> Self {
        Self { i18n, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Locales with a configured dictionary. Always includes the default.
    pub fn available_locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.i18n.locales().collect();
        if !locales.contains(&Locale::DEFAULT) {
            locales.insert(0, Locale::DEFAULT);
        }
        locales
    }

    /// Text for `key` in the requested locale, without fallback.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.i18n.message(self.locale, key)
    }

    /// Text for `key`, falling back to the default locale, then the key.
    pub fn translate<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.get(key)
            .or_else(|| self.i18n.message(Locale::DEFAULT, key))
            .unwrap_or(key)
    }

    /// Translation of `<sectionName>.<field>` for `section`.
    ///
    /// # Errors
    ///
    /// Fails if the section name cannot form a message key.
    pub fn section_text(&self, section: &Section, field: &str) -> Result<String, ValidationError> {
        let key: MessageKey = section.message_key(field)?;
        Ok(self.translate(key.as_str()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn i18n() -> I18nConfig {
        serde_json::from_value(json!({
            "en": { "home.title": "Welcome", "hero.title": "Hello", "only.en": "English" },
            "fr": { "home.title": "Bienvenue" }
        }))
        .unwrap()
    }

    #[test]
    fn translates_in_requested_locale() {
        let i18n = i18n();
        let fr = Messages::new(&i18n, Locale::Fr);
        assert_eq!(fr.translate("home.title"), "Bienvenue");
        assert_eq!(fr.get("only.en"), None);
    }

    #[test]
    fn falls_back_to_default_locale_then_key() {
        let i18n = i18n();
        let fr = Messages::new(&i18n, Locale::Fr);
        assert_eq!(fr.translate("only.en"), "English");
        assert_eq!(fr.translate("missing.key"), "missing.key");
    }

    #[test]
    fn available_locales_always_include_default() {
        let i18n: I18nConfig = serde_json::from_value(json!({ "fr": {} })).unwrap();
        let messages = Messages::new(&i18n, Locale::Fr);
        assert_eq!(messages.available_locales(), vec![Locale::En, Locale::Fr]);
        assert_eq!(messages.locale(), Locale::Fr);
    }

    #[test]
    fn section_text_uses_scoped_key() {
        let i18n = i18n();
        let section: Section = serde_json::from_value(json!({
            "sectionName": "hero", "type": "hero", "content": {}
        }))
        .unwrap();
        let en = Messages::new(&i18n, Locale::En);
        assert_eq!(en.section_text(&section, "title").unwrap(), "Hello");
        assert_eq!(en.section_text(&section, "subtitle").unwrap(), "hero.subtitle");
    }
}
