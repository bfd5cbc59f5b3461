//! The root configuration document.

use serde::{Deserialize, Serialize};

use crate::i18n::I18nConfig;
use crate::page::{MenuItem, PageConfiguration};
use crate::theme::{SiteThemeConfig, ThemeConfig};

/// A complete site definition: metadata, themes, pages and translations.
///
/// Constructed once per load and treated as immutable afterwards. Theme
/// order is switcher order; page order is menu and route order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteThemeConfig,
    pub themes: Vec<ThemeConfig>,
    pub pages: Vec<PageConfiguration>,
    pub i18n: I18nConfig,
}

impl SiteConfig {
    /// Page served at `route`.
    pub fn page_by_route(&self, route: &str) -> Option<&PageConfiguration> {
        self.pages.iter().find(|page| page.route == route)
    }

    /// Configured theme named `theme_name`.
    pub fn theme(&self, theme_name: &str) -> Option<&ThemeConfig> {
        self.themes.iter().find(|theme| theme.theme_name == theme_name)
    }

    /// Menu entries in page order.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.pages.iter().map(PageConfiguration::menu_item).collect()
    }

    /// Total section count across all pages.
    pub fn section_count(&self) -> usize {
        self.pages.iter().map(|page| page.sections.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn acme() -> serde_json::Value {
        json!({
            "site": { "siteName": "Acme" },
            "themes": [],
            "pages": [{
                "pageName": "home",
                "menuTitle": "Home",
                "route": "/",
                "sections": [{ "sectionName": "hero", "type": "hero", "content": { "title": "Hi" } }]
            }],
            "i18n": { "en": {} }
        })
    }

    #[test]
    fn parses_minimal_document() {
        let config: SiteConfig = serde_json::from_value(acme()).unwrap();
        assert_eq!(config.site.site_name, "Acme");
        assert!(config.themes.is_empty());
        assert_eq!(config.section_count(), 1);
        assert!(config.page_by_route("/").is_some());
        assert!(config.page_by_route("/missing").is_none());
        assert_eq!(config.menu_items()[0].menu_title, "Home");
    }

    #[test]
    fn round_trip_is_semantically_identical() {
        let config: SiteConfig = serde_json::from_value(acme()).unwrap();
        assert_eq!(serde_json::to_value(&config).unwrap(), acme());
    }

    #[test]
    fn missing_pages_is_an_error() {
        let mut doc = acme();
        doc.as_object_mut().unwrap().remove("pages");
        assert!(serde_json::from_value::<SiteConfig>(doc).is_err());
    }
}
