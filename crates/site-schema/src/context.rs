//! Read-only handle to a loaded site, passed explicitly to consumers.

use std::sync::Arc;

use site_core::{Locale, SiteConfig};

use crate::i18n::Messages;
use crate::menu::MenuConfig;
use crate::theme::ThemeSet;

#[derive(Debug)]
struct Inner {
    config: SiteConfig,
    themes: ThemeSet,
    menu: MenuConfig,
}

/// A validated configuration with its derived theme set and menu.
///
/// Cloning is cheap and shares the same immutable data.
#[derive(Debug, Clone)]
pub struct SiteContext {
    inner: Arc<Inner>,
}

impl SiteContext {
    /// Derive themes and menu from a validated configuration.
    pub fn new(config: SiteConfig) -> Self {
        let themes = ThemeSet::resolve(&config);
        let menu = MenuConfig::from_pages(&config.pages);
        Self {
            inner: Arc::new(Inner {
                config,
                themes,
                menu,
            }),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// The theme set in its initial state. Consumers that switch themes
    /// clone it into their own state.
    pub fn themes(&self) -> &ThemeSet {
        &self.inner.themes
    }

    pub fn menu(&self) -> &MenuConfig {
        &self.inner.menu
    }

    pub fn messages(&self, locale: Locale) -> Messages<'_> {
        Messages::new(&self.inner.config.i18n, locale)
    }
}

impl From<SiteConfig> for SiteContext {
    fn from(config: SiteConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_state() {
        let config: SiteConfig = serde_json::from_value(json!({
            "site": { "siteName": "Acme" },
            "themes": [],
            "pages": [{ "pageName": "home", "menuTitle": "Home", "route": "/", "sections": [] }],
            "i18n": { "en": { "home.title": "Hi" } }
        }))
        .unwrap();
        let ctx = SiteContext::from(config);
        let other = ctx.clone();
        assert!(Arc::ptr_eq(&ctx.inner, &other.inner));
        assert_eq!(other.menu().items.len(), 1);
        assert_eq!(other.themes().active_name(), "Default");
        assert_eq!(other.messages(Locale::Fr).translate("home.title"), "Hi");
        assert_eq!(other.config().site.site_name, "Acme");
    }
}
