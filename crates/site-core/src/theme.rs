//! # Site Metadata and Themes
//!
//! [`SiteThemeConfig`] carries site-wide metadata (name, logo, favicon,
//! container width). [`ThemeConfig`] is one named color palette. Colors are
//! opaque CSS values: they are required but never parsed for validity.

use serde::{Deserialize, Serialize};

use crate::layout::ContainerMaxWidth;
use crate::url::UrlOrPath;

/// Site-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteThemeConfig {
    /// Display name of the site. Never empty in a validated config.
    pub site_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<UrlOrPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<UrlOrPath>,
    /// Absent means the renderer's own default width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_max_width: Option<ContainerMaxWidth>,
}

impl SiteThemeConfig {
    /// Metadata with only a site name set.
    pub fn named(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            logo_url: None,
            favicon_url: None,
            container_max_width: None,
        }
    }
}

/// A named color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Unique within a site's theme list.
    pub theme_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub link_color: String,
    pub link_hover_color: String,
    pub background_color: String,
    pub menu_background_color: String,
    pub menu_hover_color: String,
}

impl ThemeConfig {
    /// Whether the palette should render in dark mode.
    ///
    /// True when the background color mentions `dark` (any case), or when
    /// its leading hex digits (after an optional `#`) are below `0x808080`.
    /// Non-hex colors such as `rgb(...)` are treated as light.
    pub fn is_dark(&self) -> bool {
        let background = self.background_color.trim();
        if background.to_ascii_lowercase().contains("dark") {
            return true;
        }
        let hex = background.strip_prefix('#').unwrap_or(background);
        let digits: String = hex.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
        if digits.is_empty() {
            return false;
        }
        match u64::from_str_radix(&digits, 16) {
            Ok(value) => value < 0x80_8080,
            // More than sixteen hex digits is far above the threshold.
            Err(_) => false,
        }
    }

    /// Same palette under a different name.
    pub fn renamed(&self, theme_name: impl Into<String>) -> Self {
        Self {
            theme_name: theme_name.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Breakpoint;

    fn palette(background: &str) -> ThemeConfig {
        ThemeConfig {
            theme_name: "t".into(),
            primary_color: "#000".into(),
            secondary_color: "#111".into(),
            link_color: "#222".into(),
            link_hover_color: "#333".into(),
            background_color: background.into(),
            menu_background_color: "#444".into(),
            menu_hover_color: "#555".into(),
        }
    }

    #[test]
    fn dark_detection() {
        assert!(palette("#121212").is_dark());
        assert!(palette("darkslategray").is_dark());
        assert!(palette("DarkBlue").is_dark());
        assert!(!palette("#ffffff").is_dark());
        assert!(!palette("#808080").is_dark());
        assert!(palette("#7f7f7f").is_dark());
        assert!(!palette("rgb(0, 0, 0)").is_dark());
        assert!(!palette("white").is_dark());
    }

    #[test]
    fn theme_uses_camel_case_fields() {
        let json = serde_json::to_value(palette("#fff")).unwrap();
        assert_eq!(json["themeName"], "t");
        assert_eq!(json["menuBackgroundColor"], "#444");
        assert_eq!(json["linkHoverColor"], "#333");
    }

    #[test]
    fn renamed_keeps_palette() {
        let renamed = palette("#fff").renamed("Default");
        assert_eq!(renamed.theme_name, "Default");
        assert_eq!(renamed.background_color, "#fff");
    }

    #[test]
    fn site_metadata_optional_fields_are_omitted() {
        let site = SiteThemeConfig::named("Acme");
        assert_eq!(serde_json::to_string(&site).unwrap(), r#"{"siteName":"Acme"}"#);
    }

    #[test]
    fn site_metadata_parses_full_shape() {
        let site: SiteThemeConfig = serde_json::from_str(
            r#"{"siteName":"Acme","logoUrl":"/logo.svg","faviconUrl":"https://cdn.acme.dev/f.ico","containerMaxWidth":false}"#,
        )
        .unwrap();
        assert_eq!(site.logo_url.unwrap().as_str(), "/logo.svg");
        assert_eq!(site.container_max_width, Some(ContainerMaxWidth::Unbounded));

        let site: SiteThemeConfig =
            serde_json::from_str(r#"{"siteName":"Acme","containerMaxWidth":"md"}"#).unwrap();
        assert_eq!(
            site.container_max_width,
            Some(ContainerMaxWidth::Bounded(Breakpoint::Md))
        );
    }
}
