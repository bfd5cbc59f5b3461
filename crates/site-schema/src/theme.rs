//! # Theme Resolution
//!
//! Post-validation policy deciding which themes a site offers. Kept apart
//! from the schema: whether a document is valid and what the UI does with
//! it are separate questions.
//!
//! | Configured themes | Selectable                          | Switcher |
//! |-------------------|-------------------------------------|----------|
//! | none              | the built-in palette as `Default`   | hidden   |
//! | exactly one       | that palette, in the `Default` slot | hidden   |
//! | two or more       | all of them, in list order          | shown    |
//!
//! The initial active theme is always the first selectable one.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use site_core::{SiteConfig, ThemeConfig};
use thiserror::Error;

/// Slot name used when the site does not offer a choice.
pub const DEFAULT_THEME_NAME: &str = "Default";

/// The built-in palette used when no theme is configured.
pub fn default_theme() -> ThemeConfig {
    ThemeConfig {
        theme_name: DEFAULT_THEME_NAME.to_string(),
        primary_color: "#0076d2".to_string(),
        secondary_color: "#dc004e".to_string(),
        link_color: "#1976d2".to_string(),
        link_hover_color: "#115293".to_string(),
        background_color: "#ffffff".to_string(),
        menu_background_color: "#1976d2".to_string(),
        menu_hover_color: "#115293".to_string(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme {requested:?}; available themes: {available}")]
    UnknownTheme { requested: String, available: String },
}

/// A selectable theme and the name it is offered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub name: String,
    pub theme: ThemeConfig,
}

/// The themes a site offers and which one is active.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    options: Vec<ThemeOption>,
    active: usize,
}

impl ThemeSet {
    /// Apply the theme-count rule to a validated configuration.
    pub fn resolve(config: &SiteConfig) -> Self {
        Self::from_themes(&config.themes)
    }

    /// Apply the theme-count rule to a theme list.
    pub fn from_themes(themes: &[ThemeConfig]) -> Self {
        let options = match themes {
            [] => vec![ThemeOption {
                name: DEFAULT_THEME_NAME.to_string(),
                theme: default_theme(),
            }],
            [only] => vec![ThemeOption {
                name: DEFAULT_THEME_NAME.to_string(),
                theme: only.clone(),
            }],
            many => many
                .iter()
                .map(|theme| ThemeOption {
                    name: theme.theme_name.clone(),
                    theme: theme.clone(),
                })
                .collect(),
        };
        Self { options, active: 0 }
    }

    /// Selectable themes in switcher order.
    pub fn available(&self) -> &[ThemeOption] {
        &self.options
    }

    /// Names of the selectable themes.
    pub fn names(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.name.as_str()).collect()
    }

    pub fn active(&self) -> &ThemeConfig {
        &self.options[self.active].theme
    }

    pub fn active_name(&self) -> &str {
        &self.options[self.active].name
    }

    /// Theme offered under `name`.
    pub fn get(&self, name: &str) -> Option<&ThemeConfig> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.theme)
    }

    /// Whether a theme switcher should be rendered.
    pub fn switcher_visible(&self) -> bool {
        self.options.len() > 1
    }

    /// Make the theme offered under `name` active.
    pub fn select(&mut self, name: &str) -> Result<&ThemeConfig, ThemeError> {
        let index = self
            .options
            .iter()
            .position(|option| option.name == name)
            .ok_or_else(|| ThemeError::UnknownTheme {
                requested: name.to_string(),
                available: self.names().join(", "),
            })?;
        self.active = index;
        Ok(&self.options[index].theme)
    }
}

impl Serialize for ThemeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ThemeSet", 3)?;
        state.serialize_field("available", &self.options)?;
        state.serialize_field("active", self.active_name())?;
        state.serialize_field("switcherVisible", &self.switcher_visible())?;
        state.end()
    }
}
