//! # Page Sections
//!
//! A [`Section`] is one visually distinct block of a page. On the wire it
//! is an object tagged by `type`; each tag selects exactly one variant with
//! its own `content` and optional `design` shape.
//!
//! `design` is always optional. Absence means the section inherits the
//! active theme's styling.
//!
//! ## Text column layout
//!
//! `TextDesign::column_layout` is a list of 2 to 4 positive width ratios.
//! Its length is deliberately not tied to the number of columns: renderers
//! redistribute or ignore surplus ratios. Each ratio keeps the number form
//! it was written in, so `[1, 2]` stays `[1, 2]` on the way back out.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::ValidationError;
use crate::layout::{Breakpoint, HorizontalAlign, MediaPosition, VerticalAlign};
use crate::locale::MessageKey;
use crate::url::UrlOrPath;

/// Discriminator values of the section union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Hero,
    Text,
}

closed_set!(SectionType, "section type", {
    Hero => "hero",
    Text => "text",
});

/// One block of a page, tagged on `type`.
///
/// New variants may be added; existing variants never change shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[non_exhaustive]
pub enum Section {
    Hero(HeroSection),
    Text(TextSection),
}

impl Section {
    /// The discriminator of this section.
    pub fn section_type(&self) -> SectionType {
        match self {
            Section::Hero(_) => SectionType::Hero,
            Section::Text(_) => SectionType::Text,
        }
    }

    /// The section's name, used as its i18n key prefix.
    pub fn section_name(&self) -> &str {
        match self {
            Section::Hero(hero) => &hero.section_name,
            Section::Text(text) => &text.section_name,
        }
    }

    /// Message key `<sectionName>.<field>` for translatable section text.
    ///
    /// # Errors
    ///
    /// Fails if the section name contains characters a message key may not.
    pub fn message_key(&self, field: &str) -> Result<MessageKey, ValidationError> {
        MessageKey::scoped(self.section_name(), field)
    }
}

// ─── Hero ───────────────────────────────────────────────────────────

/// Full-width banner with optional call to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    pub section_name: String,
    pub content: HeroContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<HeroDesign>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
}

/// Hero styling overrides. Image and video references are free-form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallax: Option<bool>,
}

// ─── Text ───────────────────────────────────────────────────────────

/// One to four columns of text and media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSection {
    pub section_name: String,
    pub content: TextContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<TextDesign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub columns: Vec<TextColumnContent>,
}

impl TextContent {
    pub const MIN_COLUMNS: usize = 1;
    pub const MAX_COLUMNS: usize = 4;
}

/// A column's text. `paragraph` may contain markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextColumnContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
}

/// A positive column width ratio.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Number", into = "Number")]
pub struct ColumnRatio(Number);

impl ColumnRatio {
    pub fn new(value: Number) -> Result<Self, ValidationError> {
        match value.as_f64() {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => Ok(Self(value)),
            _ => Err(ValidationError::NonPositiveRatio(value.to_string())),
        }
    }

    pub fn as_f64(&self) -> f64 {
        // Construction guarantees a finite positive value.
        self.0.as_f64().unwrap_or(1.0)
    }

    pub fn as_number(&self) -> &Number {
        &self.0
    }
}

impl TryFrom<Number> for ColumnRatio {
    type Error = ValidationError;

    fn try_from(value: Number) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnRatio> for Number {
    fn from(ratio: ColumnRatio) -> Self {
        ratio.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Relative column widths, 2 to 4 positive entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_layout: Option<Vec<ColumnRatio>>,
    /// Per-column overrides, matched to columns by index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_config: Option<Vec<TextColumnDesign>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_url: Option<UrlOrPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallax: Option<bool>,
}

impl TextDesign {
    pub const MIN_LAYOUT_ENTRIES: usize = 2;
    pub const MAX_LAYOUT_ENTRIES: usize = 4;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextColumnDesign {
    /// Breakpoints at which the column is not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_on_breakpoints: Option<Vec<Breakpoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_horizontal_align: Option<HorizontalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_vertical_align: Option<VerticalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

impl TextColumnDesign {
    /// Whether the column is hidden at `breakpoint`.
    pub fn hidden_at(&self, breakpoint: Breakpoint) -> bool {
        self.hide_on_breakpoints
            .as_deref()
            .is_some_and(|hidden| hidden.contains(&breakpoint))
    }
}

/// Image attached to a text column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub url: UrlOrPath,
    /// Defaults to `contain` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<MediaPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<HorizontalAlign>,
    /// CSS length, e.g. `120px` or `50%`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
}

impl Media {
    /// The fit mode, applying the `contain` default.
    pub fn effective_position(&self) -> MediaPosition {
        self.position.unwrap_or(MediaPosition::Contain)
    }
}
