//! # site-core — Foundational Types for simple-site
//!
//! This crate defines the typed shape of a site configuration document:
//! site metadata, themes, pages, the discriminated section union, and the
//! i18n dictionaries. Every other crate in the workspace depends on
//! `site-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated value types.** `UrlOrPath` and `MessageKey` are newtypes
//!    whose constructors enforce their format. Deserializing through serde
//!    goes through the same constructors, so a typed `SiteConfig` can never
//!    hold a malformed reference.
//!
//! 2. **Closed enumerations.** Breakpoints, media position, alignment and
//!    locales are Rust enums with an `ALL` table. The JSON Schema documents
//!    in `schemas/` list the same values; a test in `site-schema` keeps the
//!    two in lockstep.
//!
//! 3. **Tagged section union.** `Section` is internally tagged on `type`.
//!    Adding a variant is additive: existing variants never change shape.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `site-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Model types derive `Debug`, `Clone`, `PartialEq` and serde in both
//!   directions, with camelCase field names matching the wire document.

#[macro_use]
mod macros;

pub mod error;
pub mod i18n;
pub mod layout;
pub mod locale;
pub mod page;
pub mod section;
pub mod site;
pub mod temporal;
pub mod theme;
pub mod url;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use i18n::{Dictionary, I18nConfig};
pub use layout::{Breakpoint, ContainerMaxWidth, HorizontalAlign, MediaPosition, VerticalAlign};
pub use locale::{is_message_key, Locale, MessageKey, MESSAGE_KEY_PATTERN};
pub use page::{MenuItem, PageConfiguration};
pub use section::{
    ColumnRatio, HeroContent, HeroDesign, HeroSection, Media, Section, SectionType, TextColumnContent,
    TextColumnDesign, TextContent, TextDesign, TextSection,
};
pub use site::SiteConfig;
pub use temporal::Timestamp;
pub use theme::{SiteThemeConfig, ThemeConfig};
pub use url::{is_url_or_path, UrlOrPath};
