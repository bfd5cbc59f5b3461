//! # site-schema — Schema Registry & Validating Loader
//!
//! Decides whether a raw site configuration document is acceptable and,
//! if so, hands out the typed [`site_core::SiteConfig`]. Consumers never
//! see raw input.
//!
//! ## Responsibilities
//!
//! - **Schema registry:** one JSON Schema rule set per entity, executed by
//!   the `jsonschema` engine with a custom `url-or-path` format.
//! - **Validating loader:** collects every failure across the document
//!   (never fail-fast) and reports them in document order.
//! - **Derived policy:** theme-count defaulting, menu derivation and
//!   message lookup with locale fallback, applied only to validated input.
//!
//! ## Usage
//!
//! ```no_run
//! use site_schema::{Loader, SchemaRegistry, SiteContext};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let config = Loader::new(&registry).load_str(r#"{"site":{"siteName":"Acme"},"themes":[],"pages":[],"i18n":{}}"#)?;
//! let site = SiteContext::new(config);
//! assert!(!site.themes().switcher_visible());
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod i18n;
pub mod loader;
pub mod menu;
pub mod registry;
pub mod rules;
pub mod theme;
pub mod violation;

// Re-export primary types.
pub use context::SiteContext;
pub use i18n::Messages;
pub use loader::{load_site_config, LoadError, LoadErrorKind, Loader};
pub use menu::MenuConfig;
pub use registry::{Entity, SchemaError, SchemaRegistry, SCHEMA_URI_PREFIX};
pub use theme::{default_theme, ThemeError, ThemeOption, ThemeSet, DEFAULT_THEME_NAME};
pub use violation::{FieldPath, PathSegment, Violation, ViolationKind, Violations};
