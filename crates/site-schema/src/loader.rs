//! # Validating Loader
//!
//! Turns a raw document into a typed [`SiteConfig`] or a complete list of
//! failures. Validation is a pure function of the input: no I/O, no shared
//! mutable state, so concurrent loads need no coordination.
//!
//! The loader fails closed. A single failure anywhere rejects the whole
//! document; there is no partial configuration.

use std::fmt;

use serde_json::Value;
use site_core::SiteConfig;
use thiserror::Error;

use crate::registry::{Entity, SchemaError, SchemaRegistry};
use crate::violation::Violations;

/// Why a document was not accepted.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input is not a JSON object. Never reaches the schema registry.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// The document parsed but violates the schema.
    #[error("{} validation error(s): {violations}", .violations.len())]
    ValidationFailed { violations: Violations },

    /// The schema corpus itself could not be compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    MalformedInput,
    ValidationFailed,
    /// Every failure is an unknown section `type`.
    UnrecognizedVariant,
    Internal,
}

impl LoadErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadErrorKind::MalformedInput => "MALFORMED_INPUT",
            LoadErrorKind::ValidationFailed => "VALIDATION_FAILED",
            LoadErrorKind::UnrecognizedVariant => "UNRECOGNIZED_VARIANT",
            LoadErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::MalformedInput { .. } => LoadErrorKind::MalformedInput,
            LoadError::ValidationFailed { violations } if violations.all_unrecognized_variants() => {
                LoadErrorKind::UnrecognizedVariant
            }
            LoadError::ValidationFailed { .. } => LoadErrorKind::ValidationFailed,
            LoadError::Schema(_) => LoadErrorKind::Internal,
        }
    }

    /// The failure list, for validation failures.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            LoadError::ValidationFailed { violations } => Some(violations),
            _ => None,
        }
    }
}

/// Entry point for validating whole site configuration documents.
#[derive(Debug, Clone, Copy)]
pub struct Loader<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> Loader<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validate an already-parsed document.
    pub fn load(&self, raw: &Value) -> Result<SiteConfig, LoadError> {
        if !raw.is_object() {
            return Err(LoadError::MalformedInput {
                reason: format!("top-level value must be an object, found {}", json_type(raw)),
            });
        }
        match self.registry.validate::<SiteConfig>(Entity::SiteConfig, raw) {
            Ok(config) => {
                tracing::debug!(
                    themes = config.themes.len(),
                    pages = config.pages.len(),
                    sections = config.section_count(),
                    "validated site config"
                );
                Ok(config)
            }
            Err(violations) => {
                tracing::debug!(count = violations.len(), "site config rejected");
                Err(LoadError::ValidationFailed { violations })
            }
        }
    }

    /// Parse JSON text, then validate.
    pub fn load_str(&self, text: &str) -> Result<SiteConfig, LoadError> {
        let raw: Value = serde_json::from_str(text).map_err(|e| LoadError::MalformedInput {
            reason: e.to_string(),
        })?;
        self.load(&raw)
    }

    /// Parse UTF-8 JSON bytes, then validate.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<SiteConfig, LoadError> {
        let raw: Value = serde_json::from_slice(bytes).map_err(|e| LoadError::MalformedInput {
            reason: e.to_string(),
        })?;
        self.load(&raw)
    }
}

/// One-shot validation with a freshly compiled registry.
///
/// Hold a [`SchemaRegistry`] and a [`Loader`] instead when loading more
/// than once.
pub fn load_site_config(raw: &Value) -> Result<SiteConfig, LoadError> {
    let registry = SchemaRegistry::new()?;
    Loader::new(&registry).load(raw)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new().unwrap()
    }

    #[test]
    fn malformed_text_never_reaches_the_registry() {
        let registry = registry();
        let loader = Loader::new(&registry);
        let err = loader.load_str("{ not json").unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::MalformedInput);
        assert!(err.violations().is_none());

        let err = loader.load_bytes(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::MalformedInput);
    }

    #[test]
    fn non_object_top_level_is_malformed() {
        let registry = registry();
        let err = Loader::new(&registry).load(&json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::MalformedInput);
        assert!(err.to_string().contains("found array"));
    }

    #[test]
    fn empty_object_reports_every_missing_root_field() {
        let registry = registry();
        let err = Loader::new(&registry).load(&json!({})).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::ValidationFailed);
        let paths: Vec<String> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.path.to_string())
            .collect();
        assert_eq!(paths, vec!["site", "themes", "pages", "i18n"]);
    }

    #[test]
    fn kind_labels() {
        assert_eq!(LoadErrorKind::UnrecognizedVariant.to_string(), "UNRECOGNIZED_VARIANT");
        assert_eq!(LoadErrorKind::MalformedInput.as_str(), "MALFORMED_INPUT");
    }

    #[test]
    fn free_function_loads() {
        let config = load_site_config(&json!({
            "site": { "siteName": "Acme" },
            "themes": [],
            "pages": [],
            "i18n": {}
        }))
        .unwrap();
        assert_eq!(config.site.site_name, "Acme");
    }
}
