//! # Schema Registry
//!
//! Declares the shape of every configuration entity as a JSON Schema
//! (Draft 2020-12) document and executes it with the `jsonschema` engine.
//!
//! ## Design
//!
//! The schema documents live in `schemas/` at the repository root and are
//! embedded at compile time. Each carries an `$id` under
//! `https://schemas.simple-site.dev/`; cross-document `$ref`s resolve through
//! [`LocalSchemaRetriever`] from memory, so validation never touches the
//! network or the disk.
//!
//! [`SchemaRegistry::new`] compiles one validator per [`Entity`] up front.
//! Validation collects every engine error and maps each to a [`Violation`]
//! with a dot/bracket path and a readable reason. For the root entity a
//! second pass enforces rules JSON Schema cannot state (see [`crate::rules`]).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use jsonschema::error::{TypeKind, ValidationErrorKind};
use serde::de::DeserializeOwned;
use serde_json::Value;
use site_core::{is_url_or_path, SectionType, MESSAGE_KEY_PATTERN};
use thiserror::Error;

use crate::rules;
use crate::violation::{FieldPath, PathSegment, Violation, Violations};

/// URI prefix shared by every schema `$id`.
pub const SCHEMA_URI_PREFIX: &str = "https://schemas.simple-site.dev/";

/// Name of the custom string format for URL-or-Path values.
pub const URL_OR_PATH_FORMAT: &str = "url-or-path";

const COMMON_FILE: &str = "common.schema.json";
const COMMON_SOURCE: &str = include_str!("../../../schemas/common.schema.json");

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A configuration entity with its own rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    /// The whole document.
    SiteConfig,
    /// `site` metadata.
    Site,
    Theme,
    Page,
    /// The discriminated section union.
    Section,
    HeroSection,
    TextSection,
    I18n,
}

impl Entity {
    pub const ALL: &'static [Entity] = &[
        Entity::SiteConfig,
        Entity::Site,
        Entity::Theme,
        Entity::Page,
        Entity::Section,
        Entity::HeroSection,
        Entity::TextSection,
        Entity::I18n,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::SiteConfig => "site-config",
            Entity::Site => "site",
            Entity::Theme => "theme",
            Entity::Page => "page",
            Entity::Section => "section",
            Entity::HeroSection => "hero-section",
            Entity::TextSection => "text-section",
            Entity::I18n => "i18n",
        }
    }

    /// File name under `schemas/`.
    pub fn file_name(&self) -> String {
        format!("{}.schema.json", self.as_str())
    }

    /// The schema's `$id`.
    pub fn id(&self) -> String {
        format!("{SCHEMA_URI_PREFIX}{}", self.file_name())
    }

    fn source(&self) -> &'static str {
        match self {
            Entity::SiteConfig => include_str!("../../../schemas/site-config.schema.json"),
            Entity::Site => include_str!("../../../schemas/site.schema.json"),
            Entity::Theme => include_str!("../../../schemas/theme.schema.json"),
            Entity::Page => include_str!("../../../schemas/page.schema.json"),
            Entity::Section => include_str!("../../../schemas/section.schema.json"),
            Entity::HeroSection => include_str!("../../../schemas/hero-section.schema.json"),
            Entity::TextSection => include_str!("../../../schemas/text-section.schema.json"),
            Entity::I18n => include_str!("../../../schemas/i18n.schema.json"),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .iter()
            .copied()
            .find(|entity| entity.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownEntity(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures building the registry. These indicate a broken schema corpus,
/// never a bad input document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An embedded schema document is not valid JSON.
    #[error("failed to parse schema {file}: {reason}")]
    Parse {
        file: String,
        reason: String,
    },

    /// A schema document could not be compiled into a validator.
    #[error("failed to compile schema {schema_id}: {reason}")]
    Compile {
        schema_id: String,
        reason: String,
    },

    /// No entity has the requested name.
    #[error("unknown schema entity: {0}")]
    UnknownEntity(String),
}

// ---------------------------------------------------------------------------
// Schema retriever for $ref resolution
// ---------------------------------------------------------------------------

/// Resolves `$ref` URIs against the embedded schema documents.
struct LocalSchemaRetriever {
    schemas: HashMap<String, Value>,
}

impl jsonschema::Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        self.schemas
            .get(uri_str)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

// ---------------------------------------------------------------------------
// SchemaRegistry
// ---------------------------------------------------------------------------

/// Compiled rule sets for every [`Entity`].
///
/// Immutable after construction and safe to share across threads.
pub struct SchemaRegistry {
    schemas: HashMap<Entity, Value>,
    validators: HashMap<Entity, jsonschema::Validator>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("entities", &self.entities())
            .finish()
    }
}

impl SchemaRegistry {
    /// Parse and compile every embedded schema.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Parse`] or [`SchemaError::Compile`] if the embedded
    /// corpus is broken.
    pub fn new() -> Result<Self, SchemaError> {
        let mut by_uri = HashMap::new();
        let common = parse_schema(COMMON_FILE, COMMON_SOURCE)?;
        by_uri.insert(format!("{SCHEMA_URI_PREFIX}{COMMON_FILE}"), common);

        let mut schemas = HashMap::new();
        for entity in Entity::ALL {
            let schema = parse_schema(&entity.file_name(), entity.source())?;
            by_uri.insert(entity.id(), schema.clone());
            schemas.insert(*entity, schema);
        }

        let mut validators = HashMap::new();
        for entity in Entity::ALL {
            let retriever = LocalSchemaRetriever {
                schemas: by_uri.clone(),
            };
            let validator = jsonschema::options()
                .with_draft(jsonschema::Draft::Draft202012)
                .with_retriever(retriever)
                .with_format(URL_OR_PATH_FORMAT, is_url_or_path)
                .should_validate_formats(true)
                .build(&schemas[entity])
                .map_err(|e| SchemaError::Compile {
                    schema_id: entity.id(),
                    reason: e.to_string(),
                })?;
            validators.insert(*entity, validator);
        }

        Ok(Self {
            schemas,
            validators,
        })
    }

    /// Every entity with a compiled rule set, in declaration order.
    pub fn entities(&self) -> Vec<Entity> {
        Entity::ALL
            .iter()
            .copied()
            .filter(|entity| self.validators.contains_key(entity))
            .collect()
    }

    /// The schema document for `entity`.
    pub fn schema(&self, entity: Entity) -> Option<&Value> {
        self.schemas.get(&entity)
    }

    /// Run `entity`'s rule set against `value`, collecting every failure.
    pub fn check(&self, entity: Entity, value: &Value) -> Result<(), Violations> {
        let mut violations = Vec::new();
        if let Some(validator) = self.validators.get(&entity) {
            for error in validator.iter_errors(value) {
                violations.extend(describe(entity, value, &error));
            }
        }
        if entity == Entity::SiteConfig {
            violations.extend(rules::check_site_config(value));
        }
        match Violations::collect(violations) {
            None => Ok(()),
            Some(violations) => Err(violations),
        }
    }

    /// Run `entity`'s rule set, then produce the typed value.
    pub fn validate<T: DeserializeOwned>(
        &self,
        entity: Entity,
        value: &Value,
    ) -> Result<T, Violations> {
        self.check(entity, value)?;
        serde_json::from_value(value.clone()).map_err(|e| {
            Violations::single(Violation::new(
                FieldPath::root(),
                format!("could not be decoded: {e}"),
            ))
        })
    }
}

fn parse_schema(file: &str, source: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(source).map_err(|e| SchemaError::Parse {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Engine error → Violation
// ---------------------------------------------------------------------------

fn describe(entity: Entity, document: &Value, error: &jsonschema::ValidationError<'_>) -> Vec<Violation> {
    let path = FieldPath::from_pointer(&error.instance_path.to_string(), document);

    let message = match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = match property.as_str() {
                Some(name) => name.to_string(),
                None => property.to_string(),
            };
            return vec![Violation::new(path.key(name), "is required")];
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            return unexpected
                .iter()
                .map(|key| unexpected_key(entity, &path, key))
                .collect();
        }
        ValidationErrorKind::Enum { options } => {
            let allowed = list_options(options);
            if is_section_tag(&path, options) {
                return vec![Violation::unrecognized_variant(
                    path,
                    format!(
                        "unrecognized section type {}; expected one of {{{allowed}}}",
                        error.instance
                    ),
                )];
            }
            format!("value must be one of {{{allowed}}}")
        }
        ValidationErrorKind::Constant { expected_value } => {
            format!("must be {expected_value}")
        }
        ValidationErrorKind::Type { kind } => match kind {
            TypeKind::Single(expected) => format!("must be of type {expected}"),
            _ => "has an invalid type".to_string(),
        },
        ValidationErrorKind::Format { format } if format == URL_OR_PATH_FORMAT => {
            "must be a valid HTTP(S) URL or local path".to_string()
        }
        ValidationErrorKind::Format { format } => format!("must be a valid {format}"),
        ValidationErrorKind::MinItems { limit } => format!("must contain at least {limit} item(s)"),
        ValidationErrorKind::MaxItems { limit } => format!("must contain at most {limit} item(s)"),
        ValidationErrorKind::MinLength { limit } if *limit == 1 => "must not be empty".to_string(),
        ValidationErrorKind::MinLength { limit } => {
            format!("must be at least {limit} character(s) long")
        }
        ValidationErrorKind::ExclusiveMinimum { limit } if limit.as_f64() == Some(0.0) => {
            "must be a positive number".to_string()
        }
        ValidationErrorKind::ExclusiveMinimum { limit } => format!("must be greater than {limit}"),
        ValidationErrorKind::Pattern { .. } if path.last_key() == Some("route") => {
            "must be a path starting with '/' and containing no whitespace".to_string()
        }
        ValidationErrorKind::Pattern { pattern } => format!("must match pattern {pattern}"),
        _ => error.to_string(),
    };

    vec![Violation::new(path, message)]
}

/// An `enum` failure on a `type` field whose options are the section tags.
fn is_section_tag(path: &FieldPath, options: &Value) -> bool {
    let tags_match = options.as_array().is_some_and(|options| {
        options.len() == SectionType::NAMES.len()
            && options
                .iter()
                .zip(SectionType::NAMES)
                .all(|(option, name)| option.as_str() == Some(*name))
    });
    tags_match && path.last_key() == Some("type")
}

fn list_options(options: &Value) -> String {
    match options.as_array() {
        Some(options) => options
            .iter()
            .map(|option| match option {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        None => options.to_string(),
    }
}

/// Keys are only closed under `i18n`: at the top level they are locales,
/// one level down they are message keys.
fn unexpected_key(entity: Entity, path: &FieldPath, key: &str) -> Violation {
    let within_i18n = match entity {
        Entity::I18n => Some(path.segments()),
        Entity::SiteConfig => match path.segments().split_first() {
            Some((PathSegment::Key(first), rest)) if first == "i18n" => Some(rest),
            _ => None,
        },
        _ => None,
    };
    let field = path.clone().key(key);
    match within_i18n.map(<[PathSegment]>::len) {
        Some(0) => Violation::new(
            field,
            format!(
                "locale must be one of {{{}}}",
                site_core::Locale::NAMES.join(", ")
            ),
        ),
        Some(1) => Violation::new(
            field,
            format!("is not a valid message key; keys must match {MESSAGE_KEY_PATTERN}"),
        ),
        _ => Violation::new(field, "is not an allowed property"),
    }
}
