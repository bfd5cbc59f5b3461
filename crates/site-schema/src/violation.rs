//! # Field-Level Failures
//!
//! A [`Violation`] names the offending field with a [`FieldPath`] rendered
//! in dot/bracket notation from the document root (`pages[0].sections[1].type`,
//! `i18n.en["home title!"]`) together with a human-readable reason.
//!
//! Engine errors arrive as JSON Pointers. They are converted against the
//! validated document itself, so a numeric object key is never mistaken for
//! an array index.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a field, relative to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Append an object key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an array index.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Final segment, if it is an object key.
    pub fn last_key(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }

    /// Convert an RFC 6901 JSON Pointer into a field path.
    ///
    /// `document` decides whether each segment is an index or a key. Once
    /// the pointer leaves the document (e.g. for a missing property) the
    /// remaining segments are treated as keys.
    pub fn from_pointer(pointer: &str, document: &Value) -> Self {
        let mut path = Self::root();
        if pointer.is_empty() {
            return path;
        }
        let mut cursor = Some(document);
        for raw in pointer.trim_start_matches('/').split('/') {
            let token = raw.replace("~1", "/").replace("~0", "~");
            match cursor {
                Some(Value::Array(items)) => match token.parse::<usize>() {
                    Ok(index) => {
                        cursor = items.get(index);
                        path = path.index(index);
                    }
                    Err(_) => {
                        cursor = None;
                        path = path.key(token);
                    }
                },
                Some(Value::Object(map)) => {
                    cursor = map.get(&token);
                    path = path.key(token);
                }
                _ => {
                    cursor = None;
                    path = path.key(token);
                }
            }
        }
        path
    }

    /// Sort key placing failures in document order: `site`, `themes`,
    /// `pages`, `i18n`, then anything else; array elements by index.
    fn document_order(&self) -> (u8, Vec<usize>) {
        let rank = match self.0.first() {
            None => 0,
            Some(PathSegment::Key(key)) => match key.as_str() {
                "site" => 1,
                "themes" => 2,
                "pages" => 3,
                "i18n" => 4,
                _ => 5,
            },
            Some(PathSegment::Index(_)) => 5,
        };
        let indices = self
            .0
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Index(index) => Some(*index),
                PathSegment::Key(_) => None,
            })
            .collect();
        (rank, indices)
    }
}

fn is_plain_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if is_plain_identifier(key) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classification of a single failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    /// The field violates a structural or value rule.
    Validation,
    /// A section's `type` tag names no known variant.
    UnrecognizedVariant,
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    pub message: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            kind: ViolationKind::Validation,
        }
    }

    pub fn unrecognized_variant(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            kind: ViolationKind::UnrecognizedVariant,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "document: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A non-empty, document-ordered list of failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Order, deduplicate and wrap. Returns `None` for an empty list.
    pub fn collect(mut violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            return None;
        }
        // Stable: failures on the same element keep engine order.
        violations.sort_by_key(|violation| violation.path.document_order());
        let mut unique: Vec<Violation> = Vec::with_capacity(violations.len());
        for violation in violations {
            if !unique.contains(&violation) {
                unique.push(violation);
            }
        }
        Some(Self(unique))
    }

    /// Wrap exactly one failure.
    pub fn single(violation: Violation) -> Self {
        Self(vec![violation])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Whether every failure is an unrecognized section variant.
    pub fn all_unrecognized_variants(&self) -> bool {
        self.0
            .iter()
            .all(|violation| violation.kind == ViolationKind::UnrecognizedVariant)
    }

    /// First failure reported at `path` (rendered form).
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.0.iter().find(|violation| violation.path.to_string() == path)
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
