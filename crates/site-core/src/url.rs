//! # URL-or-Path References
//!
//! Logos, favicons, section backgrounds and column media are referenced by
//! a string that must be either an absolute HTTP(S) URL or a local,
//! filesystem-style path. Validation is a pattern match only: the resource
//! is never resolved.
//!
//! Accepted URL shape: `http` or `https` scheme, a DNS host (labels of at
//! most 63 characters) or a bracketed IPv6 literal, an optional port of up
//! to five digits, then an optional path, query or fragment with no
//! whitespace.
//!
//! Accepted path shape: starts with `/`, `./`, `../`, or any other non-`/`
//! character (bare relative segments), with no whitespace anywhere. A bare
//! segment that opens with a URI scheme (`ftp:`, `mailto:`, `data:`) is not
//! a path, so non-HTTP URLs are rejected rather than mistaken for relative
//! files.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^https?://",
        r"(?:",
        r"(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)*[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"|\[(?:(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|::(?:[0-9a-fA-F]{1,4}:){0,6}[0-9a-fA-F]{1,4}|(?:[0-9a-fA-F]{1,4}:){1,7}:)\]",
        r")",
        r"(?::[0-9]{1,5})?",
        r"(?:[/?#]\S*)?$",
    ))
    .unwrap_or_else(|e| unreachable!("HTTP URL pattern is a literal: {e}"))
});

static LOCAL_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:/|\./|\.\./|[^/\s])\S*$")
        .unwrap_or_else(|e| unreachable!("local path pattern is a literal: {e}"))
});

static URI_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:")
        .unwrap_or_else(|e| unreachable!("scheme pattern is a literal: {e}"))
});

/// Returns `true` if `value` is an HTTP(S) URL or a local path.
///
/// Empty strings are always rejected.
pub fn is_url_or_path(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if HTTP_URL.is_match(value) {
        return true;
    }
    LOCAL_PATH.is_match(value) && !URI_SCHEME.is_match(value)
}

/// A validated reference to a remote (HTTP/HTTPS) or local asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlOrPath(String);

impl UrlOrPath {
    /// Validate and wrap a reference.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrlOrPath`] if the string is empty,
    /// contains whitespace, or is a URL with a scheme other than HTTP(S).
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if is_url_or_path(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidUrlOrPath(value))
        }
    }

    /// Access the reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this reference points at a remote HTTP(S) resource.
    pub fn is_remote(&self) -> bool {
        HTTP_URL.is_match(&self.0)
    }
}

impl TryFrom<String> for UrlOrPath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UrlOrPath> for String {
    fn from(value: UrlOrPath) -> Self {
        value.0
    }
}

impl fmt::Display for UrlOrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
