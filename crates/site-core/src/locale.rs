//! # Locales and Message Keys
//!
//! Translations are keyed by a two-letter [`Locale`] from a closed set.
//! Each locale maps dotted [`MessageKey`]s (`home.title`, `hero.ctaLabel`)
//! to translated text.

use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Pattern every dictionary key must match.
pub const MESSAGE_KEY_PATTERN: &str = r"^[a-zA-Z0-9_.]+$";

static MESSAGE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(MESSAGE_KEY_PATTERN)
        .unwrap_or_else(|e| unreachable!("message key pattern is a literal: {e}"))
});

/// Returns `true` if `key` is a usable i18n message key.
pub fn is_message_key(key: &str) -> bool {
    MESSAGE_KEY.is_match(key)
}

/// A recognized translation locale.
///
/// `Ord` follows declaration order so dictionaries iterate with the
/// default locale first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English. The fallback locale.
    #[default]
    En,
    /// French.
    Fr,
}

closed_set!(Locale, "locale", {
    En => "en",
    Fr => "fr",
});

impl Locale {
    /// The locale used when a message is missing from the requested one.
    pub const DEFAULT: Locale = Locale::En;
}

/// A validated dictionary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageKey(String);

impl MessageKey {
    /// Validate and wrap a key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMessageKey`] if the key is empty or
    /// contains characters outside `[a-zA-Z0-9_.]`.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if is_message_key(&key) {
            Ok(Self(key))
        } else {
            Err(ValidationError::InvalidMessageKey(key))
        }
    }

    /// Build `<prefix>.<field>`, the key shape used for section text.
    pub fn scoped(prefix: &str, field: &str) -> Result<Self, ValidationError> {
        Self::new(format!("{prefix}.{field}"))
    }

    /// Access the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageKey> for String {
    fn from(value: MessageKey) -> Self {
        value.0
    }
}

impl Borrow<str> for MessageKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
