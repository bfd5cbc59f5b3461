//! # Error Hierarchy
//!
//! Value-type constructors fail with [`ValidationError`], built with
//! `thiserror`. Loading, storage and transport errors belong to the crates
//! that perform them.

use thiserror::Error;

/// Errors raised by validated value-type constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is neither an HTTP(S) URL nor a local path.
    #[error("{0:?} must be a valid HTTP(S) URL or local path")]
    InvalidUrlOrPath(String),

    /// The string is not a usable i18n message key.
    #[error("{0:?} is not a valid message key; keys may only contain a-z, A-Z, 0-9, '_' and '.'")]
    InvalidMessageKey(String),

    /// A closed enumeration received a value outside its set.
    #[error("unknown {kind} {value:?}; value must be one of {{{allowed}}}")]
    UnknownValue {
        /// Name of the enumeration (e.g. "breakpoint").
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated list of accepted values.
        allowed: String,
    },

    /// A timestamp string could not be parsed.
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    /// A column width ratio is zero, negative or not finite.
    #[error("column ratio {0} must be greater than 0")]
    NonPositiveRatio(String),
}

impl ValidationError {
    /// Build an [`ValidationError::UnknownValue`] from an enumeration table.
    pub fn unknown_value(kind: &'static str, value: &str, allowed: &[&str]) -> Self {
        Self::UnknownValue {
            kind,
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_value_lists_allowed_set() {
        let err = ValidationError::unknown_value("breakpoint", "xxl", &["xs", "sm"]);
        assert_eq!(
            err.to_string(),
            "unknown breakpoint \"xxl\"; value must be one of {xs, sm}"
        );
    }

    #[test]
    fn url_or_path_message_names_the_accepted_forms() {
        let err = ValidationError::InvalidUrlOrPath(String::new());
        assert!(err.to_string().contains("HTTP(S) URL or local path"));
    }
}
