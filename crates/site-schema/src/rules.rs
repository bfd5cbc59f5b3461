//! Cross-entity rules that JSON Schema cannot express.
//!
//! Run over the raw document after the structural pass. Elements whose
//! field is missing or not a string are skipped here; the structural pass
//! already reports them.

use std::collections::HashSet;

use serde_json::Value;

use crate::violation::{FieldPath, Violation};

/// All cross-entity failures of a site configuration document.
pub fn check_site_config(document: &Value) -> Vec<Violation> {
    let mut violations = unique_field(document, "themes", "themeName", "theme name");
    violations.extend(unique_field(document, "pages", "route", "route"));
    violations
}

/// Every later occurrence of a repeated `field` within the `list` array.
fn unique_field(document: &Value, list: &str, field: &str, label: &str) -> Vec<Violation> {
    let Some(items) = document.get(list).and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    let mut violations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(value) = item.get(field).and_then(Value::as_str) else {
            continue;
        };
        if !seen.insert(value) {
            violations.push(Violation::new(
                FieldPath::root().key(list).index(index).key(field),
                format!("duplicate {label} {value:?}; each {label} must be unique"),
            ));
        }
    }
    violations
}
