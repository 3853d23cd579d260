//! Identifier forms derived from a user-supplied component name

use crate::error::{Result, ScaffoldError};

/// The three spellings of one component name used across generated files.
///
/// Derived only from the raw name, so every file generated for one request
/// refers to the same identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameBundle {
    /// Type-name form: first letter upper-cased, rest untouched (`userAccount` -> `UserAccount`)
    pub title: String,
    /// Directory / package form: the raw name as given
    pub path_segment: String,
    /// Route form: lowercase name plus a trailing `s` (naive English plural)
    pub plural_route: String,
}

impl NameBundle {
    /// Derive the bundle for `raw`. Callers reject empty names first (see [`validate_name`]).
    pub fn derive(raw: &str) -> Self {
        debug_assert!(!raw.is_empty(), "component names are validated upstream");
        Self {
            title: capitalize_first(raw),
            path_segment: raw.to_string(),
            plural_route: format!("{}s", raw.to_lowercase()),
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reject names that cannot become a single path segment
pub fn validate_name(raw: &str) -> Result<()> {
    let invalid = |reason| ScaffoldError::InvalidName {
        name: raw.to_string(),
        reason,
    };

    if raw.trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if raw.contains(['/', '\\']) {
        return Err(invalid("name must not contain path separators"));
    }
    if raw == "." || raw == ".." {
        return Err(invalid("name must not be a relative path component"));
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(invalid("name must not contain whitespace"));
    }
    Ok(())
}
