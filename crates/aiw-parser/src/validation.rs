//! Template name validation and normalization

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ParseError, Result};

/// Regex pattern for valid template names
///
/// Valid format: hyphen-case (lowercase alphanumeric + hyphens)
/// - Must start and end with alphanumeric
/// - Cannot have consecutive hyphens
/// - Pattern: ^[a-z0-9]+(-[a-z0-9]+)*$
static TEMPLATE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Failed to compile template name regex")
});

/// Name used when a template has none, or nothing survives normalization
pub const DEFAULT_TEMPLATE_NAME: &str = "unnamed-skill";

/// Validate a template name
///
/// Valid names:
/// - Lowercase alphanumeric characters and hyphens only
/// - Must start and end with alphanumeric (not hyphen)
/// - Cannot have consecutive hyphens
/// - Examples: "skill", "my-skill", "skill-1-2"
///
/// # Errors
///
/// Returns `ParseError::InvalidName` if the name doesn't match the required pattern.
pub fn validate_template_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ParseError::invalid_name("empty string"));
    }

    if !TEMPLATE_NAME_PATTERN.is_match(name) {
        return Err(ParseError::invalid_name(name));
    }

    Ok(())
}

/// Normalize a name into hyphen-case for use as a path segment
///
/// Keeps Unicode letters and digits (lowercased), turns every run of other characters into
/// one hyphen and trims hyphens at both ends, so the result never contains path separators
/// or `..`. Falls back to [`DEFAULT_TEMPLATE_NAME`] when nothing is left.
#[must_use]
pub fn slugify_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_TEMPLATE_NAME.to_string()
    } else {
        slug
    }
}
