//! Error types for protocol operations
//!
//! Covers the string conversions of the closed enums ([`Platform`](crate::Platform),
//! [`ConstructType`](crate::ConstructType), [`WarningCategory`](crate::WarningCategory)).

use std::fmt;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Platform identifier not recognized
    UnknownPlatform(String),

    /// Construct type tag not recognized
    UnknownConstructType(String),

    /// Warning category not recognized
    UnknownWarningCategory(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlatform(id) => write!(
                f,
                "Unknown platform '{id}'. Expected one of: claude-code, windsurf, github-copilot"
            ),
            Self::UnknownConstructType(tag) => write!(f, "Unknown construct type: {tag}"),
            Self::UnknownWarningCategory(tag) => write!(f, "Unknown warning category: {tag}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_platform_lists_choices() {
        let err = ProtocolError::UnknownPlatform("cursor".to_string());
        let msg = err.to_string();
        assert!(msg.contains("cursor"));
        assert!(msg.contains("claude-code"));
        assert!(msg.contains("windsurf"));
    }

    #[test]
    fn test_unknown_tags_are_named() {
        let err = ProtocolError::UnknownWarningCategory("NOISY".to_string());
        assert_eq!(err.to_string(), "Unknown warning category: NOISY");
    }
}
