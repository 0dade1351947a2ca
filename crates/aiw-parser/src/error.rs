//! Error types for template parsing

use thiserror::Error;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur when splitting and reading a template
///
/// Content parsing itself never fails; these only arise from frontmatter extraction and
/// name validation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Template is structurally malformed
    #[error("Invalid template format: {0}")]
    InvalidFormat(String),

    /// YAML frontmatter parse error
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Template has no frontmatter delimiters
    #[error("Missing frontmatter delimiters (---) in template")]
    MissingFrontmatter,

    /// Invalid template name format
    #[error(
        "Invalid template name: '{0}'. Must be hyphen-case (lowercase alphanumeric + hyphens, no leading/trailing/consecutive hyphens)"
    )]
    InvalidName(String),

    /// Unrecognized workflow method name
    #[error("Unknown method: '{0}'. Expected one of: gsd, bmad")]
    UnknownMethod(String),
}

impl ParseError {
    /// Create a new `InvalidFormat` error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Create a new `InvalidName` error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName(name.into())
    }
}
