//! Validation warnings
//!
//! Warnings are advisory: they describe what a conversion loses, emulates or cannot
//! enforce. They never fail a transform by themselves; escalating them (`--strict`) is a
//! caller-side policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Closed set of warning categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCategory {
    /// Field or feature has no equivalent on the target and is dropped
    Unsupported,

    /// Feature is approximated with advisory text or companion files
    Emulated,

    /// A target platform limit (size, count) shaped the output
    Limit,

    /// Security-relevant semantics differ from what the author likely expects
    Security,

    /// Output still works but with reduced fidelity
    Degraded,
}

impl WarningCategory {
    /// Upper-case label used in `[CATEGORY]` prefixes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsupported => "UNSUPPORTED",
            Self::Emulated => "EMULATED",
            Self::Limit => "LIMIT",
            Self::Security => "SECURITY",
            Self::Degraded => "DEGRADED",
        }
    }
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarningCategory {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNSUPPORTED" => Ok(Self::Unsupported),
            "EMULATED" => Ok(Self::Emulated),
            "LIMIT" => Ok(Self::Limit),
            "SECURITY" => Ok(Self::Security),
            "DEGRADED" => Ok(Self::Degraded),
            _ => Err(ProtocolError::UnknownWarningCategory(s.to_string())),
        }
    }
}

/// A single advisory finding about a template field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Metadata key (or `content` for body-level findings)
    pub field: String,

    /// Warning category
    pub category: WarningCategory,

    /// Human-readable message, rendered verbatim
    pub message: String,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(
        field: impl Into<String>,
        category: WarningCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            category,
            message: message.into(),
        }
    }

    /// Create an `UNSUPPORTED` warning
    pub fn unsupported(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, WarningCategory::Unsupported, message)
    }

    /// Create an `EMULATED` warning
    pub fn emulated(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, WarningCategory::Emulated, message)
    }

    /// Create a `LIMIT` warning
    pub fn limit(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, WarningCategory::Limit, message)
    }

    /// Create a `SECURITY` warning
    pub fn security(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, WarningCategory::Security, message)
    }

    /// Create a `DEGRADED` warning
    pub fn degraded(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, WarningCategory::Degraded, message)
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (field: {})", self.category, self.message, self.field)
    }
}
