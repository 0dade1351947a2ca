//! Permission rule types
//!
//! Templates declare permissions in the Claude Code rule syntax (`Read(**)`,
//! `Bash(npm test:*)`, `Read(.env)`). The same lists feed both the Claude Code
//! `settings.json` and the advisory rule file emitted for Windsurf.

use serde::{Deserialize, Serialize};

/// Whether a rule grants or refuses an operation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermissionBehavior {
    /// Allow the action
    Allow,

    /// Deny the action
    Deny,
}

impl PermissionBehavior {
    /// Lower-case key used in settings files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

/// `permissions:` block of a template
///
/// Lists are kept exactly as written: order preserved, no de-duplication.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permissions {
    /// Rules that are pre-approved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,

    /// Rules that are refused
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}

impl Permissions {
    /// Create permissions from allow and deny lists
    pub fn new<A, D>(allow: A, deny: D) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            allow: Some(allow.into_iter().map(Into::into).collect()),
            deny: Some(deny.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether neither list is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allow.is_none() && self.deny.is_none()
    }

    /// Rules for one behavior (empty when the list is absent)
    #[must_use]
    pub fn rules(&self, behavior: PermissionBehavior) -> &[String] {
        let list = match behavior {
            PermissionBehavior::Allow => &self.allow,
            PermissionBehavior::Deny => &self.deny,
        };
        list.as_deref().unwrap_or_default()
    }
}
