//! AI-assistant platform identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// An AI coding assistant whose template format `aiw` understands
///
/// Serialized in kebab-case (`claude-code`, `windsurf`, `github-copilot`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Claude Code skills (`.claude/skills/<name>/SKILL.md`)
    ClaudeCode,

    /// Windsurf workflows and rules (`.windsurf/`)
    Windsurf,

    /// GitHub Copilot prompt and instruction files
    GithubCopilot,
}

impl Platform {
    /// All known platforms, in declaration order
    pub const ALL: [Platform; 3] = [Self::ClaudeCode, Self::Windsurf, Self::GithubCopilot];

    /// Canonical kebab-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::Windsurf => "windsurf",
            Self::GithubCopilot => "github-copilot",
        }
    }

    /// Human-readable product name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ClaudeCode => "Claude Code",
            Self::Windsurf => "Windsurf",
            Self::GithubCopilot => "GitHub Copilot",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude-code" | "claude" | "claudecode" => Ok(Self::ClaudeCode),
            "windsurf" => Ok(Self::Windsurf),
            "github-copilot" | "copilot" | "githubcopilot" => Ok(Self::GithubCopilot),
            _ => Err(ProtocolError::UnknownPlatform(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trips_through_str() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_platform_aliases() {
        assert_eq!("claude".parse::<Platform>().unwrap(), Platform::ClaudeCode);
        assert_eq!("Copilot".parse::<Platform>().unwrap(), Platform::GithubCopilot);
        assert!("cursor".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_serializes_kebab_case() {
        let json = serde_json::to_string(&Platform::GithubCopilot).unwrap();
        assert_eq!(json, "\"github-copilot\"");
    }
}
