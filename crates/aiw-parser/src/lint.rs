//! Cross-method template linter
//!
//! Workflow templates are written for one planning method. A GSD template that points at
//! BMAD paths or agents (or the reverse) will send the model looking for files and
//! commands that do not exist in the target project.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;

/// GSD paths, commands and agents
static GSD_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.planning/|/gsd:[\w-]*|\bget-shit-done\b|\bgsd-[\w-]+")
        .expect("Failed to compile GSD marker regex")
});

/// BMAD paths, commands and agents
static BMAD_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_bmad/|\.bmad-core/|/bmad-[\w-]+|\bbmad-[\w-]+")
        .expect("Failed to compile BMAD marker regex")
});

/// Planning method a template is written for
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Get Shit Done
    Gsd,
    /// BMAD method
    Bmad,
}

impl Method {
    /// Lower-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gsd => "gsd",
            Self::Bmad => "bmad",
        }
    }

    /// The method whose markers are foreign to this one
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Gsd => Self::Bmad,
            Self::Bmad => Self::Gsd,
        }
    }

    fn markers(self) -> &'static Regex {
        match self {
            Self::Gsd => &GSD_MARKERS,
            Self::Bmad => &BMAD_MARKERS,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gsd" => Ok(Self::Gsd),
            "bmad" => Ok(Self::Bmad),
            _ => Err(ParseError::UnknownMethod(s.to_string())),
        }
    }
}

/// A foreign-method reference
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LintFinding {
    /// 1-based line
    pub line: usize,
    /// Matched marker text
    pub matched: String,
    /// Method the marker belongs to
    pub referenced_method: Method,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Report every reference to the other method's paths, commands or agents
///
/// Code blocks are linted too: a fenced `cat .planning/STATE.md` is still a reference.
#[must_use]
pub fn lint_template(content: &str, method: Method) -> Vec<LintFinding> {
    let foreign = method.other();
    content
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| {
            foreign.markers().find_iter(line).map(move |m| LintFinding {
                line: idx + 1,
                matched: m.as_str().to_string(),
                referenced_method: foreign,
                message: format!(
                    "{method} template references {foreign} marker `{}`",
                    m.as_str()
                ),
            })
        })
        .collect()
}
