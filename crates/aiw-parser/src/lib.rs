#![deny(unsafe_code)]

//! # aiw parser
//!
//! Template parsing for the aiw converter: frontmatter extraction, name validation and the
//! semantic content parser that finds platform-specific constructs in a template body.
//!
//! ## Quick Start
//!
//! ```
//! use aiw_parser::{parse_content, parse_template};
//! use aiw_protocol::{ConstructType, Platform};
//!
//! let source = "---\nname: review\n---\nSpawn a subagent, then USE WHEN reviewing.\n";
//! let template = parse_template(source)?;
//! assert_eq!(template.metadata.name(), Some("review"));
//!
//! let analysis = parse_content(&template.content);
//! assert_eq!(analysis.constructs[0].construct_type, ConstructType::AgentSpawn);
//! assert_eq!(analysis.by_platform(Platform::Windsurf).count(), 1);
//! # Ok::<(), aiw_parser::ParseError>(())
//! ```
//!
//! ## Features
//!
//! - **Frontmatter**: `---` delimited YAML into the superset [`TemplateMetadata`] schema
//! - **Constructs**: 18 construct types across Claude Code, Windsurf and GitHub Copilot
//! - **Code awareness**: matches inside fenced blocks and inline code are ignored
//! - **Linting**: GSD/BMAD cross-method references
//!
//! [`TemplateMetadata`]: aiw_protocol::TemplateMetadata

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod error;
mod validation;

pub mod code_regions;
pub mod content;
pub mod frontmatter;
pub mod lint;
pub mod patterns;

// Re-exports
pub use content::{
    constructs_by_platform, constructs_by_type, construct_types, has_semantic_constructs,
    parse_content, source_platform,
};
pub use error::{ParseError, Result};
pub use frontmatter::{parse_metadata, parse_template};
pub use lint::{LintFinding, Method, lint_template};
pub use validation::{DEFAULT_TEMPLATE_NAME, slugify_name, validate_template_name};

/// Prelude module for convenient imports
///
/// Commonly used types and functions
pub mod prelude {
    pub use crate::{
        ParseError, Result, lint_template, parse_content, parse_template, slugify_name,
        validate_template_name,
    };
}
