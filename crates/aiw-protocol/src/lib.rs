//! Shared protocol types for the aiw template converter
//!
//! This crate provides the data model passed between the content parser
//! (`aiw-parser`), the platform adapters (`aiw-adapters`) and the `aiw` CLI.
//!
//! # Type Organization
//!
//! - **Platforms**: [`platform`] - Claude Code, Windsurf, GitHub Copilot
//! - **Constructs**: [`construct`] - the 18 semantic construct types and parse results
//! - **Templates**: [`template`] - superset frontmatter schema and parsed templates
//! - **Permissions**: [`permissions`] - allow/deny rule lists
//! - **Warnings**: [`warning`] - categorized validation warnings
//! - **Transforms**: [`transform`] - adapter output and failure reasons
//! - **Models**: [`models`] - Claude model identifiers
//!
//! # Design Principles
//!
//! - **Zero I/O**: All types are pure data structures
//! - **Closed enums**: platforms, construct types and warning categories are exhaustive
//! - **Value semantics**: every result is created fresh per conversion

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod construct;
pub mod error;
pub mod models;
pub mod permissions;
pub mod platform;
pub mod template;
pub mod transform;
pub mod warning;

// Re-export commonly used types at crate level
pub use construct::{
    ConstructType, Location, ParsedContentAnalysis, ParsedFields, SectionType, SemanticConstruct,
};
pub use error::ProtocolError;
pub use permissions::{PermissionBehavior, Permissions};
pub use platform::Platform;
pub use template::{NON_CLAUDE_FIELDS, ParsedTemplate, TemplateMetadata};
pub use transform::{TransformError, TransformResult};
pub use warning::{ValidationWarning, WarningCategory};
