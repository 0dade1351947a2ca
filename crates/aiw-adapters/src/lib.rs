#![deny(unsafe_code)]

//! # aiw adapters
//!
//! Per-platform transforms from a parsed superset template to the files a target assistant
//! reads. Every adapter implements [`PlatformAdapter`]:
//!
//! - [`ClaudeCodeAdapter`]: `.claude/skills/<name>/SKILL.md` plus an optional
//!   `.claude/settings.json` permissions file
//! - [`WindsurfAdapter`]: `.windsurf/workflows/<name>.md`, companion rule files for
//!   emulated features, and chunking at the 12,000 character limit
//!
//! GitHub Copilot output is planned; [`adapter_for`] returns `None` for it.
//!
//! ```
//! use aiw_adapters::adapter_for;
//! use aiw_parser::parse_template;
//! use aiw_protocol::Platform;
//!
//! let template = parse_template("---\nname: lint-fix\ndescription: Fix lint errors\n---\nRun the linter.\n")?;
//! let adapter = adapter_for(Platform::ClaudeCode).unwrap();
//! let result = adapter.transform(&template);
//! assert!(result.success);
//! assert!(result.files.contains_key(".claude/skills/lint-fix/SKILL.md"));
//! # Ok::<(), aiw_parser::ParseError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]

mod chunking;
mod content_warnings;
mod render;

pub mod adapter;
pub mod claude_code;
pub mod windsurf;

pub use adapter::{AdapterRegistry, PlatformAdapter, adapter_for, supported_platforms};
pub use claude_code::ClaudeCodeAdapter;
pub use content_warnings::foreign_construct_warnings;
pub use windsurf::{DEFAULT_CHAR_LIMIT, WindsurfAdapter};
