#![deny(unsafe_code)]

//! # aiw
//!
//! Command-line front end for the aiw template converter. One superset template, written
//! in Markdown with YAML frontmatter, is converted into each assistant's native files:
//!
//! ```text
//! aiw convert skills/ --to claude-code,windsurf --output .
//! aiw analyze skills/code-review.md --json
//! aiw lint templates/plan.md --method gsd
//! aiw platforms
//! ```
//!
//! Exit codes: 0 success, 1 failed conversion, strict-mode warning or lint finding, 2
//! invalid usage, 3 file-system error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod exit;
pub mod logging;

use std::io::Write;

pub use cli::{Cli, Command, ConvertArgs};
pub use config::ConvertConfig;
pub use exit::{Status, UsageError, classify};

/// Run a parsed command line, writing command output to `out`
///
/// # Errors
///
/// Returns the error that stopped the command; [`classify`] maps it to an exit status.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<Status> {
    match cli.command {
        Command::Convert(args) => {
            let config = ConvertConfig::from(&args);
            let summary = commands::convert::run(&args.source, &config, cli.quiet, out).await?;
            Ok(summary.status())
        }
        Command::Analyze { file, json } => {
            commands::analyze::run(&file, json, out).await?;
            Ok(Status::Success)
        }
        Command::Lint { file, method } => commands::lint::run(&file, method, cli.quiet, out).await,
        Command::Platforms => {
            commands::platforms::run(out)?;
            Ok(Status::Success)
        }
    }
}
