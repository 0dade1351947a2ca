//! Command-line arguments

use std::path::PathBuf;

use aiw_parser::Method;
use aiw_protocol::Platform;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aiw")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Write an AI assistant template once, convert it for every platform", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Show debug logs
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert templates into platform files
    Convert(ConvertArgs),

    /// List the semantic constructs found in a template
    Analyze {
        /// Template file
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check a method template for references to the other method
    Lint {
        /// Template file
        file: PathBuf,

        /// Method the template belongs to (gsd, bmad)
        #[arg(short, long)]
        method: Method,
    },

    /// List target platforms
    Platforms,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Template file, or a directory searched for `*.md` templates
    pub source: PathBuf,

    /// Target platforms (claude-code, windsurf, github-copilot)
    #[arg(short, long = "to", required = true, value_delimiter = ',')]
    pub to: Vec<Platform>,

    /// Directory the platform files are written under
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Print the files that would be written without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Treat any warning as a failure
    #[arg(long)]
    pub strict: bool,

    /// Windsurf per-file character limit
    #[arg(long, value_name = "CHARS")]
    pub windsurf_char_limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args() {
        let cli = Cli::parse_from([
            "aiw",
            "convert",
            "skill.md",
            "--to",
            "claude,windsurf",
            "--dry-run",
            "--quiet",
        ]);
        assert!(cli.quiet);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.to, [Platform::ClaudeCode, Platform::Windsurf]);
        assert_eq!(args.output, PathBuf::from("."));
        assert!(args.dry_run);
        assert!(!args.strict);
    }

    #[test]
    fn test_usage_errors() {
        assert!(Cli::try_parse_from(["aiw", "convert", "skill.md"]).is_err());
        assert!(Cli::try_parse_from(["aiw", "convert", "x.md", "--to", "vim"]).is_err());
        assert!(Cli::try_parse_from(["aiw", "lint", "x.md", "--method", "scrum"]).is_err());
        assert!(Cli::try_parse_from(["aiw", "platforms", "--debug", "--quiet"]).is_err());
    }
}
