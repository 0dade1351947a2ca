//! Conversion settings

use std::path::{Path, PathBuf};

use aiw_adapters::{AdapterRegistry, ClaudeCodeAdapter, DEFAULT_CHAR_LIMIT, WindsurfAdapter};
use aiw_protocol::Platform;

use crate::cli::ConvertArgs;

/// Settings for one `aiw convert` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Directory output paths are resolved against
    pub output_dir: PathBuf,

    /// Report paths without writing
    pub dry_run: bool,

    /// Fail a conversion that produced any warning
    pub strict: bool,

    /// Target platforms, in the order given
    pub platforms: Vec<Platform>,

    /// Windsurf per-file character limit
    pub windsurf_char_limit: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            dry_run: false,
            strict: false,
            platforms: aiw_adapters::supported_platforms(),
            windsurf_char_limit: DEFAULT_CHAR_LIMIT,
        }
    }
}

impl ConvertConfig {
    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Enable or disable dry-run mode
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enable or disable strict mode
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the target platforms, dropping repeats
    #[must_use]
    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms.clear();
        for platform in platforms {
            if !self.platforms.contains(&platform) {
                self.platforms.push(platform);
            }
        }
        self
    }

    /// Set the Windsurf character limit
    #[must_use]
    pub fn with_windsurf_char_limit(mut self, limit: usize) -> Self {
        self.windsurf_char_limit = limit;
        self
    }

    /// Adapters configured for this run
    #[must_use]
    pub fn registry(&self) -> AdapterRegistry {
        AdapterRegistry::with_adapters(vec![
            Box::new(ClaudeCodeAdapter::new()),
            Box::new(WindsurfAdapter::new().with_char_limit(self.windsurf_char_limit)),
        ])
    }
}

impl From<&ConvertArgs> for ConvertConfig {
    fn from(args: &ConvertArgs) -> Self {
        let config = Self::default()
            .with_output_dir(&args.output)
            .with_dry_run(args.dry_run)
            .with_strict(args.strict)
            .with_platforms(args.to.iter().copied());
        match args.windsurf_char_limit {
            Some(limit) => config.with_windsurf_char_limit(limit),
            None => config,
        }
    }
}
