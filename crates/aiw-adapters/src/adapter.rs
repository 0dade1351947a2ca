//! Adapter contract and registry
//!
//! Adapters are pure: they read a [`ParsedTemplate`] and return values. Writing
//! `TransformResult::files` to disk is the caller's job, and a failed result must not be
//! written at all.
//!
//! # Example
//!
//! ```
//! use aiw_adapters::AdapterRegistry;
//! use aiw_protocol::{ParsedTemplate, Platform, TemplateMetadata};
//!
//! let registry = AdapterRegistry::new();
//! let template = ParsedTemplate::new(TemplateMetadata::default(), "x");
//!
//! let adapter = registry.get(Platform::Windsurf).unwrap();
//! assert_eq!(adapter.output_path(&template), ".windsurf/workflows/unnamed-skill.md");
//! assert!(registry.get(Platform::GithubCopilot).is_none());
//! ```

use std::fmt;

use aiw_protocol::{ParsedTemplate, Platform, TransformResult, ValidationWarning};

use crate::claude_code::ClaudeCodeAdapter;
use crate::windsurf::WindsurfAdapter;

/// Converts superset templates into one platform's native files
pub trait PlatformAdapter: Send + Sync + fmt::Debug {
    /// Target platform
    fn platform(&self) -> Platform;

    /// Relative path of the main output file
    ///
    /// Never fails: a missing name falls back to `unnamed-skill`.
    fn output_path(&self, template: &ParsedTemplate) -> String;

    /// Check metadata without producing output
    ///
    /// Pure and independent of [`transform`](Self::transform), so callers can use it as a
    /// preflight. The same warnings are repeated in the transform result.
    fn validate(&self, template: &ParsedTemplate) -> Vec<ValidationWarning>;

    /// Map fields and build the output files
    ///
    /// Fails with no files when required fields are missing.
    fn transform(&self, template: &ParsedTemplate) -> TransformResult;
}

/// Set of adapters looked up by platform
#[derive(Debug)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn PlatformAdapter>>,
}

impl AdapterRegistry {
    /// Create a registry with the default adapters
    ///
    /// Default adapters:
    /// - `ClaudeCodeAdapter`
    /// - `WindsurfAdapter` with the 12,000 character limit
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: vec![
                Box::new(ClaudeCodeAdapter::new()),
                Box::new(WindsurfAdapter::new()),
            ],
        }
    }

    /// Create with custom adapters
    ///
    /// # Example
    ///
    /// ```
    /// use aiw_adapters::{AdapterRegistry, WindsurfAdapter};
    /// use aiw_protocol::Platform;
    ///
    /// let registry = AdapterRegistry::with_adapters(vec![
    ///     Box::new(WindsurfAdapter::new().with_char_limit(6_000)),
    /// ]);
    /// assert_eq!(registry.platforms(), [Platform::Windsurf]);
    /// ```
    #[must_use]
    pub fn with_adapters(adapters: Vec<Box<dyn PlatformAdapter>>) -> Self {
        Self { adapters }
    }

    /// Adapter for `platform`, if one is registered
    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&dyn PlatformAdapter> {
        self.adapters
            .iter()
            .find(|a| a.platform() == platform)
            .map(AsRef::as_ref)
    }

    /// Whether `platform` has an adapter
    #[must_use]
    pub fn supports(&self, platform: Platform) -> bool {
        self.get(platform).is_some()
    }

    /// Registered platforms, in registration order
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        self.adapters.iter().map(|a| a.platform()).collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Default adapter for `platform`
///
/// Returns `None` for platforms whose output is not implemented yet (GitHub Copilot).
#[must_use]
pub fn adapter_for(platform: Platform) -> Option<Box<dyn PlatformAdapter>> {
    match platform {
        Platform::ClaudeCode => Some(Box::new(ClaudeCodeAdapter::new())),
        Platform::Windsurf => Some(Box::new(WindsurfAdapter::new())),
        Platform::GithubCopilot => None,
    }
}

/// Platforms with a default adapter
#[must_use]
pub fn supported_platforms() -> Vec<Platform> {
    Platform::ALL
        .into_iter()
        .filter(|p| adapter_for(*p).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_for_each_platform() {
        for platform in Platform::ALL {
            match adapter_for(platform) {
                Some(adapter) => assert_eq!(adapter.platform(), platform),
                None => assert_eq!(platform, Platform::GithubCopilot),
            }
        }
        assert_eq!(
            supported_platforms(),
            [Platform::ClaudeCode, Platform::Windsurf]
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = AdapterRegistry::default();
        assert!(registry.supports(Platform::ClaudeCode));
        assert!(registry.supports(Platform::Windsurf));
        assert!(!registry.supports(Platform::GithubCopilot));
        assert_eq!(registry.platforms(), supported_platforms());
    }

    #[test]
    fn test_custom_registry() {
        let registry = AdapterRegistry::with_adapters(vec![Box::new(ClaudeCodeAdapter::new())]);
        assert!(registry.get(Platform::Windsurf).is_none());
        assert_eq!(
            registry.get(Platform::ClaudeCode).map(|a| a.platform()),
            Some(Platform::ClaudeCode)
        );
    }
}
