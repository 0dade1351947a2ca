//! `aiw convert`

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use aiw_adapters::AdapterRegistry;
use aiw_adapters::claude_code::SETTINGS_PATH;
use aiw_parser::parse_template;
use aiw_protocol::{ParsedTemplate, Platform, TransformError, TransformResult};
use anyhow::Context;
use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ConvertConfig;
use crate::exit::{Status, UsageError};

/// Totals for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Files written, or that would be written in dry-run mode
    pub files: Vec<PathBuf>,
    /// Template/platform pairs that produced nothing
    pub failures: usize,
    /// Warnings across all conversions
    pub warnings: usize,
}

impl ConvertSummary {
    /// Exit status for the run
    #[must_use]
    pub fn status(&self) -> Status {
        if self.failures == 0 {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// Templates to convert
///
/// A file is used as is. A directory is searched recursively for `*.md` files, skipping
/// hidden directories so earlier output under `.claude/` or `.windsurf/` is not picked up.
///
/// # Errors
///
/// I/O error if `source` cannot be read, [`UsageError`] if a directory holds no templates.
pub fn collect_sources(source: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(source)
        .with_context(|| format!("Failed to read source {}", source.display()))?;
    if metadata.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut sources = Vec::new();
    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            sources.push(entry.into_path());
        }
    }

    if sources.is_empty() {
        return Err(UsageError(format!(
            "No templates (*.md) found under {}",
            source.display()
        ))
        .into());
    }
    debug!(count = sources.len(), source = %source.display(), "Collected templates");
    Ok(sources)
}

/// Transform one template for every configured platform
///
/// Platforms without an adapter get a failed result instead of stopping the others.
#[must_use]
pub fn transform_all(
    template: &ParsedTemplate,
    registry: &AdapterRegistry,
    platforms: &[Platform],
) -> Vec<(Platform, TransformResult)> {
    platforms
        .iter()
        .map(|&platform| {
            let result = match registry.get(platform) {
                Some(adapter) => adapter.transform(template),
                None => TransformResult::failure(
                    TransformError::UnsupportedPlatform(platform.display_name().to_string()),
                    Vec::new(),
                ),
            };
            (platform, result)
        })
        .collect()
}

/// Run `aiw convert`, reporting to `out`
///
/// # Errors
///
/// Fails on unreadable sources, unwritable output, or an empty source directory.
/// Conversion failures are counted in the summary instead.
pub async fn run<W: Write>(
    source: &Path,
    config: &ConvertConfig,
    quiet: bool,
    out: &mut W,
) -> anyhow::Result<ConvertSummary> {
    let sources = collect_sources(source)?;
    let registry = config.registry();
    let mut summary = ConvertSummary::default();
    // destination -> template that produced it
    let mut written: HashMap<PathBuf, &Path> = HashMap::new();
    let from_directory = !(sources.len() == 1 && sources[0] == source);

    for path in &sources {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::InvalidData && from_directory => {
                summary.failures += 1;
                writeln!(out, "{}: error: not valid UTF-8 text", path.display())?;
                continue;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read template {}", path.display()));
            }
        };

        let template = match parse_template(&text) {
            Ok(template) => template,
            Err(err) => {
                summary.failures += 1;
                writeln!(out, "{}: error: {err}", path.display())?;
                continue;
            }
        };

        for (platform, result) in transform_all(&template, &registry, &config.platforms) {
            summary.warnings += result.warnings.len();
            if !quiet || !result.success {
                writeln!(out, "{} -> {platform}", path.display())?;
            }
            if !quiet {
                for warning in &result.warnings {
                    writeln!(out, "  {warning}")?;
                }
            }

            let files = match accepted_files(result, config.strict) {
                Ok(files) => files,
                Err(reason) => {
                    summary.failures += 1;
                    writeln!(out, "  error: {reason}")?;
                    continue;
                }
            };

            if let Some((dest, owner)) = files.keys().find_map(|relative| {
                let dest = config.output_dir.join(relative);
                let owner = written.get(&dest).copied()?;
                (relative != SETTINGS_PATH && owner != path.as_path()).then_some((dest, owner))
            }) {
                summary.failures += 1;
                warn!(dest = %dest.display(), first = %owner.display(), "Output path collision");
                writeln!(
                    out,
                    "  error: {} was already written for {}; nothing written",
                    dest.display(),
                    owner.display()
                )?;
                continue;
            }

            for (relative, contents) in files {
                let dest = config.output_dir.join(&relative);
                written.insert(dest.clone(), path.as_path());
                if config.dry_run {
                    if !quiet {
                        writeln!(out, "  would write {}", dest.display())?;
                    }
                } else {
                    let contents = if relative == SETTINGS_PATH {
                        merged_settings(&dest, contents).await?
                    } else {
                        contents
                    };
                    write_file(&dest, &contents).await?;
                    if !quiet {
                        writeln!(out, "  wrote {}", dest.display())?;
                    }
                }
                summary.files.push(dest);
            }
        }
    }

    info!(
        templates = sources.len(),
        files = summary.files.len(),
        failures = summary.failures,
        warnings = summary.warnings,
        dry_run = config.dry_run,
        "Conversion finished"
    );
    Ok(summary)
}

/// Files to write, or why none are
fn accepted_files(
    result: TransformResult,
    strict: bool,
) -> Result<BTreeMap<String, String>, String> {
    if strict && result.success && !result.warnings.is_empty() {
        return Err(format!(
            "{} warning(s) in strict mode; nothing written",
            result.warnings.len()
        ));
    }
    result
        .into_result()
        .map(|(files, _)| files)
        .map_err(|err| err.to_string())
}

/// Generated settings merged into an existing settings file
async fn merged_settings(dest: &Path, generated: String) -> anyhow::Result<String> {
    let existing = match tokio::fs::read_to_string(dest).await {
        Ok(existing) => existing,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(generated),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", dest.display()));
        }
    };
    merge_settings(&existing, &generated)
        .with_context(|| format!("Failed to merge permissions into {}", dest.display()))
}

/// Union `permissions.allow` and `permissions.deny` into `existing`
///
/// Other keys in the existing file are kept untouched and existing rules keep their order.
fn merge_settings(existing: &str, generated: &str) -> anyhow::Result<String> {
    let mut settings: Value = serde_json::from_str(existing)?;
    let generated: Value = serde_json::from_str(generated)?;

    let root = settings
        .as_object_mut()
        .context("settings file is not a JSON object")?;
    let permissions = root
        .entry("permissions")
        .or_insert_with(|| Value::Object(serde_json::Map::new()))
        .as_object_mut()
        .context("`permissions` is not a JSON object")?;

    for key in ["allow", "deny"] {
        let Some(new_rules) = generated["permissions"][key].as_array() else {
            continue;
        };
        let rules = permissions
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .with_context(|| format!("`permissions.{key}` is not a JSON array"))?;
        for rule in new_rules {
            if !rules.contains(rule) {
                rules.push(rule.clone());
            }
        }
    }

    let mut out = serde_json::to_string_pretty(&settings)?;
    out.push('\n');
    Ok(out)
}

async fn write_file(dest: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(dest, contents)
        .await
        .with_context(|| format!("Failed to write {}", dest.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiw_protocol::TemplateMetadata;
    use crate::exit::classify;

    #[test]
    fn test_copilot_fails_without_stopping_others() {
        let template = ParsedTemplate::new(
            TemplateMetadata {
                name: Some("demo".to_string()),
                description: Some("Demo".to_string()),
                ..Default::default()
            },
            "Body\n",
        );
        let results = transform_all(
            &template,
            &AdapterRegistry::new(),
            &[Platform::GithubCopilot, Platform::ClaudeCode],
        );

        assert_eq!(results.len(), 2);
        assert!(!results[0].1.success);
        assert_eq!(
            results[0].1.error.as_ref().map(ToString::to_string).as_deref(),
            Some("GitHub Copilot output is not yet supported")
        );
        assert!(results[1].1.success);
    }

    #[test]
    fn test_strict_rejects_warnings() {
        let mut files = BTreeMap::new();
        files.insert("a.md".to_string(), "x".to_string());
        let warned = TransformResult::success(
            files.clone(),
            vec![aiw_protocol::ValidationWarning::degraded("name", "odd")],
        );

        assert!(accepted_files(warned.clone(), false).is_ok());
        assert!(accepted_files(warned, true).unwrap_err().contains("strict mode"));
        assert_eq!(
            accepted_files(TransformResult::success(files, vec![]), true).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_merge_settings_keeps_existing_rules() {
        let existing = r#"{"model": "opus", "permissions": {"allow": ["Bash(ls)"], "deny": ["Read(.env)"]}}"#;
        let generated = r#"{"permissions": {"allow": ["Read(**)"], "deny": ["Read(.env)"]}}"#;

        let merged: Value = serde_json::from_str(&merge_settings(existing, generated).unwrap()).unwrap();
        assert_eq!(merged["model"], "opus");
        assert_eq!(merged["permissions"]["allow"], serde_json::json!(["Bash(ls)", "Read(**)"]));
        assert_eq!(merged["permissions"]["deny"], serde_json::json!(["Read(.env)"]));
    }

    #[test]
    fn test_merge_settings_rejects_non_object() {
        assert!(merge_settings("[]", r#"{"permissions": {}}"#).is_err());
    }

    #[test]
    fn test_missing_source_is_environment_error() {
        let err = collect_sources(Path::new("/no/such/template.md")).unwrap_err();
        assert_eq!(classify(&err), Status::Environment);
    }
}
