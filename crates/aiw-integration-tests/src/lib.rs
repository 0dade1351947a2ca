//! Shared fixtures for the aiw integration tests
//!
//! Tests here run the whole pipeline (frontmatter split, content parse, adapter transform)
//! across crate boundaries.

use aiw_adapters::adapter_for;
use aiw_parser::parse_template;
use aiw_protocol::{ParsedTemplate, Platform, TransformResult};

/// Superset template exercising fields from all three platforms
pub const SUPERSET_TEMPLATE: &str = r#"---
name: commit-helper
description: Write conventional commit messages
version: 2
allowed-tools:
  - Read
  - Bash(git:*)
model: haiku
context: fork
trigger: model_decision
globs: ["*.ts"]
labels: [git]
permissions:
  allow:
    - Read(**)
  deny:
    - Read(.env)
---

# Commit Helper

USE WHEN creating commits.

1. Use the Glob tool to list staged files.
2. Summarize the diff.

```bash
# spawn a new agent here is only an example
git diff --cached
```
"#;

/// Parse `source`, panicking with the parse error on failure
///
/// # Panics
///
/// When `source` is not a valid template.
#[must_use]
pub fn template(source: &str) -> ParsedTemplate {
    parse_template(source).unwrap_or_else(|err| panic!("invalid fixture: {err}"))
}

/// Transform `template` with the default adapter for `platform`
///
/// # Panics
///
/// When `platform` has no adapter.
#[must_use]
pub fn convert(template: &ParsedTemplate, platform: Platform) -> TransformResult {
    adapter_for(platform)
        .unwrap_or_else(|| panic!("no adapter for {platform}"))
        .transform(template)
}

/// YAML block of a generated file
#[must_use]
pub fn frontmatter_of(file: &str) -> &str {
    file.strip_prefix("---\n")
        .and_then(|rest| rest.split_once("\n---\n"))
        .map_or("", |(yaml, _)| yaml)
}
