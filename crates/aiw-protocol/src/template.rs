//! Superset template schema
//!
//! A template's frontmatter is the union of the fields understood by every supported
//! platform. Adapters read the fields native to their platform, emulate some of the
//! others and report the rest as dropped.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::permissions::Permissions;

/// Frontmatter keys native to Windsurf or GitHub Copilot
///
/// Claude Code has no equivalent for any of them.
pub const NON_CLAUDE_FIELDS: [&str; 8] = [
    "trigger",
    "globs",
    "labels",
    "alwaysApply",
    "author",
    "applyTo",
    "excludeAgent",
    "mode",
];

/// Parsed frontmatter in the superset schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateMetadata {
    /// Template name (required for conversion)
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub name: Option<String>,

    /// What the template does and when to use it
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub description: Option<String>,

    /// Template version (numbers are accepted and kept as written)
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub version: Option<String>,

    /// Claude Code tool allow list
    #[serde(
        default,
        rename = "allowed-tools",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_list"
    )]
    pub allowed_tools: Option<Vec<String>>,

    /// Model identifier or alias
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub model: Option<String>,

    /// Execution context (`fork` or `inherit`)
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub context: Option<String>,

    /// Agent the skill runs as
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub agent: Option<String>,

    /// Allow/deny permission rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,

    /// Windsurf rule activation mode
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub trigger: Option<String>,

    /// Windsurf glob activation patterns
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_list")]
    pub globs: Option<Vec<String>>,

    /// Windsurf labels
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_list")]
    pub labels: Option<Vec<String>>,

    /// Always-on rule flag
    #[serde(default, rename = "alwaysApply", skip_serializing_if = "Option::is_none")]
    pub always_apply: Option<bool>,

    /// Author attribution
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub author: Option<String>,

    /// Copilot instruction file scope
    #[serde(
        default,
        rename = "applyTo",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_like"
    )]
    pub apply_to: Option<String>,

    /// Copilot agents the file is hidden from
    #[serde(
        default,
        rename = "excludeAgent",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_list"
    )]
    pub exclude_agent: Option<Vec<String>>,

    /// Copilot chat mode
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub mode: Option<String>,

    /// Copilot tool list
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_list")]
    pub tools: Option<Vec<String>>,

    /// Platforms the template is meant for
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_list")]
    pub platforms: Option<Vec<String>>,

    /// Free-form compatibility notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<serde_yaml::Value>,

    /// Per-platform emulation hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emulation: Option<serde_yaml::Value>,

    /// Lifecycle hooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<serde_yaml::Value>,

    /// Natural language of the template body
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_like")]
    pub language: Option<String>,

    /// Hide the skill from automatic model invocation
    #[serde(
        default,
        rename = "disable-model-invocation",
        skip_serializing_if = "Option::is_none"
    )]
    pub disable_model_invocation: Option<bool>,

    /// Hint shown for slash-command arguments
    #[serde(
        default,
        rename = "argument-hint",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_like"
    )]
    pub argument_hint: Option<String>,

    /// Keys outside the superset schema
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl TemplateMetadata {
    /// Name, if present and not blank
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Whether a frontmatter key (as spelled in YAML) is set
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        match key {
            "name" => self.name.is_some(),
            "description" => self.description.is_some(),
            "version" => self.version.is_some(),
            "allowed-tools" => self.allowed_tools.is_some(),
            "model" => self.model.is_some(),
            "context" => self.context.is_some(),
            "agent" => self.agent.is_some(),
            "permissions" => self.permissions.is_some(),
            "trigger" => self.trigger.is_some(),
            "globs" => self.globs.is_some(),
            "labels" => self.labels.is_some(),
            "alwaysApply" => self.always_apply.is_some(),
            "author" => self.author.is_some(),
            "applyTo" => self.apply_to.is_some(),
            "excludeAgent" => self.exclude_agent.is_some(),
            "mode" => self.mode.is_some(),
            "tools" => self.tools.is_some(),
            "platforms" => self.platforms.is_some(),
            "compatibility" => self.compatibility.is_some(),
            "emulation" => self.emulation.is_some(),
            "hooks" => self.hooks.is_some(),
            "language" => self.language.is_some(),
            "disable-model-invocation" => self.disable_model_invocation.is_some(),
            "argument-hint" => self.argument_hint.is_some(),
            other => self.extra.contains_key(other),
        }
    }

    /// Permissions, if at least one list is present
    #[must_use]
    pub fn permissions(&self) -> Option<&Permissions> {
        self.permissions.as_ref().filter(|p| !p.is_empty())
    }
}

/// A template split into frontmatter and body
///
/// Created once per source file and passed by reference to adapters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTemplate {
    /// Frontmatter in the superset schema
    pub metadata: TemplateMetadata,

    /// Markdown body
    pub content: String,
}

impl ParsedTemplate {
    /// Create a template from metadata and body
    pub fn new(metadata: TemplateMetadata, content: impl Into<String>) -> Self {
        Self {
            metadata,
            content: content.into(),
        }
    }
}

/// Accept any YAML scalar as a string
fn string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

/// Accept a YAML sequence of scalars or a comma-separated string
fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    let list = match value {
        None | Some(serde_yaml::Value::Null) => return Ok(None),
        Some(serde_yaml::Value::Sequence(items)) => {
            items.iter().filter_map(scalar_to_string).collect()
        }
        Some(serde_yaml::Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Some(other) => match scalar_to_string(&other) {
            Some(s) => vec![s],
            None => {
                return Err(serde::de::Error::custom(
                    "expected a list or a comma-separated string",
                ));
            }
        },
    };
    Ok(Some(list))
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_from_yaml() {
        let yaml = r#"
name: code-review
description: Review pull requests
version: 1.2
allowed-tools: Read, Grep, Glob
model: sonnet
context: fork
permissions:
  allow: ["Read(**)"]
  deny: ["Read(.env)"]
globs: ["*.ts", "*.tsx"]
alwaysApply: false
custom-key: 42
"#;
        let meta: TemplateMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(meta.name(), Some("code-review"));
        assert_eq!(meta.version.as_deref(), Some("1.2"));
        assert_eq!(
            meta.allowed_tools.as_deref().unwrap(),
            ["Read", "Grep", "Glob"]
        );
        assert_eq!(meta.globs.as_deref().unwrap(), ["*.ts", "*.tsx"]);
        assert_eq!(meta.always_apply, Some(false));
        assert!(meta.permissions().is_some());
        assert!(meta.has_field("custom-key"));
        assert!(meta.has_field("alwaysApply"));
        assert!(!meta.has_field("trigger"));
    }

    #[test]
    fn test_blank_name_is_treated_as_missing() {
        let meta = TemplateMetadata {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.name(), None);
        assert!(meta.has_field("name"));
    }

    #[test]
    fn test_empty_permissions_block_is_ignored() {
        let meta: TemplateMetadata = serde_yaml::from_str("name: x\npermissions: {}\n").unwrap();
        assert!(meta.permissions.is_some());
        assert!(meta.permissions().is_none());
    }

    #[test]
    fn test_invalid_list_shape_is_rejected() {
        let result = serde_yaml::from_str::<TemplateMetadata>("globs:\n  a: b\n");
        assert!(result.is_err());
    }
}
