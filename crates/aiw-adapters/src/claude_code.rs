//! Claude Code adapter
//!
//! The superset schema is modeled on Claude Code skills, so most fields copy across
//! unchanged. Windsurf and Copilot fields are dropped with a warning, and permissions move
//! to `.claude/settings.json` because Claude Code has no skill-scoped permissions.

use std::collections::BTreeMap;

use aiw_parser::{slugify_name, validate_template_name};
use aiw_protocol::models::is_known_model;
use aiw_protocol::{
    NON_CLAUDE_FIELDS, ParsedTemplate, PermissionBehavior, Permissions, Platform, TransformError,
    TransformResult, ValidationWarning,
};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::adapter::PlatformAdapter;
use crate::content_warnings::foreign_construct_warnings;
use crate::render::Frontmatter;

/// Project settings file receiving permission rules
pub const SETTINGS_PATH: &str = ".claude/settings.json";

/// Context values Claude Code understands
const KNOWN_CONTEXTS: [&str; 2] = ["fork", "inherit"];

/// Converts templates into Claude Code skills
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeCodeAdapter;

impl ClaudeCodeAdapter {
    /// Create a new adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn render_skill(template: &ParsedTemplate, name: &str) -> String {
        let meta = &template.metadata;
        Frontmatter::new()
            .field("name", name)
            .optional_field("description", meta.description.as_deref())
            .optional_quoted("version", meta.version.as_deref())
            .optional_list("allowed-tools", meta.allowed_tools.as_deref())
            .optional_field("model", meta.model.as_deref())
            .optional_field("context", meta.context.as_deref())
            .optional_field("agent", meta.agent.as_deref())
            .optional_flag("disable-model-invocation", meta.disable_model_invocation)
            .optional_quoted("argument-hint", meta.argument_hint.as_deref())
            .optional_field("language", meta.language.as_deref())
            .finish(&template.content)
    }

    fn render_settings(permissions: &Permissions) -> Result<String, TransformError> {
        let mut rules = Map::new();
        for behavior in [PermissionBehavior::Allow, PermissionBehavior::Deny] {
            let present = match behavior {
                PermissionBehavior::Allow => permissions.allow.is_some(),
                PermissionBehavior::Deny => permissions.deny.is_some(),
            };
            if present {
                rules.insert(
                    behavior.as_str().to_string(),
                    json!(permissions.rules(behavior)),
                );
            }
        }

        let settings = json!({ "permissions": Value::Object(rules) });
        serde_json::to_string_pretty(&settings)
            .map(|mut out| {
                out.push('\n');
                out
            })
            .map_err(|e| TransformError::Render {
                path: SETTINGS_PATH.to_string(),
                reason: e.to_string(),
            })
    }
}

impl PlatformAdapter for ClaudeCodeAdapter {
    fn platform(&self) -> Platform {
        Platform::ClaudeCode
    }

    fn output_path(&self, template: &ParsedTemplate) -> String {
        let slug = slugify_name(template.metadata.name().unwrap_or_default());
        format!(".claude/skills/{slug}/SKILL.md")
    }

    fn validate(&self, template: &ParsedTemplate) -> Vec<ValidationWarning> {
        let meta = &template.metadata;
        let mut warnings = Vec::new();

        match meta.name() {
            None => warnings.push(ValidationWarning::degraded(
                "name",
                "Missing required field 'name'; the skill cannot be generated",
            )),
            Some(name) if validate_template_name(name).is_err() => {
                warnings.push(ValidationWarning::degraded(
                    "name",
                    format!(
                        "Name '{name}' is not hyphen-case; the skill directory will be '{}'",
                        slugify_name(name)
                    ),
                ));
            }
            Some(_) => {}
        }

        if meta.description.as_deref().is_none_or(|d| d.trim().is_empty()) {
            warnings.push(ValidationWarning::degraded(
                "description",
                "Missing description; Claude cannot decide when to invoke the skill automatically",
            ));
        }

        for field in NON_CLAUDE_FIELDS {
            if meta.has_field(field) {
                warnings.push(ValidationWarning::unsupported(
                    field,
                    format!("Field '{field}' is not supported by Claude Code and will be dropped"),
                ));
            }
        }

        if meta.tools.is_some() {
            warnings.push(ValidationWarning::unsupported(
                "tools",
                "Field 'tools' is Copilot-specific and will be dropped; use 'allowed-tools' instead",
            ));
        }

        if meta.hooks.is_some() {
            warnings.push(ValidationWarning::unsupported(
                "hooks",
                "Hooks are configured in settings files and are not converted",
            ));
        }

        if let Some(model) = meta.model.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            if !is_known_model(model) {
                warnings.push(ValidationWarning::degraded(
                    "model",
                    format!("Unknown model '{model}'; it is emitted as written and may not resolve"),
                ));
            }
        }

        if let Some(context) = meta.context.as_deref() {
            if !KNOWN_CONTEXTS.contains(&context.trim()) {
                warnings.push(ValidationWarning::degraded(
                    "context",
                    format!("Unknown context '{context}'; expected 'fork' or 'inherit'"),
                ));
            }
        }

        if meta.permissions().is_some() {
            warnings.push(ValidationWarning::security(
                "permissions",
                format!(
                    "Permissions are written to {SETTINGS_PATH} and apply to the whole project, not just this skill"
                ),
            ));
        }

        warnings
    }

    fn transform(&self, template: &ParsedTemplate) -> TransformResult {
        let mut warnings = self.validate(template);
        let meta = &template.metadata;

        let Some(name) = meta.name() else {
            return TransformResult::failure(TransformError::missing_fields(["name"]), warnings);
        };

        if let Some(agent) = meta.agent.as_deref() {
            warnings.push(ValidationWarning::degraded(
                "agent",
                format!(
                    "Skill runs as agent: {agent}; make sure .claude/agents/{}.md exists in the target project",
                    slugify_name(agent)
                ),
            ));
        }

        warnings.extend(foreign_construct_warnings(
            &template.content,
            Platform::ClaudeCode,
        ));

        let mut files = BTreeMap::new();
        files.insert(
            self.output_path(template),
            Self::render_skill(template, name),
        );

        if let Some(permissions) = meta.permissions() {
            match Self::render_settings(permissions) {
                Ok(settings) => {
                    files.insert(SETTINGS_PATH.to_string(), settings);
                }
                Err(err) => return TransformResult::failure(err, warnings),
            }
        }

        debug!(
            template = name,
            files = files.len(),
            warnings = warnings.len(),
            "Transformed template for Claude Code"
        );
        TransformResult::success(files, warnings)
    }
}
