//! Windsurf adapter
//!
//! Templates become manually invoked workflows under `.windsurf/workflows/`. Windsurf has
//! no tool restrictions, forked contexts, agents or permissions, so those are emulated:
//! advisory sections in the workflow body plus companion rule files under
//! `.windsurf/rules/`. None of the emulations are enforced by Windsurf and every related
//! warning says so.
//!
//! Workflow files are capped at [`DEFAULT_CHAR_LIMIT`] characters. Longer workflows are
//! split into `<name>.md`, `<name>-part-2.md`, ... with each part pointing at the next.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use aiw_parser::{slugify_name, validate_template_name};
use aiw_protocol::{
    ParsedTemplate, PermissionBehavior, Permissions, Platform, TransformError, TransformResult,
    ValidationWarning,
};
use tracing::{debug, warn};

use crate::adapter::PlatformAdapter;
use crate::chunking;
use crate::content_warnings::foreign_construct_warnings;
use crate::render::Frontmatter;

/// Maximum characters Windsurf reads from one workflow file
pub const DEFAULT_CHAR_LIMIT: usize = 12_000;

const WORKFLOWS_DIR: &str = ".windsurf/workflows";
const RULES_DIR: &str = ".windsurf/rules";

/// Claude Code and Copilot fields with nothing to map to
const UNSUPPORTED_FIELDS: [&str; 8] = [
    "model",
    "argument-hint",
    "hooks",
    "disable-model-invocation",
    "applyTo",
    "excludeAgent",
    "mode",
    "tools",
];

/// Rule activation fields that do nothing on a workflow
const RULE_ONLY_FIELDS: [&str; 3] = ["trigger", "globs", "alwaysApply"];

/// Converts templates into Windsurf workflows
#[derive(Debug, Clone, Copy)]
pub struct WindsurfAdapter {
    char_limit: usize,
}

impl WindsurfAdapter {
    /// Create an adapter with the 12,000 character limit
    #[must_use]
    pub fn new() -> Self {
        Self {
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }

    /// Override the per-file character limit
    #[must_use]
    pub fn with_char_limit(mut self, char_limit: usize) -> Self {
        self.char_limit = char_limit;
        self
    }

    /// Configured per-file character limit
    #[must_use]
    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    fn agent_rule_path(agent: &str) -> String {
        format!("{RULES_DIR}/agent-{}.md", slugify_name(agent))
    }

    fn permissions_rule_path(slug: &str) -> String {
        format!("{RULES_DIR}/permissions-{slug}.md")
    }

    /// Advisory sections placed ahead of the original body
    fn advisory_sections(template: &ParsedTemplate, slug: &str) -> String {
        let meta = &template.metadata;
        let mut out = String::new();

        if let Some(tools) = meta.allowed_tools.as_deref().filter(|t| !t.is_empty()) {
            let _ = write!(
                out,
                "## Tool Restrictions (Advisory)\n\n> Advisory only: Windsurf does not enforce tool restrictions.\n\nOnly use these tools while running this workflow: {}.\n\n",
                tools.join(", ")
            );
        }

        if meta.context.as_deref().map(str::trim) == Some("fork") {
            out.push_str(
                "## Context Isolation (Advisory)\n\n> Advisory only: Windsurf does not support forked contexts.\n\nTreat this workflow as a fresh task. Do not rely on earlier conversation state, and summarize the outcome when finished.\n\n",
            );
        }

        if let Some(agent) = meta.agent.as_deref() {
            let _ = write!(
                out,
                "## Agent Persona (Advisory)\n\n> Advisory only: Windsurf does not load agent definitions, so the persona is not enforced.\n\nAct as the `{agent}` agent described in @rules:agent-{}.\n\n",
                slugify_name(agent)
            );
        }

        if meta.permissions().is_some() {
            let _ = write!(
                out,
                "## Permissions (Advisory)\n\n> Advisory only: Windsurf does not enforce permission rules.\n\nFollow the allow and deny rules in @rules:permissions-{slug}.\n\n"
            );
        }

        out
    }

    fn render_agent_rule(agent: &str) -> String {
        Frontmatter::new()
            .field("trigger", "manual")
            .field("description", &format!("Persona rules for the {agent} agent"))
            .finish(&format!(
                "# Agent: {agent}\n\n<!-- Adapted from Claude Code agent: {agent} -->\n\nThis persona was referenced by a converted skill. Copy the agent's instructions here and review them before use.\n"
            ))
    }

    fn render_permissions_rule(name: &str, permissions: &Permissions) -> String {
        let mut body = format!(
            "# Permissions: {name}\n\n> Advisory only. Windsurf does not enforce these rules; they rely on model compliance.\n"
        );
        for (behavior, heading) in [
            (PermissionBehavior::Allow, "Allowed"),
            (PermissionBehavior::Deny, "Denied"),
        ] {
            let rules = permissions.rules(behavior);
            if rules.is_empty() {
                continue;
            }
            let _ = write!(body, "\n## {heading}\n\n");
            for rule in rules {
                let _ = writeln!(body, "- `{rule}`");
            }
        }

        Frontmatter::new()
            .field("trigger", "always_on")
            .field("description", &format!("Advisory permission rules for {name}"))
            .finish(&body)
    }

    /// Workflow files, split when over the limit
    fn render_workflows(&self, slug: &str, description: &str, body: &str) -> Vec<(String, String)> {
        let single = Frontmatter::new()
            .field("description", description)
            .finish(body);
        if single.chars().count() <= self.char_limit {
            return vec![(format!("{WORKFLOWS_DIR}/{slug}.md"), single)];
        }

        // framing of a non-final part with two-digit part numbers
        let overhead = Self::render_part(slug, description, "", 98, 99).chars().count();
        let chunks = chunking::split(body, self.char_limit.saturating_sub(overhead));
        let total = chunks.len();

        chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| {
                let part = idx + 1;
                let path = if part == 1 {
                    format!("{WORKFLOWS_DIR}/{slug}.md")
                } else {
                    format!("{WORKFLOWS_DIR}/{slug}-part-{part}.md")
                };
                (path, Self::render_part(slug, description, chunk, part, total))
            })
            .collect()
    }

    fn render_part(slug: &str, description: &str, chunk: &str, part: usize, total: usize) -> String {
        let mut body = format!("<!-- Part {part} of {total}: {slug} -->\n\n{chunk}");
        if part < total {
            let next = part + 1;
            let _ = write!(
                body,
                "\n\n---\n\nContinue with `/{slug}-part-{next}` to run Part {next} of {total}.\n"
            );
        }
        Frontmatter::new()
            .field("description", &format!("{description} (Part {part} of {total})"))
            .finish(&body)
    }
}

impl Default for WindsurfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for WindsurfAdapter {
    fn platform(&self) -> Platform {
        Platform::Windsurf
    }

    fn output_path(&self, template: &ParsedTemplate) -> String {
        let slug = slugify_name(template.metadata.name().unwrap_or_default());
        format!("{WORKFLOWS_DIR}/{slug}.md")
    }

    fn validate(&self, template: &ParsedTemplate) -> Vec<ValidationWarning> {
        let meta = &template.metadata;
        let mut warnings = Vec::new();

        match meta.name() {
            None => warnings.push(ValidationWarning::degraded(
                "name",
                "Missing required field 'name'; the workflow cannot be generated",
            )),
            Some(name) if validate_template_name(name).is_err() => {
                warnings.push(ValidationWarning::degraded(
                    "name",
                    format!(
                        "Name '{name}' is not hyphen-case; the workflow will be invoked as '/{}'",
                        slugify_name(name)
                    ),
                ));
            }
            Some(_) => {}
        }

        if meta.description.as_deref().is_none_or(|d| d.trim().is_empty()) {
            warnings.push(ValidationWarning::degraded(
                "description",
                "Missing description; the workflow list will show the name only",
            ));
        }

        if meta.allowed_tools.is_some() {
            warnings.push(ValidationWarning::emulated(
                "allowed-tools",
                "Tool restrictions are emulated with an advisory section; advisory only, not enforced by Windsurf",
            ));
        }

        if meta.context.as_deref().map(str::trim) == Some("fork") {
            warnings.push(ValidationWarning::emulated(
                "context",
                "Context fork is emulated with isolation instructions; advisory only, not enforced by Windsurf",
            ));
        }

        if let Some(agent) = meta.agent.as_deref() {
            warnings.push(ValidationWarning::emulated(
                "agent",
                format!(
                    "Agent '{agent}' is emulated with the rule file {}; advisory only, not enforced by Windsurf",
                    Self::agent_rule_path(agent)
                ),
            ));
        }

        if meta.permissions().is_some() {
            warnings.push(ValidationWarning::emulated(
                "permissions",
                "Permissions are emulated with an always-on rule file; advisory only, not enforced by Windsurf",
            ));
            warnings.push(ValidationWarning::security(
                "permissions",
                "Deny rules are not enforced on Windsurf; protected files and commands remain reachable",
            ));
        }

        for field in UNSUPPORTED_FIELDS {
            if meta.has_field(field) {
                warnings.push(ValidationWarning::unsupported(
                    field,
                    format!("Field '{field}' is not supported by Windsurf workflows and will be dropped"),
                ));
            }
        }

        for field in RULE_ONLY_FIELDS {
            if meta.has_field(field) {
                warnings.push(ValidationWarning::degraded(
                    field,
                    format!(
                        "Field '{field}' only applies to Windsurf rules; workflows are invoked manually and it will be dropped"
                    ),
                ));
            }
        }

        warnings
    }

    fn transform(&self, template: &ParsedTemplate) -> TransformResult {
        let mut warnings = self.validate(template);
        let meta = &template.metadata;

        let Some(name) = meta.name() else {
            return TransformResult::failure(TransformError::missing_fields(["name"]), warnings);
        };
        let slug = slugify_name(name);
        let description = meta
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(name);

        warnings.extend(foreign_construct_warnings(&template.content, Platform::Windsurf));

        let mut files = BTreeMap::new();

        if let Some(agent) = meta.agent.as_deref() {
            let path = Self::agent_rule_path(agent);
            warnings.push(ValidationWarning::degraded(
                "agent",
                format!("agent reference requires manual companion file review: {path} (agent: {agent})"),
            ));
            files.insert(path, Self::render_agent_rule(agent));
        }

        if let Some(permissions) = meta.permissions() {
            files.insert(
                Self::permissions_rule_path(&slug),
                Self::render_permissions_rule(name, permissions),
            );
        }

        let body = format!(
            "{}{}",
            Self::advisory_sections(template, &slug),
            template.content
        );
        let workflows = self.render_workflows(&slug, description, &body);
        if workflows.len() > 1 {
            warn!(
                template = name,
                parts = workflows.len(),
                limit = self.char_limit,
                "Workflow split to fit the Windsurf character limit"
            );
            warnings.push(ValidationWarning::limit(
                "content",
                format!(
                    "Workflow exceeds the {}-character limit and was split into {} parts",
                    self.char_limit,
                    workflows.len()
                ),
            ));
        }
        files.extend(workflows);

        debug!(
            template = name,
            files = files.len(),
            warnings = warnings.len(),
            "Transformed template for Windsurf"
        );
        TransformResult::success(files, warnings)
    }
}
