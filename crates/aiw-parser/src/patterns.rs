//! Construct pattern registry
//!
//! Every construct type owns one or more regular expressions and a single field
//! extractor. Patterns of the same type share capture group names so the extractor does
//! not need to know which pattern fired.
//!
//! Registry order is the tie-breaker for equal-length overlapping matches, so entries are
//! listed in [`ConstructType::ALL`] order and must stay that way.

use aiw_protocol::{ConstructType, ParsedFields, Platform, SectionType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Extracts structured fields from one match
///
/// Returns `None` when the match carries nothing beyond its text.
pub type FieldParser = fn(&Captures<'_>) -> Option<ParsedFields>;

/// Built-in Claude Code tool names
pub const KNOWN_TOOLS: &[&str] = &[
    "Read",
    "Write",
    "Edit",
    "MultiEdit",
    "Grep",
    "Glob",
    "LS",
    "Bash",
    "Task",
    "WebFetch",
    "WebSearch",
    "TodoWrite",
    "NotebookEdit",
    "NotebookRead",
];

/// Verbs recognized after `@workspace`
const WORKSPACE_ACTIONS: &str = "analyze|find|explain|search|list|review|summarize|fix|refactor|document|locate|show|describe|identify|check";

/// One registry entry
pub struct ConstructDefinition {
    /// Construct category
    pub construct_type: ConstructType,
    /// Compiled patterns, tried in order
    pub patterns: Vec<Regex>,
    /// Field extractor shared by all patterns
    pub parse: FieldParser,
}

impl ConstructDefinition {
    /// Platform the construct originates from
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.construct_type.source_platform()
    }
}

impl std::fmt::Debug for ConstructDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructDefinition")
            .field("construct_type", &self.construct_type)
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

static REGISTRY: Lazy<Vec<ConstructDefinition>> = Lazy::new(build_registry);

/// The full registry, one entry per construct type
#[must_use]
pub fn registry() -> &'static [ConstructDefinition] {
    &REGISTRY
}

/// Registry entry for one construct type
#[must_use]
pub fn definition(construct_type: ConstructType) -> Option<&'static ConstructDefinition> {
    registry()
        .iter()
        .find(|d| d.construct_type == construct_type)
}

fn build_registry() -> Vec<ConstructDefinition> {
    let known_tools = KNOWN_TOOLS.join("|");
    let direct_call =
        format!(r#"\b(?P<tool>{known_tools})\(\s*["'](?P<arg>[^"'\n]*)["']\s*\)"#);
    let workspace = format!(r"(?i)@workspace\b(?:[ \t]+/?(?P<action>{WORKSPACE_ACTIONS})\b)?");

    vec![
        entry(
            ConstructType::AgentSpawn,
            &[
                r"(?i)\bspawn(?:s|ed|ing)?\s+(?:an?\s+)?(?:new\s+|separate\s+|fresh\s+)?(?P<parallel>parallel\s+)?(?:sub-?)?agents?\b",
                r"(?i)\b(?:launch|dispatch)(?:es|ed|ing)?\s+(?:an?\s+)?(?:new\s+|separate\s+|dedicated\s+)?(?P<parallel>parallel\s+)?(?:sub-?)?agents?\b",
                r"(?i)\b(?P<parallel>parallel)\s+(?:sub-?)?agents?\b",
                r"(?i)\bsub-?agents?\b",
            ],
            parse_agent_spawn,
        ),
        entry(
            ConstructType::ToolCall,
            &[
                r"(?i)\b(?:use|invoke|call|run)\s+the\s+`?(?P<tool>[A-Za-z][\w-]*)`?\s+tool\b",
                direct_call.as_str(),
            ],
            parse_tool_call,
        ),
        entry(
            ConstructType::ContextSwitch,
            &[
                r#"(?i)\bcontext:[ \t]*["']?(?P<ctx>fork|inherit)\b"#,
                r"(?i)\b(?P<ctx>isolated|fresh|clean|forked)\s+context\b",
                r"(?i)\bcontext\s+(?P<ctx>isolation)\b",
            ],
            parse_context_switch,
        ),
        entry(
            ConstructType::PermissionReference,
            &[
                r"(?i)\ballowed[-_]tools\b",
                r"(?i)\b(?:forbidden|prohibited|disallowed|denied)\s+(?:operations?|tools?|actions?|commands?)\b",
                r"(?i)\b(?:tool|permission)\s+restrictions?\s+(?:are|is)\s+(?:advisory|not\s+enforced)\b",
                r"(?i)\b(?:relies|rely|depends|depend)\s+on\s+(?:AI|model|agent)\s+compliance\b",
            ],
            parse_permission_reference,
        ),
        entry(
            ConstructType::ModelDecisionTrigger,
            &[
                r"\bUSE WHEN\b",
                r#"\btrigger:[ \t]*["']?model_decision\b"#,
                r"(?i)\bactivates?\s+automatically\b",
            ],
            parse_model_decision_trigger,
        ),
        entry(
            ConstructType::GlobPattern,
            &[
                r"\bglobs:[ \t]*(?P<list>\[[^\]\n]*\]|[^\s\[][^\n]*)",
                r"(?:[\w.-]+/)*\*\*/[\w*{},-]+(?:[./][\w*{},-]+)*",
                r"(?:[\w.-]+/)*\*\.(?:\{[\w,]+\}|\w+)",
            ],
            parse_glob_pattern,
        ),
        entry(
            ConstructType::PersonaRule,
            &[
                r"@rules:agent-(?P<persona>[\w-]+)",
                r"(?i)\b(?:specialized|custom)\s+(?:sub-?)?agents?\b",
            ],
            parse_persona_rule,
        ),
        entry(
            ConstructType::SkillChaining,
            &[
                r"(?i)\bPart\s+(?P<current>\d+)\s+of\s+(?P<total>\d+)\b",
                r"\B/prompt\s+(?P<skill>[\w-]+)",
                r"(?i)\bProceed\s+to\s+Part\s+(?P<next>\d+)(?:\s+of\s+(?P<total>\d+))?\b",
            ],
            parse_skill_chaining,
        ),
        entry(
            ConstructType::ContextGatheringProtocol,
            &[
                r"(?i)\bStep\s+0\b",
                r"(?im)^#{1,6}[ \t]+Context[ \t]+Gathering[ \t]+Protocol\b",
                r"(?i)\bContext\s+Checklist\b",
            ],
            parse_context_gathering,
        ),
        entry(
            ConstructType::ActivationInstruction,
            &[
                r"(?i)\bManual\s+invocation\b",
                r"(?i)\b(?:invoke|run)\s+manually\b",
                r"(?i)\bWhen\s+to\s+invoke\b",
            ],
            parse_activation_instruction,
        ),
        entry(
            ConstructType::WorkingSetLimit,
            &[
                r"(?i)\b(?P<limit>\d+)[- ]files?\s+limit\b",
                r"(?i)\b(?:limit(?:ed)?\s+to|max(?:imum)?(?:\s+of)?|at\s+most|no\s+more\s+than|up\s+to)\s+(?P<limit>\d+)\s+files\b",
                r"(?i)\bbatch(?:es)?\s+of\s+(?P<limit>\d+)\s+files?\b",
                r"(?i)\bworking\s+set\b",
            ],
            parse_working_set_limit,
        ),
        entry(
            ConstructType::CheckpointCommit,
            &[
                r"(?i)\bStep\s+(?P<step>\d+):[ \t]*Checkpoint\b",
                r"(?i)\bCheckpoint:",
                r"(?i)\bRollback\s+plan:",
            ],
            parse_checkpoint_commit,
        ),
        entry(
            ConstructType::ProgressTracking,
            &[
                r"(?P<file>[\w./-]*(?i:progress)[\w-]*\.(?:md|json|txt|ya?ml))\b",
                r"(?m)^[ \t]*[-*+][ \t]+\[(?P<mark>[ xX])\]",
                r"(?im)^#{1,6}[ \t]+Progress[ \t]+Track(?:ing|er)\b",
            ],
            parse_progress_tracking,
        ),
        entry(
            ConstructType::WorkspaceCommand,
            &[workspace.as_str()],
            parse_workspace_command,
        ),
        entry(
            ConstructType::TestCommand,
            &[
                r"\b(?P<framework>npm|pnpm|yarn|bun|cargo|go|dotnet|mvn|gradle|gradlew|deno)\s+(?:run\s+)?test\b",
                r"\b(?P<framework>pytest|jest|vitest|mocha|rspec|phpunit)\b",
                r"\b(?P<framework>playwright)\s+test\b",
            ],
            parse_test_command,
        ),
        entry(
            ConstructType::AdvisoryWarning,
            &[
                r"(?i)\bemulated\s+(?:and|but)\s+not\s+enforced\b",
                r"(?i)\b(?:not|cannot|can't)\s+(?:be\s+)?enforced\b",
                r"(?i)\badvisory[- ]only\b",
                r"(?i)\bemulated\b",
                r"(?i)\bnot\s+(?:natively\s+|currently\s+)?supported\b",
                r"(?i)\bunsupported\b",
            ],
            parse_advisory_warning,
        ),
        entry(
            ConstructType::VersionComment,
            &[
                r"(?i)<!--\s*Version:\s*(?P<version>[\w.+-]+)\s*-->",
                r"(?i)<!--\s*Part\s+(?P<current>\d+)\s+of\s+(?P<total>\d+)\b[^\n]*?-->",
                r"(?i)<!--\s*Adapted\s+from\s+(?P<source>[^\n]*?)\s*-->",
            ],
            parse_version_comment,
        ),
        entry(
            ConstructType::ExecutionFlowSection,
            &[
                r"(?im)^#{1,6}[ \t]+(?P<section>Execution[ \t]+Flow|Step[- ]by[- ]Step[ \t]+Execution|Verification[ \t]+Points)\b",
            ],
            parse_execution_flow,
        ),
    ]
}

fn entry(construct_type: ConstructType, patterns: &[&str], parse: FieldParser) -> ConstructDefinition {
    ConstructDefinition {
        construct_type,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(p).expect("Failed to compile construct pattern"))
            .collect(),
        parse,
    }
}

fn text<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(0).map_or("", |m| m.as_str())
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    group(caps, name).and_then(|n| n.parse().ok())
}

fn parse_agent_spawn(caps: &Captures<'_>) -> Option<ParsedFields> {
    Some(ParsedFields::AgentSpawn {
        parallel: caps.name("parallel").is_some(),
    })
}

fn parse_tool_call(caps: &Captures<'_>) -> Option<ParsedFields> {
    let tool_name = group(caps, "tool")?.to_string();
    let known_tool = KNOWN_TOOLS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(&tool_name));
    Some(ParsedFields::ToolCall {
        tool_name,
        argument: group(caps, "arg").map(str::to_string),
        known_tool,
    })
}

fn parse_context_switch(caps: &Captures<'_>) -> Option<ParsedFields> {
    let context_type = match group(caps, "ctx")?.to_ascii_lowercase().as_str() {
        "isolation" => "isolated".to_string(),
        other => other.to_string(),
    };
    Some(ParsedFields::ContextSwitch { context_type })
}

fn parse_permission_reference(caps: &Captures<'_>) -> Option<ParsedFields> {
    let lower = text(caps).to_ascii_lowercase();
    Some(ParsedFields::PermissionReference {
        is_allow: lower.starts_with("allowed"),
        is_deny: ["forbidden", "prohibited", "disallowed", "denied"]
            .iter()
            .any(|w| lower.starts_with(w)),
        is_advisory: lower.contains("advisory")
            || lower.contains("not enforced")
            || lower.ends_with("compliance"),
    })
}

fn parse_model_decision_trigger(caps: &Captures<'_>) -> Option<ParsedFields> {
    let matched = text(caps);
    Some(ParsedFields::ModelDecisionTrigger {
        has_use_when: matched == "USE WHEN",
        has_trigger_field: matched.starts_with("trigger:"),
        is_automatic: matched.to_ascii_lowercase().ends_with("automatically"),
    })
}

fn parse_glob_pattern(caps: &Captures<'_>) -> Option<ParsedFields> {
    let patterns: Vec<String> = match group(caps, "list") {
        Some(list) => list
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|p| p.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        None => vec![text(caps).to_string()],
    };
    (!patterns.is_empty()).then_some(ParsedFields::GlobPattern { patterns })
}

fn parse_persona_rule(caps: &Captures<'_>) -> Option<ParsedFields> {
    let persona_name = group(caps, "persona")?.trim_end_matches('-').to_string();
    Some(ParsedFields::PersonaRule { persona_name })
}

fn parse_skill_chaining(caps: &Captures<'_>) -> Option<ParsedFields> {
    Some(ParsedFields::SkillChaining {
        current_part: number(caps, "current"),
        total_parts: number(caps, "total"),
        next_part: number(caps, "next"),
        skill_name: group(caps, "skill").map(str::to_string),
    })
}

fn parse_context_gathering(caps: &Captures<'_>) -> Option<ParsedFields> {
    let lower = text(caps).to_ascii_lowercase();
    Some(ParsedFields::ContextGatheringProtocol {
        has_step0: lower.starts_with("step"),
        has_checklist: lower.ends_with("checklist"),
    })
}

fn parse_activation_instruction(caps: &Captures<'_>) -> Option<ParsedFields> {
    Some(ParsedFields::ActivationInstruction {
        is_manual: text(caps).to_ascii_lowercase().contains("manual"),
    })
}

fn parse_working_set_limit(caps: &Captures<'_>) -> Option<ParsedFields> {
    number(caps, "limit").map(|file_limit| ParsedFields::WorkingSetLimit { file_limit })
}

fn parse_checkpoint_commit(caps: &Captures<'_>) -> Option<ParsedFields> {
    let step_number = number(caps, "step");
    Some(ParsedFields::CheckpointCommit {
        has_rollback_plan: text(caps).to_ascii_lowercase().starts_with("rollback"),
        has_step_number: step_number.is_some(),
        step_number,
    })
}

fn parse_progress_tracking(caps: &Captures<'_>) -> Option<ParsedFields> {
    let progress_file = group(caps, "file").map(str::to_string);
    let checked = group(caps, "mark").map(|mark| mark != " ");
    Some(ParsedFields::ProgressTracking {
        has_progress_file: progress_file.is_some(),
        progress_file,
        has_checklist: checked.is_some(),
        checked,
    })
}

fn parse_workspace_command(caps: &Captures<'_>) -> Option<ParsedFields> {
    let action = group(caps, "action")?.to_ascii_lowercase();
    Some(ParsedFields::WorkspaceCommand { action })
}

fn parse_test_command(caps: &Captures<'_>) -> Option<ParsedFields> {
    let framework = group(caps, "framework")?.to_string();
    Some(ParsedFields::TestCommand { framework })
}

fn parse_advisory_warning(caps: &Captures<'_>) -> Option<ParsedFields> {
    let lower = text(caps).to_ascii_lowercase();
    Some(ParsedFields::AdvisoryWarning {
        is_enforcement_warning: lower.contains("enforced") || lower.starts_with("advisory"),
        is_emulation_warning: lower.contains("emulated"),
        is_limitation_warning: lower.ends_with("supported"),
    })
}

fn parse_version_comment(caps: &Captures<'_>) -> Option<ParsedFields> {
    Some(ParsedFields::VersionComment {
        version: group(caps, "version").map(str::to_string),
        current_part: number(caps, "current"),
        total_parts: number(caps, "total"),
        adapted_from: group(caps, "source").map(str::to_string),
    })
}

fn parse_execution_flow(caps: &Captures<'_>) -> Option<ParsedFields> {
    let section = group(caps, "section")?.to_ascii_lowercase();
    let section_type = if section.starts_with("execution") {
        SectionType::ExecutionFlow
    } else if section.starts_with("step") {
        SectionType::StepByStep
    } else {
        SectionType::VerificationPoints
    };
    Some(ParsedFields::ExecutionFlowSection { section_type })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn first_match(construct_type: ConstructType, text: &str) -> Option<ParsedFields> {
        let def = definition(construct_type).unwrap();
        def.patterns
            .iter()
            .find_map(|p| p.captures(text))
            .and_then(|caps| (def.parse)(&caps))
    }

    #[test]
    fn test_registry_covers_every_type_in_order() {
        let types: Vec<_> = registry().iter().map(|d| d.construct_type).collect();
        assert_eq!(types, ConstructType::ALL);
        assert!(registry().iter().all(|d| !d.patterns.is_empty()));
    }

    #[test]
    fn test_platform_follows_construct_type() {
        for def in registry() {
            assert_eq!(def.platform(), def.construct_type.source_platform());
        }
    }

    #[rstest]
    #[case("Use the Glob tool", "Glob", None, true)]
    #[case("invoke the `WebFetch` tool", "WebFetch", None, true)]
    #[case("Use the frobnicate tool", "frobnicate", None, false)]
    #[case(r#"Read("src/main.rs")"#, "Read", Some("src/main.rs"), true)]
    fn test_tool_call_fields(
        #[case] text: &str,
        #[case] tool: &str,
        #[case] arg: Option<&str>,
        #[case] known: bool,
    ) {
        assert_eq!(
            first_match(ConstructType::ToolCall, text),
            Some(ParsedFields::ToolCall {
                tool_name: tool.to_string(),
                argument: arg.map(str::to_string),
                known_tool: known,
            })
        );
    }

    #[rstest]
    #[case("context: fork", "fork")]
    #[case("run in an isolated context", "isolated")]
    #[case("needs context isolation", "isolated")]
    fn test_context_switch_fields(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(
            first_match(ConstructType::ContextSwitch, text),
            Some(ParsedFields::ContextSwitch {
                context_type: expected.to_string()
            })
        );
    }

    #[test]
    fn test_glob_list_is_split() {
        assert_eq!(
            first_match(ConstructType::GlobPattern, r#"globs: ["*.ts", '**/*.tsx']"#),
            Some(ParsedFields::GlobPattern {
                patterns: vec!["*.ts".to_string(), "**/*.tsx".to_string()]
            })
        );
        assert_eq!(
            first_match(ConstructType::GlobPattern, "match src/**/*.rs."),
            Some(ParsedFields::GlobPattern {
                patterns: vec!["src/**/*.rs".to_string()]
            })
        );
    }

    #[test]
    fn test_skill_chaining_fields() {
        assert_eq!(
            first_match(ConstructType::SkillChaining, "Part 1 of 4: Core"),
            Some(ParsedFields::SkillChaining {
                current_part: Some(1),
                total_parts: Some(4),
                next_part: None,
                skill_name: None,
            })
        );
        assert_eq!(
            first_match(ConstructType::SkillChaining, "then /prompt deploy-app"),
            Some(ParsedFields::SkillChaining {
                current_part: None,
                total_parts: None,
                next_part: None,
                skill_name: Some("deploy-app".to_string()),
            })
        );
    }

    #[rstest]
    #[case("limit to 10 files", Some(10))]
    #[case("a 5-file limit", Some(5))]
    #[case("batches of 3 files", Some(3))]
    #[case("keep the working set small", None)]
    fn test_working_set_limit(#[case] text: &str, #[case] limit: Option<u32>) {
        assert_eq!(
            first_match(ConstructType::WorkingSetLimit, text),
            limit.map(|file_limit| ParsedFields::WorkingSetLimit { file_limit })
        );
    }

    #[test]
    fn test_workspace_command_without_verb_has_no_fields() {
        assert_eq!(
            first_match(ConstructType::WorkspaceCommand, "ask @workspace /explain this"),
            Some(ParsedFields::WorkspaceCommand {
                action: "explain".to_string()
            })
        );
        assert_eq!(first_match(ConstructType::WorkspaceCommand, "@workspace"), None);
    }

    #[test]
    fn test_progress_checklist_state() {
        assert_eq!(
            first_match(ConstructType::ProgressTracking, "- [x] done"),
            Some(ParsedFields::ProgressTracking {
                has_progress_file: false,
                progress_file: None,
                has_checklist: true,
                checked: Some(true),
            })
        );
    }

    #[rstest]
    #[case("## Execution Flow", SectionType::ExecutionFlow)]
    #[case("### Step-by-Step Execution", SectionType::StepByStep)]
    #[case("# Verification Points", SectionType::VerificationPoints)]
    fn test_execution_flow_sections(#[case] text: &str, #[case] expected: SectionType) {
        assert_eq!(
            first_match(ConstructType::ExecutionFlowSection, text),
            Some(ParsedFields::ExecutionFlowSection {
                section_type: expected
            })
        );
    }

    #[test]
    fn test_advisory_flags() {
        assert_eq!(
            first_match(ConstructType::AdvisoryWarning, "emulated but not enforced"),
            Some(ParsedFields::AdvisoryWarning {
                is_enforcement_warning: true,
                is_emulation_warning: true,
                is_limitation_warning: false,
            })
        );
    }
}
