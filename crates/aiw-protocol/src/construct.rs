//! Semantic construct types
//!
//! A construct is a recognized platform-specific signature inside the markdown body of a
//! template ("spawn a subagent", "USE WHEN ...", `@workspace`, ...). The set of construct
//! types is closed: there are exactly 18 of them and each one belongs to the platform whose
//! syntax it comes from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;
use crate::platform::Platform;

/// The 18 construct categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructType {
    /// Spawning subagents or parallel agents
    AgentSpawn,
    /// "Use the X tool" or `Tool("arg")` invocations
    ToolCall,
    /// `context: fork` and isolated-context prose
    ContextSwitch,
    /// `allowed-tools`, forbidden operations, advisory compliance
    PermissionReference,
    /// "USE WHEN", `trigger: model_decision`
    ModelDecisionTrigger,
    /// `globs:` arrays and glob-like paths
    GlobPattern,
    /// `@rules:agent-<name>` persona references
    PersonaRule,
    /// "Part X of Y", `/prompt <name>`, "Proceed to Part N"
    SkillChaining,
    /// "Step 0", context gathering headers and checklists
    ContextGatheringProtocol,
    /// "Manual invocation", "When to invoke"
    ActivationInstruction,
    /// File-count limits and working sets
    WorkingSetLimit,
    /// "Checkpoint:", "Rollback plan:"
    CheckpointCommit,
    /// Progress files, markdown checklists
    ProgressTracking,
    /// `@workspace` commands
    WorkspaceCommand,
    /// Test runner invocations
    TestCommand,
    /// "not enforced", "emulated", "not supported"
    AdvisoryWarning,
    /// `<!-- Version: ... -->` style comments
    VersionComment,
    /// "Execution Flow" style section headers
    ExecutionFlowSection,
}

impl ConstructType {
    /// Every construct type, in registry order
    pub const ALL: [ConstructType; 18] = [
        Self::AgentSpawn,
        Self::ToolCall,
        Self::ContextSwitch,
        Self::PermissionReference,
        Self::ModelDecisionTrigger,
        Self::GlobPattern,
        Self::PersonaRule,
        Self::SkillChaining,
        Self::ContextGatheringProtocol,
        Self::ActivationInstruction,
        Self::WorkingSetLimit,
        Self::CheckpointCommit,
        Self::ProgressTracking,
        Self::WorkspaceCommand,
        Self::TestCommand,
        Self::AdvisoryWarning,
        Self::VersionComment,
        Self::ExecutionFlowSection,
    ];

    /// Kebab-case tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AgentSpawn => "agent-spawn",
            Self::ToolCall => "tool-call",
            Self::ContextSwitch => "context-switch",
            Self::PermissionReference => "permission-reference",
            Self::ModelDecisionTrigger => "model-decision-trigger",
            Self::GlobPattern => "glob-pattern",
            Self::PersonaRule => "persona-rule",
            Self::SkillChaining => "skill-chaining",
            Self::ContextGatheringProtocol => "context-gathering-protocol",
            Self::ActivationInstruction => "activation-instruction",
            Self::WorkingSetLimit => "working-set-limit",
            Self::CheckpointCommit => "checkpoint-commit",
            Self::ProgressTracking => "progress-tracking",
            Self::WorkspaceCommand => "workspace-command",
            Self::TestCommand => "test-command",
            Self::AdvisoryWarning => "advisory-warning",
            Self::VersionComment => "version-comment",
            Self::ExecutionFlowSection => "execution-flow-section",
        }
    }

    /// Platform whose syntax this construct signature originates from
    ///
    /// Independent of which platform a conversion targets.
    #[must_use]
    pub const fn source_platform(self) -> Platform {
        match self {
            Self::AgentSpawn | Self::ToolCall | Self::ContextSwitch | Self::PermissionReference => {
                Platform::ClaudeCode
            }
            Self::WorkspaceCommand | Self::TestCommand | Self::ExecutionFlowSection => {
                Platform::GithubCopilot
            }
            Self::ModelDecisionTrigger
            | Self::GlobPattern
            | Self::PersonaRule
            | Self::SkillChaining
            | Self::ContextGatheringProtocol
            | Self::ActivationInstruction
            | Self::WorkingSetLimit
            | Self::CheckpointCommit
            | Self::ProgressTracking
            | Self::AdvisoryWarning
            | Self::VersionComment => Platform::Windsurf,
        }
    }
}

impl fmt::Display for ConstructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstructType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownConstructType(s.to_string()))
    }
}

/// Position of a construct inside the source text
///
/// `start` and `end` are byte offsets (`end` exclusive); `line` is 1-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Location {
    /// Byte offset of the first matched byte
    pub start: usize,

    /// Byte offset one past the last matched byte
    pub end: usize,

    /// 1-based line number of `start`
    pub line: usize,
}

impl Location {
    /// Length of the matched span in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans share at least one byte
    #[must_use]
    pub const fn overlaps(&self, other: &Location) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Normalized tag for execution-flow headers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    /// "Execution Flow"
    ExecutionFlow,
    /// "Step-by-Step Execution"
    StepByStep,
    /// "Verification Points"
    VerificationPoints,
}

impl SectionType {
    /// Kebab-case tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExecutionFlow => "execution-flow",
            Self::StepByStep => "step-by-step",
            Self::VerificationPoints => "verification-points",
        }
    }
}

/// Structured fields extracted from a construct match
///
/// One variant per construct type that has anything to extract beyond the raw match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ParsedFields {
    /// agent-spawn
    AgentSpawn {
        /// Parallel agents were requested
        parallel: bool,
    },

    /// tool-call
    ToolCall {
        /// Tool name as written
        tool_name: String,
        /// Quoted argument of the direct call form
        #[serde(default, skip_serializing_if = "Option::is_none")]
        argument: Option<String>,
        /// Name is one of the built-in Claude Code tools
        known_tool: bool,
    },

    /// context-switch
    ContextSwitch {
        /// `fork`, `inherit`, `isolated`, `fresh`, `clean` or `forked`
        context_type: String,
    },

    /// permission-reference
    PermissionReference {
        /// Mentions an allow list
        is_allow: bool,
        /// Mentions forbidden operations
        is_deny: bool,
        /// Depends on model compliance rather than enforcement
        is_advisory: bool,
    },

    /// model-decision-trigger
    ModelDecisionTrigger {
        /// "USE WHEN" phrasing
        has_use_when: bool,
        /// `trigger: model_decision` field
        has_trigger_field: bool,
        /// "activates automatically" prose
        is_automatic: bool,
    },

    /// glob-pattern
    GlobPattern {
        /// Individual glob expressions
        patterns: Vec<String>,
    },

    /// persona-rule
    PersonaRule {
        /// Persona name with the `agent-` prefix removed
        persona_name: String,
    },

    /// skill-chaining
    SkillChaining {
        /// X in "Part X of Y"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current_part: Option<u32>,
        /// Y in "Part X of Y"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_parts: Option<u32>,
        /// N in "Proceed to Part N"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_part: Option<u32>,
        /// Name in `/prompt <name>`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        skill_name: Option<String>,
    },

    /// context-gathering-protocol
    ContextGatheringProtocol {
        /// "Step 0" literal
        has_step0: bool,
        /// "Context Checklist"
        has_checklist: bool,
    },

    /// activation-instruction
    ActivationInstruction {
        /// "Manual invocation"
        is_manual: bool,
    },

    /// working-set-limit
    WorkingSetLimit {
        /// Maximum number of files
        file_limit: u32,
    },

    /// checkpoint-commit
    CheckpointCommit {
        /// "Rollback plan:"
        has_rollback_plan: bool,
        /// "Step N: Checkpoint"
        has_step_number: bool,
        /// N in "Step N: Checkpoint"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step_number: Option<u32>,
    },

    /// progress-tracking
    ProgressTracking {
        /// References a progress file
        has_progress_file: bool,
        /// The referenced file
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progress_file: Option<String>,
        /// Markdown checklist item
        has_checklist: bool,
        /// Checklist item state
        #[serde(default, skip_serializing_if = "Option::is_none")]
        checked: Option<bool>,
    },

    /// workspace-command
    WorkspaceCommand {
        /// Verb following `@workspace`
        action: String,
    },

    /// test-command
    TestCommand {
        /// Test runner or package manager
        framework: String,
    },

    /// advisory-warning
    AdvisoryWarning {
        /// "not enforced"
        is_enforcement_warning: bool,
        /// "emulated"
        is_emulation_warning: bool,
        /// "not supported"
        is_limitation_warning: bool,
    },

    /// version-comment
    VersionComment {
        /// `<!-- Version: X.Y.Z -->`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        /// N in `<!-- Part N of M -->`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current_part: Option<u32>,
        /// M in `<!-- Part N of M -->`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_parts: Option<u32>,
        /// Source in `<!-- Adapted from ... -->`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        adapted_from: Option<String>,
    },

    /// execution-flow-section
    ExecutionFlowSection {
        /// Normalized header kind
        section_type: SectionType,
    },
}

/// One detected occurrence of a construct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SemanticConstruct {
    /// Construct category
    #[serde(rename = "type")]
    pub construct_type: ConstructType,

    /// Platform the signature originates from
    pub platform: Platform,

    /// Matched substring
    pub raw_text: String,

    /// Span and line
    pub location: Location,

    /// Extracted fields, absent when the match carries nothing beyond its text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedFields>,
}

/// Result of parsing a template body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContentAnalysis {
    /// The text that was analyzed
    pub raw_content: String,

    /// Detected constructs, ordered by `location.start`
    pub constructs: Vec<SemanticConstruct>,
}

impl ParsedContentAnalysis {
    /// Whether any construct was detected
    #[must_use]
    pub fn has_constructs(&self) -> bool {
        !self.constructs.is_empty()
    }

    /// Constructs whose source platform is `platform`
    pub fn by_platform(&self, platform: Platform) -> impl Iterator<Item = &SemanticConstruct> {
        self.constructs.iter().filter(move |c| c.platform == platform)
    }

    /// Constructs of a single type
    pub fn by_type(&self, construct_type: ConstructType) -> impl Iterator<Item = &SemanticConstruct> {
        self.constructs
            .iter()
            .filter(move |c| c.construct_type == construct_type)
    }

    /// Constructs whose source platform differs from `target`
    pub fn foreign_to(&self, target: Platform) -> impl Iterator<Item = &SemanticConstruct> {
        self.constructs.iter().filter(move |c| c.platform != target)
    }
}
