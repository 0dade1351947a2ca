//! Warnings for platform syntax left in a template body
//!
//! Only constructs that are actual syntax on their home platform are reported. Prose
//! conventions such as checklists, test commands or section headers read the same on every
//! assistant.

use std::collections::BTreeMap;

use aiw_parser::parse_content;
use aiw_protocol::{ConstructType, Platform, ValidationWarning};

/// Construct types whose text only works on their source platform
const SYNTAX_CONSTRUCTS: [ConstructType; 7] = [
    ConstructType::AgentSpawn,
    ConstructType::ToolCall,
    ConstructType::ContextSwitch,
    ConstructType::ModelDecisionTrigger,
    ConstructType::PersonaRule,
    ConstructType::SkillChaining,
    ConstructType::WorkspaceCommand,
];

/// One DEGRADED warning per foreign construct type found in `content`
///
/// Warnings carry the field `content`, the first line and the occurrence count, in
/// construct type order.
#[must_use]
pub fn foreign_construct_warnings(content: &str, target: Platform) -> Vec<ValidationWarning> {
    let analysis = parse_content(content);

    // type -> (first line, count)
    let mut found: BTreeMap<ConstructType, (usize, usize)> = BTreeMap::new();
    for construct in analysis.foreign_to(target) {
        if !SYNTAX_CONSTRUCTS.contains(&construct.construct_type) {
            continue;
        }
        found
            .entry(construct.construct_type)
            .and_modify(|(_, count)| *count += 1)
            .or_insert((construct.location.line, 1));
    }

    found
        .into_iter()
        .map(|(construct_type, (line, count))| {
            ValidationWarning::degraded(
                "content",
                format!(
                    "{} {construct_type} reference(s) found (first at line {line}) are {} syntax with no {} equivalent; review the converted text",
                    count,
                    construct_type.source_platform().display_name(),
                    target.display_name(),
                ),
            )
        })
        .collect()
}
