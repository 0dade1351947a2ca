//! Semantic content parser
//!
//! Scans a template body for the 18 construct types and reports each occurrence with its
//! span, line and extracted fields. Parsing never fails: unrecognized text simply yields no
//! constructs.
//!
//! # Matching rules
//!
//! 1. Matches touching a fenced code block, or partially overlapping an inline code span,
//!    are discarded before anything else.
//! 2. Overlapping candidates are resolved longest-first. Equal lengths go to the
//!    candidate found first (registry order, then pattern order, then position).
//! 3. The surviving constructs are pairwise disjoint and ordered by start offset.

use std::collections::BTreeMap;

use aiw_protocol::{
    ConstructType, Location, ParsedContentAnalysis, Platform, SemanticConstruct,
};
use regex::Captures;
use tracing::{debug, trace};

use crate::code_regions::CodeRegions;
use crate::patterns::{ConstructDefinition, registry};

/// A raw match awaiting overlap resolution
struct Candidate<'t> {
    definition: &'static ConstructDefinition,
    order: usize,
    start: usize,
    end: usize,
    captures: Captures<'t>,
}

impl Candidate<'_> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Parse a template body into semantic constructs
///
/// Deterministic: the same input always yields the same constructs in the same order.
#[must_use]
pub fn parse_content(text: &str) -> ParsedContentAnalysis {
    if text.is_empty() {
        return ParsedContentAnalysis::default();
    }

    let regions = CodeRegions::scan(text);
    let candidates = collect_candidates(text, &regions);
    let found = candidates.len();
    let accepted = resolve_overlaps(candidates);

    let lines = LineIndex::new(text);
    let constructs: Vec<SemanticConstruct> = accepted
        .into_iter()
        .map(|c| SemanticConstruct {
            construct_type: c.definition.construct_type,
            platform: c.definition.platform(),
            raw_text: text[c.start..c.end].to_string(),
            location: Location {
                start: c.start,
                end: c.end,
                line: lines.line_of(c.start),
            },
            parsed: (c.definition.parse)(&c.captures),
        })
        .collect();

    debug!(
        bytes = text.len(),
        code_regions = regions.regions().len(),
        candidates = found,
        constructs = constructs.len(),
        "Parsed template content"
    );

    ParsedContentAnalysis {
        raw_content: text.to_string(),
        constructs,
    }
}

fn collect_candidates<'t>(text: &'t str, regions: &CodeRegions) -> Vec<Candidate<'t>> {
    let mut candidates = Vec::new();
    for definition in registry() {
        for pattern in &definition.patterns {
            for captures in pattern.captures_iter(text) {
                let Some(whole) = captures.get(0) else {
                    continue;
                };
                if whole.is_empty() {
                    continue;
                }
                if regions.excludes(whole.range()) {
                    trace!(
                        construct = %definition.construct_type,
                        start = whole.start(),
                        "Skipping match inside code"
                    );
                    continue;
                }
                candidates.push(Candidate {
                    definition,
                    order: candidates.len(),
                    start: whole.start(),
                    end: whole.end(),
                    captures,
                });
            }
        }
    }
    candidates
}

/// Keep the longest non-overlapping candidates, returned in text order
fn resolve_overlaps(mut candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then(a.order.cmp(&b.order)));

    // start -> end of every accepted span
    let mut taken: BTreeMap<usize, usize> = BTreeMap::new();
    let mut accepted = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let blocked = taken
            .range(..candidate.end)
            .next_back()
            .is_some_and(|(_, &end)| end > candidate.start);
        if blocked {
            trace!(
                construct = %candidate.definition.construct_type,
                start = candidate.start,
                "Dropping overlapped match"
            );
            continue;
        }
        taken.insert(candidate.start, candidate.end);
        accepted.push(candidate);
    }

    accepted.sort_by(|a, b| a.start.cmp(&b.start).then(a.order.cmp(&b.order)));
    accepted
}

/// Byte offset to 1-based line lookup
struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        Self {
            newlines: text.match_indices('\n').map(|(i, _)| i).collect(),
        }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}

/// Whether the text contains at least one construct
#[must_use]
pub fn has_semantic_constructs(text: &str) -> bool {
    parse_content(text).has_constructs()
}

/// Constructs originating from `platform`, in text order
#[must_use]
pub fn constructs_by_platform(
    analysis: &ParsedContentAnalysis,
    platform: Platform,
) -> Vec<&SemanticConstruct> {
    analysis.by_platform(platform).collect()
}

/// Constructs of one type, in text order
#[must_use]
pub fn constructs_by_type(
    analysis: &ParsedContentAnalysis,
    construct_type: ConstructType,
) -> Vec<&SemanticConstruct> {
    analysis.by_type(construct_type).collect()
}

/// All 18 construct types
#[must_use]
pub fn construct_types() -> &'static [ConstructType] {
    &ConstructType::ALL
}

/// Platform a construct type originates from
#[must_use]
pub const fn source_platform(construct_type: ConstructType) -> Platform {
    construct_type.source_platform()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiw_protocol::{ParsedFields, SectionType};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn types(analysis: &ParsedContentAnalysis) -> Vec<ConstructType> {
        analysis.constructs.iter().map(|c| c.construct_type).collect()
    }

    #[test]
    fn test_empty_and_plain_text() {
        let analysis = parse_content("");
        assert!(analysis.constructs.is_empty());
        assert_eq!(analysis.raw_content, "");

        let analysis = parse_content("Just some regular markdown content.");
        assert!(!analysis.has_constructs());
        assert_eq!(analysis.raw_content, "Just some regular markdown content.");
    }

    #[test]
    fn test_single_agent_spawn() {
        let text = "First, spawn a new agent to investigate.";
        let analysis = parse_content(text);

        assert_eq!(analysis.constructs.len(), 1);
        let construct = &analysis.constructs[0];
        assert_eq!(construct.construct_type, ConstructType::AgentSpawn);
        assert_eq!(construct.platform, Platform::ClaudeCode);
        assert_eq!(construct.raw_text, "spawn a new agent");
        assert_eq!(construct.location.start, 7);
        assert_eq!(construct.location.end, 24);
        assert_eq!(construct.location.line, 1);
        assert_eq!(
            construct.parsed,
            Some(ParsedFields::AgentSpawn { parallel: false })
        );
    }

    #[test]
    fn test_mixed_platforms() {
        let text = "Use the Glob tool to find files.\nUSE WHEN creating commits.";
        let analysis = parse_content(text);

        assert_eq!(
            types(&analysis),
            [ConstructType::ToolCall, ConstructType::ModelDecisionTrigger]
        );
        assert_eq!(constructs_by_platform(&analysis, Platform::ClaudeCode).len(), 1);
        assert_eq!(constructs_by_platform(&analysis, Platform::Windsurf).len(), 1);
        assert_eq!(analysis.constructs[1].location.line, 2);
    }

    #[test]
    fn test_skill_chaining_header() {
        let analysis = parse_content("Part 1 of 4: Core Authentication Module");

        assert_eq!(analysis.constructs.len(), 1);
        assert_eq!(
            analysis.constructs[0].parsed,
            Some(ParsedFields::SkillChaining {
                current_part: Some(1),
                total_parts: Some(4),
                next_part: None,
                skill_name: None,
            })
        );
    }

    #[test]
    fn test_fenced_block_is_ignored() {
        let text = "Intro\n```\nspawn a new agent\nUSE WHEN testing\n```\nOutro";
        let analysis = parse_content(text);
        assert!(analysis.constructs.is_empty());
    }

    #[test]
    fn test_inline_code_is_ignored() {
        let text = "Literal `spawn a subagent` example, but spawn a subagent here.";
        let analysis = parse_content(text);

        assert_eq!(analysis.constructs.len(), 1);
        assert_eq!(analysis.constructs[0].location.start, 40);
    }

    #[test]
    fn test_backticked_tool_name_is_still_a_tool_call() {
        let analysis = parse_content("Use the `Read` tool first.");
        assert_eq!(types(&analysis), [ConstructType::ToolCall]);
        assert_eq!(analysis.constructs[0].raw_text, "Use the `Read` tool");
    }

    /// A candidate as `collect_candidates` would number it for `construct_type`
    fn candidate(construct_type: ConstructType, start: usize, end: usize) -> Candidate<'static> {
        let index = ConstructType::ALL
            .iter()
            .position(|&t| t == construct_type)
            .unwrap();
        let definition = &registry()[index];
        assert_eq!(definition.construct_type, construct_type);
        Candidate {
            definition,
            order: index,
            start,
            end,
            captures: regex::Regex::new("x").unwrap().captures("x").unwrap(),
        }
    }

    #[rstest]
    #[case(0, 12)]
    #[case(4, 16)]
    fn test_equal_length_tie_goes_to_registry_order(#[case] start: usize, #[case] end: usize) {
        let first = ConstructType::ALL[2];
        let second = ConstructType::ALL[9];

        for pushed in [
            vec![candidate(second, start, end), candidate(first, 0, 12)],
            vec![candidate(first, 0, 12), candidate(second, start, end)],
        ] {
            let accepted = resolve_overlaps(pushed);
            assert_eq!(accepted.len(), 1);
            assert_eq!(accepted[0].definition.construct_type, first);
            assert_eq!((accepted[0].start, accepted[0].end), (0, 12));
        }
    }

    #[test]
    fn test_longest_match_wins() {
        // "Part 2 of 3" sits inside the longer version comment
        let analysis = parse_content("<!-- Part 2 of 3: deploy -->");

        assert_eq!(types(&analysis), [ConstructType::VersionComment]);
        assert_eq!(
            analysis.constructs[0].parsed,
            Some(ParsedFields::VersionComment {
                version: None,
                current_part: Some(2),
                total_parts: Some(3),
                adapted_from: None,
            })
        );
    }

    #[test]
    fn test_nested_warning_is_absorbed() {
        // "not enforced" alone is an advisory warning
        let analysis = parse_content("Tool restrictions are not enforced.");
        assert_eq!(types(&analysis), [ConstructType::PermissionReference]);
    }

    #[test]
    fn test_lines_are_one_based() {
        let text = "line one\n\n## Execution Flow\n- [ ] first\n";
        let analysis = parse_content(text);

        let lines: Vec<_> = analysis.constructs.iter().map(|c| c.location.line).collect();
        assert_eq!(lines, [3, 4]);
        assert_eq!(
            analysis.constructs[0].parsed,
            Some(ParsedFields::ExecutionFlowSection {
                section_type: SectionType::ExecutionFlow
            })
        );
    }

    #[test]
    fn test_multibyte_text_uses_byte_offsets() {
        let text = "Café résumé: spawn a subagent";
        let analysis = parse_content(text);

        let construct = &analysis.constructs[0];
        assert_eq!(&text[construct.location.start..construct.location.end], "spawn a subagent");
    }

    #[rstest]
    #[case("spawn parallel agents", ConstructType::AgentSpawn)]
    #[case(r#"Read("src/lib.rs")"#, ConstructType::ToolCall)]
    #[case("context: fork", ConstructType::ContextSwitch)]
    #[case("allowed-tools", ConstructType::PermissionReference)]
    #[case("trigger: model_decision", ConstructType::ModelDecisionTrigger)]
    #[case("src/**/*.ts", ConstructType::GlobPattern)]
    #[case("@rules:agent-reviewer", ConstructType::PersonaRule)]
    #[case("/prompt deploy-part-2", ConstructType::SkillChaining)]
    #[case("## Context Gathering Protocol", ConstructType::ContextGatheringProtocol)]
    #[case("Manual invocation", ConstructType::ActivationInstruction)]
    #[case("limit to 10 files", ConstructType::WorkingSetLimit)]
    #[case("Rollback plan:", ConstructType::CheckpointCommit)]
    #[case("update PROGRESS.md", ConstructType::ProgressTracking)]
    #[case("@workspace /explain", ConstructType::WorkspaceCommand)]
    #[case("npm run test", ConstructType::TestCommand)]
    #[case("not natively supported", ConstructType::AdvisoryWarning)]
    #[case("<!-- Version: 1.2.0 -->", ConstructType::VersionComment)]
    #[case("### Verification Points", ConstructType::ExecutionFlowSection)]
    fn test_each_construct_type_is_detected(
        #[case] text: &str,
        #[case] expected: ConstructType,
    ) {
        let analysis = parse_content(text);
        assert_eq!(types(&analysis), [expected], "input: {text}");
        assert_eq!(analysis.constructs[0].platform, source_platform(expected));
    }

    #[test]
    fn test_utilities() {
        assert!(has_semantic_constructs("USE WHEN reviewing code"));
        assert!(!has_semantic_constructs("Nothing to see"));
        assert_eq!(construct_types().len(), 18);

        let analysis = parse_content("Run pytest, then cargo test.");
        assert_eq!(constructs_by_type(&analysis, ConstructType::TestCommand).len(), 2);
        assert!(constructs_by_type(&analysis, ConstructType::ToolCall).is_empty());
    }

    proptest! {
        #[test]
        fn prop_never_panics_and_is_deterministic(text in "\\PC{0,200}") {
            let first = parse_content(&text);
            let second = parse_content(&text);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.raw_content, text);
        }

        #[test]
        fn prop_constructs_are_sorted_and_disjoint(
            parts in proptest::collection::vec(
                prop_oneof![
                    Just("spawn a subagent "),
                    Just("USE WHEN asked "),
                    Just("Part 1 of 2 "),
                    Just("<!-- Part 1 of 2 --> "),
                    Just("`npm test` "),
                    Just("\n```\n@workspace\n```\n"),
                    Just("- [x] done\n"),
                    Just("plain words "),
                ],
                0..12,
            )
        ) {
            let text = parts.concat();
            let analysis = parse_content(&text);
            for pair in analysis.constructs.windows(2) {
                prop_assert!(pair[0].location.start <= pair[1].location.start);
                prop_assert!(!pair[0].location.overlaps(&pair[1].location));
            }
            for construct in &analysis.constructs {
                prop_assert_eq!(
                    &text[construct.location.start..construct.location.end],
                    construct.raw_text.as_str()
                );
            }
        }
    }
}
