//! Full pipeline behavior: parse, detect, convert

use aiw_integration_tests::{SUPERSET_TEMPLATE, convert, frontmatter_of, template};
use aiw_parser::{constructs_by_platform, construct_types, parse_content};
use aiw_protocol::{
    ConstructType, ParsedFields, ParsedTemplate, Platform, TemplateMetadata, WarningCategory,
};
use aiw_adapters::{ClaudeCodeAdapter, PlatformAdapter};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_type_completeness() {
    let types = construct_types();
    assert_eq!(types.len(), 18);

    let mut tags: Vec<_> = types.iter().map(|t| t.as_str()).collect();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), 18);
}

#[test]
fn test_part_extraction() {
    let analysis = parse_content("Part 1 of 4: Core Authentication Module");

    assert_eq!(analysis.constructs.len(), 1);
    let construct = &analysis.constructs[0];
    assert_eq!(construct.construct_type, ConstructType::SkillChaining);
    assert!(matches!(
        construct.parsed,
        Some(ParsedFields::SkillChaining {
            current_part: Some(1),
            total_parts: Some(4),
            ..
        })
    ));
}

#[test]
fn test_platform_filter() {
    let analysis = parse_content("Use the Glob tool\nUSE WHEN creating commits\n");

    let claude: Vec<_> = constructs_by_platform(&analysis, Platform::ClaudeCode)
        .iter()
        .map(|c| c.construct_type)
        .collect();
    let windsurf: Vec<_> = constructs_by_platform(&analysis, Platform::Windsurf)
        .iter()
        .map(|c| c.construct_type)
        .collect();

    assert_eq!(claude, [ConstructType::ToolCall]);
    assert_eq!(windsurf, [ConstructType::ModelDecisionTrigger]);
}

#[test]
fn test_required_field_failure() {
    let result =
        ClaudeCodeAdapter::new().transform(&ParsedTemplate::new(TemplateMetadata::default(), "x"));

    assert!(!result.success);
    assert!(result.files.is_empty());
    assert!(
        result
            .error
            .as_ref()
            .is_some_and(|e| e.to_string().contains("missing required fields: name"))
    );
}

#[test]
fn test_dropped_fields_are_warned_and_absent() {
    let parsed = template(SUPERSET_TEMPLATE);
    let adapter = ClaudeCodeAdapter::new();

    let fields: Vec<_> = adapter
        .validate(&parsed)
        .into_iter()
        .map(|w| w.field)
        .collect();
    for field in ["trigger", "globs", "labels"] {
        assert!(fields.iter().any(|f| f == field), "no warning for {field}");
    }

    let result = adapter.transform(&parsed);
    let skill = &result.files[".claude/skills/commit-helper/SKILL.md"];
    let yaml = frontmatter_of(skill);
    for key in ["trigger:", "globs:", "labels:", "permissions:"] {
        assert!(!yaml.contains(key), "{key} leaked into SKILL.md");
    }
    assert!(yaml.contains("version: \"2\""));
    assert!(yaml.contains("model: haiku"));
}

#[test]
fn test_permissions_settings_file() {
    let parsed = template(SUPERSET_TEMPLATE);
    let result = convert(&parsed, Platform::ClaudeCode);

    let settings: serde_json::Value =
        serde_json::from_str(&result.files[".claude/settings.json"]).unwrap();
    assert_eq!(settings["permissions"]["allow"], serde_json::json!(["Read(**)"]));
    assert_eq!(settings["permissions"]["deny"], serde_json::json!(["Read(.env)"]));

    let without = template("---\nname: plain\ndescription: Plain\n---\nBody\n");
    assert!(
        !convert(&without, Platform::ClaudeCode)
            .files
            .contains_key(".claude/settings.json")
    );
}

#[test]
fn test_fenced_examples_do_not_raise_content_warnings() {
    let parsed = template(SUPERSET_TEMPLATE);

    let claude = convert(&parsed, Platform::ClaudeCode);
    let content: Vec<_> = claude.warnings.iter().filter(|w| w.field == "content").collect();
    assert_eq!(content.len(), 1);
    assert!(content[0].message.contains("model-decision-trigger"));

    let windsurf = convert(&parsed, Platform::Windsurf);
    let content: Vec<_> = windsurf.warnings.iter().filter(|w| w.field == "content").collect();
    assert_eq!(content.len(), 1);
    assert!(content[0].message.contains("tool-call"));
    assert!(!content[0].message.contains("agent-spawn"));
}

#[test]
fn test_windsurf_emulation_of_superset() {
    let parsed = template(SUPERSET_TEMPLATE);
    let result = convert(&parsed, Platform::Windsurf);

    assert!(result.success);
    assert!(result.has_warning_for("model"));
    assert_eq!(result.warnings_in(WarningCategory::Security).count(), 1);
    for warning in result.warnings_in(WarningCategory::Emulated) {
        assert!(warning.message.contains("not enforced"), "{warning}");
    }

    let workflow = &result.files[".windsurf/workflows/commit-helper.md"];
    assert_eq!(
        frontmatter_of(workflow),
        "description: Write conventional commit messages"
    );
    assert!(workflow.contains("## Tool Restrictions (Advisory)"));
    assert!(workflow.contains("## Context Isolation (Advisory)"));
}

#[rstest]
#[case(Platform::ClaudeCode, ".claude/skills/commit-helper/SKILL.md")]
#[case(Platform::Windsurf, ".windsurf/workflows/commit-helper.md")]
fn test_output_path_matches_files(#[case] platform: Platform, #[case] path: &str) {
    let parsed = template(SUPERSET_TEMPLATE);
    let adapter = aiw_adapters::adapter_for(platform).unwrap();

    assert_eq!(adapter.output_path(&parsed), path);
    assert!(adapter.transform(&parsed).files.contains_key(path));
}
