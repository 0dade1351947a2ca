//! `aiw analyze`

use std::io::Write;
use std::path::Path;

use aiw_parser::{ParseError, parse_content, parse_template};
use aiw_protocol::{ParsedContentAnalysis, Platform};
use anyhow::Context;

/// Analysis of a template body, with the body's first line in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    /// Constructs found in the body
    pub analysis: ParsedContentAnalysis,
    /// Lines before the body (frontmatter and blank lines)
    pub line_offset: usize,
}

/// Analyze template text
///
/// Files without frontmatter are analyzed whole.
///
/// # Errors
///
/// Returns the parse error for malformed frontmatter.
pub fn analyze_text(text: &str) -> Result<FileAnalysis, ParseError> {
    let body = match parse_template(text) {
        Ok(template) => template.content,
        Err(ParseError::MissingFrontmatter) => text.to_string(),
        Err(err) => return Err(err),
    };
    let prefix = text.len().saturating_sub(body.len());
    let line_offset = text[..prefix].matches('\n').count();

    Ok(FileAnalysis {
        analysis: parse_content(&body),
        line_offset,
    })
}

/// Run `aiw analyze`
///
/// # Errors
///
/// Fails if the file cannot be read or its frontmatter is malformed.
pub async fn run<W: Write>(file: &Path, json: bool, out: &mut W) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read template {}", file.display()))?;
    let FileAnalysis {
        analysis,
        line_offset,
    } = analyze_text(&text).with_context(|| format!("Failed to parse {}", file.display()))?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&analysis)?)?;
        return Ok(());
    }

    if !analysis.has_constructs() {
        writeln!(out, "No semantic constructs found in {}", file.display())?;
        return Ok(());
    }

    for construct in &analysis.constructs {
        writeln!(
            out,
            "{:>5}  {:<26} {:<15} {}",
            construct.location.line + line_offset,
            construct.construct_type.as_str(),
            construct.platform.as_str(),
            construct.raw_text.replace('\n', " "),
        )?;
    }

    let counts: Vec<String> = Platform::ALL
        .into_iter()
        .map(|platform| (platform, analysis.by_platform(platform).count()))
        .filter(|&(_, count)| count > 0)
        .map(|(platform, count)| format!("{platform}: {count}"))
        .collect();
    writeln!(
        out,
        "\n{} construct(s) ({})",
        analysis.constructs.len(),
        counts.join(", ")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiw_protocol::ConstructType;

    #[test]
    fn test_lines_are_file_relative() {
        let text = "---\nname: demo\n---\n\nIntro\nSpawn a subagent.\n";
        let result = analyze_text(text).unwrap();

        assert_eq!(result.line_offset, 4);
        let construct = &result.analysis.constructs[0];
        assert_eq!(construct.construct_type, ConstructType::AgentSpawn);
        assert_eq!(construct.location.line + result.line_offset, 6);
    }

    #[test]
    fn test_plain_markdown_is_analyzed_whole() {
        let result = analyze_text("Then /prompt next-step\n").unwrap();
        assert_eq!(result.line_offset, 0);
        assert_eq!(
            result.analysis.constructs[0].construct_type,
            ConstructType::SkillChaining
        );
    }

    #[test]
    fn test_unclosed_frontmatter_is_an_error() {
        assert!(analyze_text("---\nname: demo\n").is_err());
    }
}
