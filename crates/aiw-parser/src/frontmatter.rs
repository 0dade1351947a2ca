//! Frontmatter extraction
//!
//! Splits a template file into its YAML frontmatter (parsed into the superset schema) and
//! its markdown body.

use aiw_protocol::{ParsedTemplate, TemplateMetadata};

use crate::error::{ParseError, Result};

const DELIMITER: &str = "---";

/// Parse a template file into metadata and body
///
/// Expected format:
/// ```yaml
/// ---
/// name: template-name
/// description: Description here
/// ---
///
/// # Markdown body
/// Content here...
/// ```
///
/// # Errors
///
/// Returns error if:
/// - The file does not open with a `---` line
/// - The frontmatter is never closed
/// - YAML is invalid or is not a mapping
///
/// # Notes
///
/// - Only whole lines equal to `---` delimit the frontmatter, so `---` inside YAML
///   strings is safe
/// - `---` lines in the body are preserved as content (Markdown horizontal rules)
/// - Leading blank lines of the body are dropped; an empty body is valid
/// - Required fields are not checked here; adapters report them
pub fn parse_template(source: &str) -> Result<ParsedTemplate> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Err(ParseError::MissingFrontmatter);
    };

    if first.trim_end() != DELIMITER {
        if source.lines().any(|line| line.trim_end() == DELIMITER) {
            return Err(ParseError::invalid_format(
                "template must start with --- delimiter",
            ));
        }
        return Err(ParseError::MissingFrontmatter);
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    let mut yaml_end = None;
    for line in lines {
        if line.trim_end() == DELIMITER {
            yaml_end = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let Some((yaml_end, body_start)) = yaml_end else {
        return Err(ParseError::invalid_format("frontmatter is never closed"));
    };

    let metadata = parse_metadata(&source[yaml_start..yaml_end])?;
    let body = source[body_start..].trim_start_matches(['\n', '\r']);

    Ok(ParsedTemplate::new(metadata, body))
}

/// Parse a frontmatter block (without delimiters) into the superset schema
///
/// An empty block yields empty metadata.
///
/// # Errors
///
/// Returns error if the YAML is invalid or is not a mapping.
pub fn parse_metadata(yaml: &str) -> Result<TemplateMetadata> {
    if yaml.trim().is_empty() {
        return Ok(TemplateMetadata::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)
        .map_err(|e| ParseError::invalid_format(format!("Invalid YAML frontmatter: {e}")))?;

    match value {
        serde_yaml::Value::Null => Ok(TemplateMetadata::default()),
        serde_yaml::Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
        _ => Err(ParseError::invalid_format(
            "frontmatter must be a YAML mapping",
        )),
    }
}
