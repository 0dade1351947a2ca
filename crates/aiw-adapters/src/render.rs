//! Frontmatter rendering
//!
//! Output frontmatter is written line by line rather than serialized from a map so field
//! order stays fixed and optional fields are simply omitted.

use std::fmt::Write as _;

/// Builds a `---` delimited YAML block
#[derive(Debug, Default)]
pub(crate) struct Frontmatter {
    body: String,
}

impl Frontmatter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `key: value`, quoting only when YAML would misread the value
    pub(crate) fn field(mut self, key: &str, value: &str) -> Self {
        let _ = writeln!(self.body, "{key}: {}", scalar(value));
        self
    }

    /// `key: "value"`
    pub(crate) fn quoted(mut self, key: &str, value: &str) -> Self {
        let _ = writeln!(self.body, "{key}: {}", quote(value));
        self
    }

    /// `key: true|false`
    pub(crate) fn flag(mut self, key: &str, value: bool) -> Self {
        let _ = writeln!(self.body, "{key}: {value}");
        self
    }

    /// Block sequence, or `key: []` when empty
    pub(crate) fn list(mut self, key: &str, items: &[String]) -> Self {
        if items.is_empty() {
            let _ = writeln!(self.body, "{key}: []");
            return self;
        }
        let _ = writeln!(self.body, "{key}:");
        for item in items {
            let _ = writeln!(self.body, "  - {}", scalar(item));
        }
        self
    }

    pub(crate) fn optional_field(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    pub(crate) fn optional_quoted(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.quoted(key, v),
            None => self,
        }
    }

    pub(crate) fn optional_list(self, key: &str, items: Option<&[String]>) -> Self {
        match items {
            Some(items) => self.list(key, items),
            None => self,
        }
    }

    pub(crate) fn optional_flag(self, key: &str, value: Option<bool>) -> Self {
        match value {
            Some(v) => self.flag(key, v),
            None => self,
        }
    }

    /// Frontmatter block followed by a blank line and `body`
    pub(crate) fn finish(self, body: &str) -> String {
        let mut out = String::with_capacity(self.body.len() + body.len() + 16);
        out.push_str("---\n");
        out.push_str(&self.body);
        out.push_str("---\n\n");
        out.push_str(body);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// Double-quoted YAML scalar
///
/// JSON string syntax is a subset of YAML's double-quoted style.
pub(crate) fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Plain scalar when safe, double-quoted otherwise
pub(crate) fn scalar(value: &str) -> String {
    if needs_quotes(value) {
        quote(value)
    } else {
        value.to_string()
    }
}

fn needs_quotes(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const RESERVED: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

    let Some(first) = value.chars().next() else {
        return true;
    };
    value.trim() != value
        || INDICATORS.contains(&first)
        || value.contains(": ")
        || value.ends_with(':')
        || value.contains(" #")
        || value.contains(['\n', '\r', '\t'])
        || RESERVED.iter().any(|r| r.eq_ignore_ascii_case(value))
        || value.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_and_quoted_scalars() {
        assert_eq!(scalar("code-review"), "code-review");
        assert_eq!(scalar("Review code: fast"), "\"Review code: fast\"");
        assert_eq!(scalar("1.0"), "\"1.0\"");
        assert_eq!(scalar("true"), "\"true\"");
        assert_eq!(scalar("- item"), "\"- item\"");
        assert_eq!(scalar(""), "\"\"");
        assert_eq!(quote("say \"hi\""), r#""say \"hi\"""#);
    }

    #[test]
    fn test_frontmatter_layout() {
        let out = Frontmatter::new()
            .field("name", "demo")
            .quoted("version", "2")
            .list("allowed-tools", &["Read".to_string(), "Bash(git:*)".to_string()])
            .optional_field("model", None)
            .flag("disable-model-invocation", true)
            .finish("# Body");

        assert_eq!(
            out,
            "---\nname: demo\nversion: \"2\"\nallowed-tools:\n  - Read\n  - Bash(git:*)\ndisable-model-invocation: true\n---\n\n# Body\n"
        );
    }

    #[test]
    fn test_rendered_yaml_parses_back() {
        let out = Frontmatter::new()
            .field("description", "Use when: reviewing #123")
            .list("globs", &["**/*.ts".to_string(), "*.md".to_string()])
            .finish("");
        let yaml = out.trim_start_matches("---\n").split("---\n").next().unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(value["description"], "Use when: reviewing #123");
        assert_eq!(value["globs"][0], "**/*.ts");
        assert_eq!(value["globs"][1], "*.md");
    }
}
