//! Basic example of parsing a template and listing its constructs
//!
//! Run with `cargo run -p aiw-parser --example basic [path/to/template.md]`.

use aiw_parser::{parse_content, parse_template};
use aiw_protocol::Platform;

const SAMPLE: &str = r"---
name: release-check
description: Verify a release branch before tagging
---

## Execution Flow

1. Spawn a subagent to collect the changelog.
2. USE WHEN preparing a release.
3. Run `cargo test`, then cargo test --release.
4. Ask @workspace /explain any failing module.

- [ ] changelog reviewed
";

fn main() -> anyhow::Result<()> {
    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };

    let template = parse_template(&source)?;
    println!(
        "Template: {}",
        template.metadata.name().unwrap_or("<unnamed>")
    );

    let analysis = parse_content(&template.content);
    for construct in &analysis.constructs {
        println!(
            "  line {:>3}  {:<28} {:<15} {:?}",
            construct.location.line,
            construct.construct_type,
            construct.platform.as_str(),
            construct.raw_text
        );
    }

    for platform in Platform::ALL {
        println!(
            "{}: {} construct(s)",
            platform.display_name(),
            analysis.by_platform(platform).count()
        );
    }

    Ok(())
}
