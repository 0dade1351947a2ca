//! `aiw lint`

use std::io::Write;
use std::path::Path;

use aiw_parser::{LintFinding, Method, lint_template};
use anyhow::Context;

use crate::exit::Status;

/// Run `aiw lint`
///
/// Returns [`Status::Failure`] when the template references the other method.
///
/// # Errors
///
/// Fails if the file cannot be read.
pub async fn run<W: Write>(
    file: &Path,
    method: Method,
    quiet: bool,
    out: &mut W,
) -> anyhow::Result<Status> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read template {}", file.display()))?;
    let findings = lint_template(&text, method);
    report(file, method, &findings, quiet, out)?;

    Ok(if findings.is_empty() {
        Status::Success
    } else {
        Status::Failure
    })
}

fn report<W: Write>(
    file: &Path,
    method: Method,
    findings: &[LintFinding],
    quiet: bool,
    out: &mut W,
) -> std::io::Result<()> {
    for finding in findings {
        writeln!(out, "{}: {finding}", file.display())?;
    }
    if findings.is_empty() && !quiet {
        writeln!(
            out,
            "{}: no {} references",
            file.display(),
            method.other()
        )?;
    }
    Ok(())
}
