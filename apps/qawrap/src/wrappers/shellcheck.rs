//! ShellCheck wrapper: native `-f json` records passed through.

use super::{field, invoke, parse_json_array, tool_version, Tool, WrapperReport};
use crate::config::Effective;
use crate::discover::{display_path, find_files};
use crate::error::QawrapError;
use crate::models::{Envelope, Results, Summary};
use crate::process::{ProcessOutcome, ProcessSpec};
use serde_json::Value as Json;
use std::path::Path;

pub fn run(targets: &[String], eff: &Effective, cwd: &Path) -> Result<WrapperReport, QawrapError> {
    let files = find_files(targets, &eff.shell_extensions);
    if files.is_empty() {
        return Err(QawrapError::NoFilesFound {
            kind: "shell".into(),
        });
    }
    let spec = ProcessSpec::new("shellcheck", eff.timeouts.shellcheck)
        .args(["-f", "json"])
        .args(files.iter().cloned());
    // 0 clean, 1 issues; higher codes still emit JSON for the files it read
    let outcome = invoke(&spec, Tool::Shellcheck.id(), &[0, 1, 2, 3])?;
    let version = tool_version(
        "shellcheck",
        &["--version"],
        eff.timeouts.version,
        version_line,
    );
    let command = format!("shellcheck -f json {}", targets.join(" "));
    build(&outcome, files.len(), version, command, cwd)
}

/// Pick the `version: x.y.z` line of `shellcheck --version`.
pub fn version_line(text: &str) -> Option<String> {
    text.lines()
        .find_map(|l| l.strip_prefix("version:"))
        .map(|v| v.trim().to_string())
}

fn level_count(issues: &[Json], level: &str) -> usize {
    issues
        .iter()
        .filter(|i| i.get("level").and_then(Json::as_str) == Some(level))
        .count()
}

pub fn build(
    outcome: &ProcessOutcome,
    file_count: usize,
    version: String,
    command: String,
    cwd: &Path,
) -> Result<WrapperReport, QawrapError> {
    let issues = parse_json_array(&outcome.stdout, "ShellCheck JSON output")?;
    if issues.is_empty() && outcome.exit_code().is_some_and(|c| c > 1) {
        return Err(QawrapError::tool_failed(&outcome.stderr, &outcome.stdout));
    }
    let errors = level_count(&issues, "error");
    let warnings = level_count(&issues, "warning");
    let infos = level_count(&issues, "info");
    let styles = level_count(&issues, "style");

    let examples = issues
        .iter()
        .map(|i| {
            format!(
                "{}:{} SC{}: {}",
                display_path(&field(i, "file"), cwd),
                field(i, "line"),
                field(i, "code"),
                field(i, "message")
            )
        })
        .collect();
    let summary = Summary::new()
        .count("total_files", file_count)
        .count("total_issues", issues.len())
        .count("error_count", errors)
        .count("warning_count", warnings)
        .count("info_count", infos)
        .count("style_count", styles);
    let total = issues.len();
    let envelope = Envelope::new(
        Tool::Shellcheck.id(),
        version,
        if total > 0 { 1 } else { 0 },
        command,
        summary,
        Results::Native { results: issues },
    );
    Ok(WrapperReport {
        envelope,
        success: format!("0 issues in {} files", file_count),
        headline: format!(
            "{} issues ({} errors, {} warnings, {} info)",
            total, errors, warnings, infos
        ),
        examples,
    })
}
