//! Ruff wrapper: native `--output-format json` records passed through.

use super::{field, first_line, invoke, parse_json_array, tool_version, Tool, WrapperReport};
use crate::config::Effective;
use crate::error::QawrapError;
use crate::models::{Envelope, Results, Summary};
use crate::process::{ProcessOutcome, ProcessSpec};
use serde_json::Value as Json;
use std::collections::BTreeSet;

pub fn run(targets: &[String], eff: &Effective) -> Result<WrapperReport, QawrapError> {
    let spec = ProcessSpec::new("ruff", eff.timeouts.ruff)
        .args(["check", "--output-format", "json"])
        .args(targets.iter().cloned());
    let outcome = invoke(&spec, Tool::Ruff.id(), &[0, 1])?;
    let version = tool_version("ruff", &["--version"], eff.timeouts.version, first_line);
    build(&outcome, version, spec.display())
}

pub fn build(
    outcome: &ProcessOutcome,
    version: String,
    command: String,
) -> Result<WrapperReport, QawrapError> {
    let results = parse_json_array(&outcome.stdout, "Ruff JSON output")?;
    let files: BTreeSet<String> = results.iter().map(|r| field(r, "filename")).collect();
    let examples = results
        .iter()
        .map(|r| {
            let loc = r.get("location").cloned().unwrap_or(Json::Null);
            format!(
                "{}:{}:{} {}: {}",
                field(r, "filename"),
                field(&loc, "row"),
                field(&loc, "column"),
                field(r, "code"),
                field(r, "message")
            )
        })
        .collect();
    let count = results.len();
    let summary = Summary::new()
        .count("error_count", count)
        .count("files_with_errors", files.len());
    let envelope = Envelope::new(
        Tool::Ruff.id(),
        version,
        if count > 0 { 1 } else { 0 },
        command,
        summary,
        Results::Native { results },
    );
    Ok(WrapperReport {
        envelope,
        success: "0 errors".to_string(),
        headline: format!("{} errors in {} files", count, files.len()),
        examples,
    })
}
