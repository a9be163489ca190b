//! MyPy wrapper: `-O json` JSON-lines output collected into one array.

use super::{field, first_line, invoke, tool_version, Tool, WrapperReport};
use crate::config::Effective;
use crate::error::QawrapError;
use crate::models::{Envelope, Results, Summary};
use crate::process::{ProcessOutcome, ProcessSpec};
use serde_json::Value as Json;
use std::collections::BTreeSet;

pub fn run(targets: &[String], eff: &Effective) -> Result<WrapperReport, QawrapError> {
    let spec = ProcessSpec::new("mypy", eff.timeouts.mypy)
        .args(["-O", "json", "--no-error-summary"])
        .args(targets.iter().cloned());
    let outcome = invoke(&spec, Tool::Mypy.id(), &[0, 1])?;
    let version = tool_version("mypy", &["--version"], eff.timeouts.version, first_line);
    build(&outcome, version, spec.display())
}

/// Parse one JSON object per non-blank line.
pub fn parse_json_lines(stdout: &str) -> Result<Vec<Json>, QawrapError> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            serde_json::from_str(l).map_err(|_| QawrapError::MalformedOutput {
                what: "MyPy JSON output".into(),
            })
        })
        .collect()
}

fn is_severity(r: &Json, severity: &str) -> bool {
    r.get("severity").and_then(Json::as_str) == Some(severity)
}

pub fn build(
    outcome: &ProcessOutcome,
    version: String,
    command: String,
) -> Result<WrapperReport, QawrapError> {
    let results = parse_json_lines(&outcome.stdout)?;
    let errors: Vec<&Json> = results.iter().filter(|r| is_severity(r, "error")).collect();
    let notes = results.iter().filter(|r| is_severity(r, "note")).count();
    let files: BTreeSet<String> = errors.iter().map(|r| field(r, "file")).collect();
    let examples = errors
        .iter()
        .map(|e| {
            format!(
                "{}:{}:{} [{}] {}",
                field(e, "file"),
                field(e, "line"),
                field(e, "column"),
                field(e, "code"),
                field(e, "message")
            )
        })
        .collect();
    let count = errors.len();
    let summary = Summary::new()
        .count("error_count", count)
        .count("note_count", notes)
        .count("files_with_errors", files.len());
    let envelope = Envelope::new(
        Tool::Mypy.id(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Completion;

    fn outcome(code: i32, stdout: &str) -> ProcessOutcome {
        ProcessOutcome {
            completion: Completion::Exited(code),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_errors_and_notes_are_counted_separately() {
        let stdout = concat!(
            r#"{"file":"src/broken.py","line":8,"column":9,"message":"Incompatible types in assignment","hint":null,"code":"assignment","severity":"error"}"#,
            "\n",
            r#"{"file":"src/broken.py","line":8,"column":9,"message":"See docs","hint":null,"code":null,"severity":"note"}"#,
            "\n\n"
        );
        let report = build(&outcome(1, stdout), "mypy 1.10.0".into(), "mypy -O json".into()).unwrap();
        assert_eq!(report.headline, "1 errors in 1 files");
        assert_eq!(report.envelope.summary.get("note_count").unwrap(), 1);
        assert_eq!(
            report.examples,
            vec!["src/broken.py:8:9 [assignment] Incompatible types in assignment"]
        );
    }

    #[test]
    fn test_notes_alone_are_clean() {
        let stdout = r#"{"file":"a.py","line":1,"column":1,"message":"n","code":null,"severity":"note"}"#;
        let report = build(&outcome(0, stdout), "unknown".into(), "mypy".into()).unwrap();
        assert!(!report.has_findings());
    }

    #[test]
    fn test_bad_line_is_malformed() {
        assert!(parse_json_lines("{\"ok\":1}\nnot json\n").is_err());
        assert!(parse_json_lines("").unwrap().is_empty());
    }
}
