//! shfmt wrapper: `shfmt -d` diff output parsed into per-file hunk records.

use super::{first_line, invoke, tool_version, Tool, WrapperReport};
use crate::config::Effective;
use crate::diff::parse_diff;
use crate::discover::{display_path, find_files};
use crate::error::QawrapError;
use crate::models::{Envelope, Results, Summary};
use crate::process::{ProcessOutcome, ProcessSpec};
use std::path::Path;

pub fn run(targets: &[String], eff: &Effective, cwd: &Path) -> Result<WrapperReport, QawrapError> {
    let files = find_files(targets, &eff.shell_extensions);
    if files.is_empty() {
        return Err(QawrapError::NoFilesFound {
            kind: "shell".into(),
        });
    }
    let spec = ProcessSpec::new("shfmt", eff.timeouts.shfmt)
        .arg("-d")
        .args(files.iter().cloned());
    let outcome = invoke(&spec, Tool::Shfmt.id(), &[0, 1])?;
    let version = tool_version("shfmt", &["--version"], eff.timeouts.version, first_line);
    let command = format!("shfmt -d {}", targets.join(" "));
    build(&outcome, &files, version, command, cwd)
}

/// Normalize a finished `shfmt -d` run over `files`.
pub fn build(
    outcome: &ProcessOutcome,
    files: &[String],
    version: String,
    command: String,
    cwd: &Path,
) -> Result<WrapperReport, QawrapError> {
    let results = parse_diff(&outcome.stdout, files);
    let unformatted: Vec<_> = results.iter().filter(|r| !r.formatted).collect();

    // Exit 1 with nothing recognized is a tool error (e.g. a syntax error),
    // not a clean run.
    if outcome.exit_code() == Some(1) && unformatted.is_empty() {
        return Err(if outcome.stderr.trim().is_empty() {
            QawrapError::MalformedOutput {
                what: "shfmt diff output".into(),
            }
        } else {
            QawrapError::tool_failed(&outcome.stderr, &outcome.stdout)
        });
    }

    let count = unformatted.len();
    let examples = unformatted
        .iter()
        .map(|r| display_path(&r.file_path, cwd))
        .collect();
    let summary = Summary::new()
        .count("total_files", files.len())
        .count("files_with_errors", count)
        .count("error_count", count)
        .count("warning_count", 0);
    let envelope = Envelope::new(
        Tool::Shfmt.id(),
        version,
        if count > 0 { 1 } else { 0 },
        command,
        summary,
        Results::Files { results },
    );
    Ok(WrapperReport {
        envelope,
        success: format!("All {} files formatted", files.len()),
        headline: format!("{} of {} files need formatting", count, files.len()),
        examples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Completion;
    use serde_json::Value as Json;

    fn outcome(code: i32, stdout: &str, stderr: &str) -> ProcessOutcome {
        ProcessOutcome {
            completion: Completion::Exited(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    fn files() -> Vec<String> {
        vec!["/w/src/bad.sh".into(), "/w/src/good.sh".into()]
    }

    #[test]
    fn test_diff_output_marks_unformatted_files() {
        let diff = "--- /w/src/bad.sh.orig\n+++ /w/src/bad.sh\n@@ -1,3 +1,3 @@\n-if [ 1 ];then\n+if [ 1 ]; then\n";
        let report = build(
            &outcome(1, diff, ""),
            &files(),
            "v3.8.0".into(),
            "shfmt -d src/".into(),
            Path::new("/w"),
        )
        .unwrap();
        assert!(report.has_findings());
        assert_eq!(report.headline, "1 of 2 files need formatting");
        assert_eq!(report.examples, vec!["src/bad.sh"]);
        let out = serde_json::to_value(&report.envelope).unwrap();
        assert_eq!(out["exit_code"], 1);
        assert_eq!(out["summary"]["files_with_errors"], 1);
        assert_eq!(out["results"].as_array().map(Vec::len), Some(2));
        assert_eq!(out["results"][1]["formatted"], Json::Bool(true));
    }

    #[test]
    fn test_clean_run() {
        let report = build(
            &outcome(0, "", ""),
            &files(),
            "unknown".into(),
            "shfmt -d src/".into(),
            Path::new("/w"),
        )
        .unwrap();
        assert!(!report.has_findings());
        assert_eq!(report.success, "All 2 files formatted");
    }

    #[test]
    fn test_exit_one_without_hunks_is_an_error() {
        let err = build(
            &outcome(1, "", "src/bad.sh:3:1: reached EOF without `fi`"),
            &files(),
            "unknown".into(),
            "shfmt -d src/".into(),
            Path::new("/w"),
        )
        .unwrap_err();
        assert!(matches!(err, QawrapError::ToolFailed(_)));
    }
}
