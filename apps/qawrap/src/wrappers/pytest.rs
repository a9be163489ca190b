//! pytest wrapper: verbose transcript parsed into test and failure records.

use super::{first_line, invoke, tool_version, Tool, WrapperReport};
use crate::config::Effective;
use crate::error::QawrapError;
use crate::models::{Envelope, Results, Summary, TestStatus};
use crate::process::{ProcessOutcome, ProcessSpec};
use crate::transcript::parse_transcript;

const PYTEST_FLAGS: &[&str] = &["-m", "pytest", "-v", "--tb=short", "--no-header", "--color=no"];

pub fn run(targets: &[String], eff: &Effective) -> Result<WrapperReport, QawrapError> {
    let spec = ProcessSpec::new(eff.python.clone(), eff.timeouts.pytest)
        .args(PYTEST_FLAGS.iter().copied())
        .args(targets.iter().cloned());
    let outcome = invoke(&spec, Tool::Pytest.id(), &[0, 1])?;
    let version = tool_version(
        &eff.python,
        &["-m", "pytest", "--version"],
        eff.timeouts.version,
        first_line,
    );
    build(&outcome, version, spec.display())
}

/// Normalize a finished verbose pytest run.
pub fn build(
    outcome: &ProcessOutcome,
    version: String,
    command: String,
) -> Result<WrapperReport, QawrapError> {
    let report = parse_transcript(&outcome.stdout);
    let counts = report.counts;

    // A failing run in which no test line was recognized did not run tests
    // (e.g. pytest is not installed for this interpreter).
    if outcome.exit_code() == Some(1) && report.tests.is_empty() && report.failures.is_empty() {
        return Err(QawrapError::tool_failed(&outcome.stderr, &outcome.stdout));
    }

    let mut examples: Vec<String> = report.failures.iter().map(|f| f.test_name.clone()).collect();
    if examples.is_empty() {
        examples = report
            .tests
            .iter()
            .filter(|t| matches!(t.status, TestStatus::Failed | TestStatus::Error))
            .map(|t| format!("{}::{}", t.file_path, t.test_name))
            .collect();
    }
    // Collection errors produce failure blocks without status lines.
    let collection_failed = outcome.exit_code() == Some(1) && !report.failures.is_empty();
    let findings = counts.has_findings() || collection_failed;
    let mut headline = format!("{} failed, {} passed", counts.failed, counts.passed);
    if counts.errors > 0 {
        headline.push_str(&format!(", {} errors", counts.errors));
    } else if !counts.has_findings() && collection_failed {
        headline.push_str(&format!(", {} errors", report.failures.len()));
    }

    let summary = Summary::new()
        .count("total", counts.total())
        .count("passed", counts.passed)
        .count("failed", counts.failed)
        .count("errors", counts.errors)
        .count("skipped", counts.skipped)
        .text("summary_line", report.summary_line.clone().unwrap_or_default());
    let envelope = Envelope::new(
        Tool::Pytest.id(),
        version,
        if findings { 1 } else { 0 },
        command,
        summary,
        Results::Tests {
            tests: report.tests,
            failures: report.failures,
        },
    );
    Ok(WrapperReport {
        envelope,
        success: format!("{} passed", counts.passed),
        headline,
        examples,
    })
}
