//! Tool wrappers.
//!
//! Each wrapper runs one external tool, normalizes its output into an
//! `Envelope`, writes the envelope to a kept temp file and returns a terse
//! `Verdict`:
//! - exit 0: one success line referencing the details file
//! - exit 1: failure headline, up to three examples, details reference
//!
//! Invocation problems (no targets, missing tool, timeout, malformed output)
//! are returned as `QawrapError` and become exit 2 in the binary.

pub mod mypy;
pub mod pytest;
pub mod ruff;
pub mod shellcheck;
pub mod shfmt;

use crate::config::Effective;
use crate::error::QawrapError;
use crate::models::Envelope;
use crate::output;
use crate::process::{self, Completion, ProcessOutcome, ProcessSpec};
use serde_json::Value as Json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Shfmt,
    Shellcheck,
    Pytest,
    Ruff,
    Mypy,
}

impl Tool {
    /// Identifier used in envelopes and temp file names.
    pub fn id(self) -> &'static str {
        match self {
            Tool::Shfmt => "shfmt",
            Tool::Shellcheck => "shellcheck",
            Tool::Pytest => "pytest",
            Tool::Ruff => "ruff",
            Tool::Mypy => "mypy",
        }
    }

    /// Name shown in terse output.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Shfmt => "shfmt",
            Tool::Shellcheck => "ShellCheck",
            Tool::Pytest => "pytest",
            Tool::Ruff => "Ruff",
            Tool::Mypy => "MyPy",
        }
    }
}

#[derive(Debug, Clone)]
/// Normalized result of one wrapped run, before it is written out.
pub struct WrapperReport {
    pub envelope: Envelope,
    /// Text of the success line.
    pub success: String,
    /// Text of the failure headline.
    pub headline: String,
    /// Candidate example lines; only the first three are printed.
    pub examples: Vec<String>,
}

impl WrapperReport {
    pub fn has_findings(&self) -> bool {
        self.envelope.exit_code != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the binary prints to stdout and exits with.
pub struct Verdict {
    pub exit_code: i32,
    pub lines: Vec<String>,
}

/// Run the wrapper for `tool` over `targets`.
pub fn run_tool(tool: Tool, targets: &[String], eff: &Effective) -> Result<Verdict, QawrapError> {
    if targets.is_empty() {
        return Err(QawrapError::NoTargets);
    }
    let cwd = std::env::current_dir()?;
    let report = match tool {
        Tool::Shfmt => shfmt::run(targets, eff, &cwd)?,
        Tool::Shellcheck => shellcheck::run(targets, eff, &cwd)?,
        Tool::Pytest => pytest::run(targets, eff)?,
        Tool::Ruff => ruff::run(targets, eff)?,
        Tool::Mypy => mypy::run(targets, eff)?,
    };
    let details = write_envelope(tool, &report.envelope)?;
    info!(tool = tool.id(), details = %details.display(), exit_code = report.envelope.exit_code, "wrote envelope");
    Ok(verdict(tool, &report, &details))
}

/// Turn a report plus its details path into printable lines.
pub fn verdict(tool: Tool, report: &WrapperReport, details: &Path) -> Verdict {
    let path = details.to_string_lossy().to_string();
    let lines = if report.has_findings() {
        output::failure_lines(tool.label(), &report.headline, &report.examples, &path)
    } else {
        vec![output::success_line(tool.label(), &report.success, &path)]
    };
    Verdict {
        exit_code: if report.has_findings() { 1 } else { 0 },
        lines,
    }
}

/// Write the envelope as pretty JSON into a temp file that outlives the
/// process.
pub fn write_envelope(tool: Tool, envelope: &Envelope) -> Result<PathBuf, QawrapError> {
    write_envelope_in(&std::env::temp_dir(), tool, envelope)
}

pub fn write_envelope_in(
    dir: &Path,
    tool: Tool,
    envelope: &Envelope,
) -> Result<PathBuf, QawrapError> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}-", tool.id()))
        .suffix(".json")
        .tempfile_in(dir)?;
    serde_json::to_writer_pretty(&mut file, envelope)?;
    file.write_all(b"\n")?;
    let (_, path) = file.keep().map_err(|e| QawrapError::Io(e.error))?;
    Ok(path)
}

/// Run a tool command, accepting only exit codes in `ok_codes`.
pub(crate) fn invoke(
    spec: &ProcessSpec,
    tool: &str,
    ok_codes: &[i32],
) -> Result<ProcessOutcome, QawrapError> {
    let outcome = process::run(spec);
    match &outcome.completion {
        Completion::Exited(code) if ok_codes.contains(code) => Ok(outcome),
        Completion::Exited(_) => Err(QawrapError::tool_failed(&outcome.stderr, &outcome.stdout)),
        Completion::TimedOut => Err(QawrapError::Timeout),
        Completion::NotFound => Err(QawrapError::ToolNotFound {
            tool: tool.to_string(),
        }),
        Completion::SpawnFailed(msg) => Err(QawrapError::ToolFailed(msg.clone())),
    }
}

/// Ask a tool for its version. Any failure yields `"unknown"`.
pub(crate) fn tool_version(
    program: &str,
    args: &[&str],
    timeout: Duration,
    pick: fn(&str) -> Option<String>,
) -> String {
    let outcome = process::run(&ProcessSpec::new(program, timeout).args(args.iter().copied()));
    let version = match outcome.completion {
        Completion::Exited(_) => pick(&outcome.combined()),
        _ => None,
    };
    debug!(program, ?version, "tool version");
    version.unwrap_or_else(|| "unknown".to_string())
}

/// First non-blank line, trimmed.
pub(crate) fn first_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Render a JSON scalar for example lines; strings are shown without quotes.
pub(crate) fn field(v: &Json, key: &str) -> String {
    match v.get(key) {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Null) | None => "?".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Parse a tool's JSON array output. Empty output means no records.
pub(crate) fn parse_json_array(stdout: &str, what: &str) -> Result<Vec<Json>, QawrapError> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Json>(stdout) {
        Ok(Json::Array(items)) => Ok(items),
        _ => Err(QawrapError::MalformedOutput {
            what: what.to_string(),
        }),
    }
}
