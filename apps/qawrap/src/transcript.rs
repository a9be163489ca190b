//! Verbose test-runner transcript parser.
//!
//! Two passes over the same lines:
//! 1. Status extraction: every `<file>::<name> <STATUS>` line becomes a
//!    `TestCase` and bumps a counter.
//! 2. Failure blocks: a small state machine (`FailureState`) that enters the
//!    `FAILURES` banner section, opens one block per underscore-wrapped test
//!    header, and leaves at the next bare `=` banner.
//!
//! The summary line is the text of the last `=== ... ===` banner. It is kept
//! as observational data; counters are never reconciled against it.

use crate::models::{FailureDetail, TestCase, TestCounts, TestStatus};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Per-test status line.
/// Groups: 1 file path, 2 test name, 3 uppercase status token.
pub static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)::(\S+)\s+(PASSED|FAILED|ERROR|SKIPPED)").expect("valid status regex")
});

/// Banner anchored to line end. Group 1: the free text between the rules.
pub static BANNER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^=+ (.+?) =+\s*$").expect("valid banner regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptReport {
    pub tests: Vec<TestCase>,
    pub failures: Vec<FailureDetail>,
    pub counts: TestCounts,
    pub summary_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Classification of a transcript line for the failure scan.
pub enum LineKind {
    /// Underscore-only separator, never content.
    Separator,
    /// Short-summary `FAILED ...` line, never content.
    ShortSummary,
    /// `=` banner containing `FAILURES`.
    FailuresBanner,
    /// Any other `=` banner.
    Banner,
    /// Underscore-wrapped block header carrying a test identifier.
    BlockHeader(String),
    Text,
}

pub fn classify(line: &str) -> LineKind {
    let is_rule = !line.trim().is_empty() && line.chars().all(|c| c == '_' || c == ' ');
    if is_rule {
        return LineKind::Separator;
    }
    if line.starts_with("FAILED") {
        return LineKind::ShortSummary;
    }
    if line.starts_with('=') {
        return if line.contains("FAILURES") {
            LineKind::FailuresBanner
        } else {
            LineKind::Banner
        };
    }
    if line.starts_with("___") {
        let name = line.trim_matches(|c| c == '_' || c == ' ');
        if !name.is_empty() {
            return LineKind::BlockHeader(name.to_string());
        }
    }
    LineKind::Text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    Outside,
    InFailures,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the scanner should do with the current line.
pub enum Action {
    Skip,
    /// Finish the open block, if any.
    Close,
    /// Finish the open block and start a new one.
    Open(String),
    /// Append the line to the open block.
    Append,
}

pub fn transition(state: FailureState, kind: &LineKind) -> (FailureState, Action) {
    match (state, kind) {
        (_, LineKind::Separator) | (_, LineKind::ShortSummary) => (state, Action::Skip),
        (_, LineKind::FailuresBanner) => (FailureState::InFailures, Action::Close),
        (FailureState::InFailures, LineKind::Banner) => (FailureState::Outside, Action::Close),
        (FailureState::InFailures, LineKind::BlockHeader(name)) => {
            (FailureState::InFailures, Action::Open(name.clone()))
        }
        (FailureState::InFailures, LineKind::Text) => (FailureState::InFailures, Action::Append),
        (FailureState::Outside, _) => (FailureState::Outside, Action::Skip),
    }
}

/// Join accumulated lines, dropping leading and trailing blank lines.
fn finish_block(test_name: String, lines: Vec<&str>) -> FailureDetail {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    let details = match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    };
    FailureDetail { test_name, details }
}

/// Extract every status line as a test case.
pub fn parse_statuses(stdout: &str) -> (Vec<TestCase>, TestCounts) {
    let mut tests = Vec::new();
    let mut counts = TestCounts::default();
    for line in stdout.lines() {
        let Some(caps) = STATUS_LINE.captures(line) else {
            continue;
        };
        let Some(status) = TestStatus::from_token(&caps[3]) else {
            continue;
        };
        counts.record(status);
        tests.push(TestCase {
            file_path: caps[1].to_string(),
            test_name: caps[2].to_string(),
            status,
        });
    }
    (tests, counts)
}

/// Extract the failure blocks of the `FAILURES` section.
pub fn parse_failures(stdout: &str) -> Vec<FailureDetail> {
    let mut failures = Vec::new();
    let mut state = FailureState::Outside;
    let mut open: Option<(String, Vec<&str>)> = None;
    for line in stdout.lines() {
        let (next, action) = transition(state, &classify(line));
        state = next;
        match action {
            Action::Skip => {}
            Action::Close => {
                if let Some((name, lines)) = open.take() {
                    failures.push(finish_block(name, lines));
                }
            }
            Action::Open(name) => {
                if let Some((prev, lines)) = open.take() {
                    failures.push(finish_block(prev, lines));
                }
                open = Some((name, Vec::new()));
            }
            Action::Append => {
                if let Some((_, lines)) = open.as_mut() {
                    lines.push(line);
                }
            }
        }
    }
    if let Some((name, lines)) = open.take() {
        failures.push(finish_block(name, lines));
    }
    failures
}

/// Text of the last `=== ... ===` banner, if any.
pub fn parse_summary_line(stdout: &str) -> Option<String> {
    BANNER_LINE
        .captures_iter(stdout)
        .last()
        .map(|caps| caps[1].to_string())
}

/// Parse a full verbose transcript.
pub fn parse_transcript(stdout: &str) -> TranscriptReport {
    let (tests, counts) = parse_statuses(stdout);
    let failures = parse_failures(stdout);
    let summary_line = parse_summary_line(stdout);
    debug!(
        total = counts.total(),
        failures = failures.len(),
        "parsed transcript"
    );
    TranscriptReport {
        tests,
        failures,
        counts,
        summary_line,
    }
}
