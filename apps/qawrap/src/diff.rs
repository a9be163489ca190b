//! Unified-diff hunk parser.
//!
//! Recovers per-file change records from the output of a formatter's
//! "show diff, don't rewrite" mode. The scan is a two-state machine over
//! lines:
//! - `DiffState::AwaitingFile` until an original-file header (`--- <path>.orig`)
//!   names the file being diffed.
//! - `DiffState::InFile(path)` where every hunk header appends a `Hunk` to
//!   that file. A new file header switches files.
//!
//! Any other line carries no structural information and is dropped. Hunk
//! headers seen before any file header are discarded. Parsing never fails;
//! unexpected input yields an empty or partial result.

use crate::models::{FileFormat, Hunk};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// ANSI SGR escape sequences (`ESC [ <params> m`).
pub static ANSI_SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI regex"));

/// Original-file header. Group 1: the real path with `.orig` removed.
pub static ORIG_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--- (.+)\.orig$").expect("valid header regex"));

/// Hunk header `@@ -a[,b] +c[,d] @@`.
/// Groups: 1 original start, 2 original count, 3 formatted start,
/// 4 formatted count. Counts are optional and default to 1.
pub static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("valid hunk regex")
});

/// Remove color codes. Diff parsing must never see them.
pub fn strip_ansi(text: &str) -> String {
    ANSI_SGR.replace_all(text, "").into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffState {
    AwaitingFile,
    InFile(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Structural event produced by one transition.
pub enum DiffEvent {
    FileHeader(String),
    Hunk(String, Hunk),
}

/// Parse a hunk header line, if it is one.
pub fn parse_hunk_header(line: &str) -> Option<Hunk> {
    let caps = HUNK_HEADER.captures(line)?;
    let num = |i: usize, default: Option<u64>| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => default,
        }
    };
    Some(Hunk {
        original_start: num(1, None)?,
        original_count: num(2, Some(1))?,
        formatted_start: num(3, None)?,
        formatted_count: num(4, Some(1))?,
    })
}

/// Advance the scan by one line.
pub fn step(state: DiffState, line: &str) -> (DiffState, Option<DiffEvent>) {
    if let Some(caps) = ORIG_HEADER.captures(line) {
        let path = caps[1].to_string();
        return (DiffState::InFile(path.clone()), Some(DiffEvent::FileHeader(path)));
    }
    match parse_hunk_header(line) {
        Some(hunk) => match state {
            DiffState::InFile(path) => {
                let event = DiffEvent::Hunk(path.clone(), hunk);
                (DiffState::InFile(path), Some(event))
            }
            DiffState::AwaitingFile => {
                debug!(line, "hunk header before any file header; dropped");
                (DiffState::AwaitingFile, None)
            }
        },
        None => (state, None),
    }
}

/// Scan diff text and return every file named in it with its hunks, in the
/// order the files were first encountered.
pub fn scan_diff(diff_text: &str) -> Vec<(String, Vec<Hunk>)> {
    let clean = strip_ansi(diff_text);
    let mut files: Vec<(String, Vec<Hunk>)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    let mut state = DiffState::AwaitingFile;
    for line in clean.lines() {
        let (next, event) = step(state, line);
        state = next;
        match event {
            Some(DiffEvent::FileHeader(path)) => {
                if !slot.contains_key(&path) {
                    slot.insert(path.clone(), files.len());
                    files.push((path, Vec::new()));
                }
            }
            Some(DiffEvent::Hunk(path, hunk)) => {
                if let Some(&i) = slot.get(&path) {
                    files[i].1.push(hunk);
                }
            }
            None => {}
        }
    }
    files
}

/// Parse diff text against the requested targets.
///
/// Returns exactly one record per target, in target order. Targets never
/// mentioned in the diff (or mentioned without hunks) are `formatted`;
/// files in the diff that were not requested are left out.
pub fn parse_diff(diff_text: &str, targets: &[String]) -> Vec<FileFormat> {
    let mut found: HashMap<String, Vec<Hunk>> = scan_diff(diff_text).into_iter().collect();
    let mut out = Vec::with_capacity(targets.len());
    for target in targets {
        if out.iter().any(|r: &FileFormat| &r.file_path == target) {
            continue;
        }
        let hunks = found.remove(target).unwrap_or_default();
        out.push(FileFormat::from_hunks(target.clone(), hunks));
    }
    debug!(
        files = out.len(),
        unformatted = out.iter().filter(|r| !r.formatted).count(),
        "parsed diff"
    );
    out
}
