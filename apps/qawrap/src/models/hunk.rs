//! Per-file formatting records produced from unified-diff output.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// One changed range. All line numbers are 1-based.
pub struct Hunk {
    pub original_start: u64,
    pub original_count: u64,
    pub formatted_start: u64,
    pub formatted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Formatting status of a single scanned file.
pub struct FileFormat {
    pub file_path: String,
    pub formatted: bool,
    pub diff_count: usize,
    pub hunks: Vec<Hunk>,
}

impl FileFormat {
    /// Build a record from the hunks found for `file_path`.
    ///
    /// A file is `formatted` iff it produced no hunks.
    pub fn from_hunks(file_path: impl Into<String>, hunks: Vec<Hunk>) -> Self {
        FileFormat {
            file_path: file_path.into(),
            formatted: hunks.is_empty(),
            diff_count: hunks.len(),
            hunks,
        }
    }
}
