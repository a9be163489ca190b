//! Test-run records recovered from a verbose runner transcript.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Error,
    Skipped,
}

impl TestStatus {
    /// Map the runner's uppercase status token. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "PASSED" => Some(TestStatus::Passed),
            "FAILED" => Some(TestStatus::Failed),
            "ERROR" => Some(TestStatus::Error),
            "SKIPPED" => Some(TestStatus::Skipped),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub file_path: String,
    pub test_name: String,
    pub status: TestStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Verbatim failure body for one test, with surrounding blank lines trimmed.
pub struct FailureDetail {
    pub test_name: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Running counters over status lines. `total` is their plain sum and is
/// never reconciled with the runner's own summary banner.
pub struct TestCounts {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl TestCounts {
    pub fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Error => self.errors += 1,
            TestStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors + self.skipped
    }

    /// True when at least one test failed or errored.
    pub fn has_findings(&self) -> bool {
        self.failed + self.errors > 0
    }
}
