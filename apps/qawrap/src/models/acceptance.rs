//! Acceptance bookkeeping for the conformance verifier.
//!
//! `AcceptanceResult` is an accumulator: recording a failing check never stops
//! later checks from being recorded, so one run yields a complete report.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One atomic assertion.
pub struct Check {
    pub label: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// All checks recorded for one scenario.
pub struct AcceptanceResult {
    pub name: String,
    pub checks: Vec<Check>,
}

impl AcceptanceResult {
    pub fn new(name: &str) -> Self {
        AcceptanceResult {
            name: name.to_string(),
            checks: Vec::new(),
        }
    }

    pub fn check(&mut self, label: &str, passed: bool, detail: impl Into<String>) -> &mut Self {
        self.checks.push(Check {
            label: label.to_string(),
            passed,
            detail: detail.into(),
        });
        self
    }

    /// Logical AND over every recorded check.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn find(&self, label: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Scenario results of one verifier run.
pub struct AcceptanceReport {
    pub wrapper: String,
    pub fixtures: String,
    pub schema: String,
    pub results: Vec<AcceptanceResult>,
}

impl AcceptanceReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(AcceptanceResult::passed)
    }
}
