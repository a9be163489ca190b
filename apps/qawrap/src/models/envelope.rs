//! Canonical result envelope written by every wrapper.
//!
//! The envelope is the only artifact the acceptance verifier reads back, and
//! it does so through schema validation alone. Key order is stable because
//! `serde_json` is built with `preserve_order`.

use super::{FailureDetail, FileFormat, TestCase};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value as Json};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
/// Ordered mapping of named counters (plus the occasional text field).
pub struct Summary(Map<String, Json>);

impl Summary {
    pub fn new() -> Self {
        Summary(Map::new())
    }

    pub fn count(mut self, name: &str, value: usize) -> Self {
        self.0.insert(name.to_string(), Json::from(value));
        self
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name.to_string(), Json::String(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Json> {
        self.0.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
/// Results collection, flattened into the envelope.
pub enum Results {
    /// Tool-native records passed through untouched.
    Native { results: Vec<Json> },
    /// Normalized per-file formatting records.
    Files { results: Vec<FileFormat> },
    /// Normalized test-run records.
    Tests {
        tests: Vec<TestCase>,
        failures: Vec<FailureDetail>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub tool: String,
    pub version: String,
    pub timestamp: String,
    pub exit_code: i32,
    pub command: String,
    pub summary: Summary,
    #[serde(flatten)]
    pub results: Results,
}

impl Envelope {
    /// Build an envelope stamped with the current UTC time.
    pub fn new(
        tool: &str,
        version: String,
        exit_code: i32,
        command: String,
        summary: Summary,
        results: Results,
    ) -> Self {
        Self::at(Utc::now(), tool, version, exit_code, command, summary, results)
    }

    pub fn at(
        when: DateTime<Utc>,
        tool: &str,
        version: String,
        exit_code: i32,
        command: String,
        summary: Summary,
        results: Results,
    ) -> Self {
        Envelope {
            tool: tool.to_string(),
            version,
            timestamp: when.to_rfc3339_opts(SecondsFormat::Micros, false),
            exit_code,
            command,
            summary,
            results,
        }
    }
}
