//! Error taxonomy for invocation failures.
//!
//! Findings are never errors. Every variant here maps to exit code 2 in the
//! binary, printed as a single failure-marker line.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum QawrapError {
    #[error("No targets specified")]
    NoTargets,

    #[error("No {kind} files found")]
    NoFilesFound { kind: String },

    #[error("{tool} not found in PATH")]
    ToolNotFound { tool: String },

    #[error("Execution timed out")]
    Timeout,

    #[error("Execution error - {0}")]
    ToolFailed(String),

    #[error("Failed to parse {what}")]
    MalformedOutput { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No llm-*.{{js,php,py}} found in {}", .0.display())]
    WrapperNotFound(PathBuf),

    #[error("No schema.json found at {}", .0.display())]
    SchemaMissing(PathBuf),

    #[error("Invalid schema {}: {reason}", .path.display())]
    SchemaInvalid { path: PathBuf, reason: String },
}

impl QawrapError {
    /// Build a `ToolFailed` from captured streams, preferring stderr and
    /// keeping at most 200 characters.
    pub fn tool_failed(stderr: &str, stdout: &str) -> Self {
        let msg = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        QawrapError::ToolFailed(msg.chars().take(200).collect())
    }
}
