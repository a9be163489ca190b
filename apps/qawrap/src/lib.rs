//! qawrap core library.
//!
//! This crate normalizes the output of QA tools into one JSON result
//! envelope, and verifies that tool wrappers obey a fixed black-box contract.
//!
//! High-level modules:
//! - `diff`: Unified-diff hunk parser for formatter output.
//! - `transcript`: Verbose test-runner transcript parser.
//! - `wrappers`: Per-tool runners producing envelopes and terse verdicts.
//! - `accept`: Conformance verifier driving a wrapper through fixed scenarios.
//! - `models`: Envelope, hunk, test-run and acceptance data models.
//! - `process`: Bounded subprocess execution.
//! - `discover`: File discovery by extension.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Terse wrapper lines and acceptance report printers.
//! - `error`: Invocation error taxonomy.
//! - `logging`: `tracing` subscriber setup.
//! - `cli`: CLI argument parsing (binary uses this).
pub mod accept;
pub mod cli;
pub mod config;
pub mod diff;
pub mod discover;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod process;
pub mod transcript;
pub mod wrappers;
