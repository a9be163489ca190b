//! Shared data models for wrapper envelopes, parser records and acceptance
//! bookkeeping.

pub mod acceptance;
pub mod envelope;
pub mod hunk;
pub mod test_run;

pub use acceptance::{AcceptanceReport, AcceptanceResult, Check};
pub use envelope::{Envelope, Results, Summary};
pub use hunk::{FileFormat, Hunk};
pub use test_run::{FailureDetail, TestCase, TestCounts, TestStatus};
