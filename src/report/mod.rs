//! Test lifecycle reporting
//!
//! Observes test start/pass/fail/skip events across concurrently running
//! suites and flushes the accumulated run report to a JSON artifact exactly
//! once, at run end. Event methods take an explicit [`TestId`] token rather
//! than relying on ambient thread state, so one task can never touch
//! another task's entry.
//!
//! [`TestId`]: model::TestId

pub mod model;
pub mod reporter;


pub use model::{Report, RunMetadata, TestEntry, TestId, TestOutcome};
pub use reporter::RunReporter;
