//! Report data model

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Opaque token identifying one test's report entry
///
/// Returned by `test_started` and required by every terminal event; holding
/// the token is what scopes an entry to the task that started it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TestId(Uuid);

impl TestId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Outcome of one test method invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason")]
pub enum TestOutcome {
    Started,
    Passed,
    Failed(String),
    Skipped,
}

impl TestOutcome {
    /// Whether this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TestOutcome::Started)
    }
}

/// One test's entry in the run report
#[derive(Debug, Clone, Serialize)]
pub struct TestEntry {
    pub id: TestId,
    pub name: String,
    pub description: String,
    pub outcome: TestOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Run-level metadata recorded alongside the entries
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub app: String,
    pub platform: String,
    pub framework: String,
}

impl Default for RunMetadata {
    fn default() -> Self {
        Self {
            app: "SauceLabs My Demo App".to_string(),
            platform: "Android".to_string(),
            framework: format!("appium-oxide {}", crate::VERSION),
        }
    }
}

/// The flushed run artifact: metadata plus the append-ordered entries
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: RunMetadata,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub entries: Vec<TestEntry>,
}

impl Report {
    pub(crate) fn from_entries(metadata: RunMetadata, entries: Vec<TestEntry>) -> Self {
        let passed = entries
            .iter()
            .filter(|e| e.outcome == TestOutcome::Passed)
            .count();
        let failed = entries
            .iter()
            .filter(|e| matches!(e.outcome, TestOutcome::Failed(_)))
            .count();
        let skipped = entries
            .iter()
            .filter(|e| e.outcome == TestOutcome::Skipped)
            .count();
        Self {
            metadata,
            generated_at: Utc::now(),
            total: entries.len(),
            passed,
            failed,
            skipped,
            entries,
        }
    }
}
