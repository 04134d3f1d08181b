//! Run reporter implementation
//!
//! State machine per run: `Idle → Running → Flushed`. Entries are appended
//! in event order; each entry moves `Started →` exactly one terminal state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

use crate::report::model::{Report, RunMetadata, TestEntry, TestId, TestOutcome};
use crate::{Error, Result};

/// Conventional report artifact location
pub const DEFAULT_REPORT_PATH: &str = "test-output/report.json";

#[derive(Debug, PartialEq)]
enum RunState {
    Idle,
    Running,
    Flushed,
}

struct ReporterInner {
    state: RunState,
    entries: Vec<TestEntry>,
    index: HashMap<TestId, usize>,
}

/// Aggregates test outcomes for one run and flushes them exactly once
pub struct RunReporter {
    metadata: RunMetadata,
    output_path: PathBuf,
    inner: Mutex<ReporterInner>,
}

impl RunReporter {
    /// Create a reporter writing to the conventional artifact path
    pub fn new(metadata: RunMetadata) -> Self {
        Self::with_output(metadata, DEFAULT_REPORT_PATH)
    }

    /// Create a reporter with an explicit artifact path
    pub fn with_output<P: AsRef<Path>>(metadata: RunMetadata, path: P) -> Self {
        Self {
            metadata,
            output_path: path.as_ref().to_path_buf(),
            inner: Mutex::new(ReporterInner {
                state: RunState::Idle,
                entries: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ReporterInner>> {
        self.inner
            .lock()
            .map_err(|_| Error::reporter_state("reporter mutex poisoned"))
    }

    /// Record a Started entry, returning the token its terminal event must
    /// present. The first start moves the run from Idle to Running.
    pub fn test_started(&self, name: &str, description: &str) -> Result<TestId> {
        let mut inner = self.lock()?;
        match inner.state {
            RunState::Flushed => {
                return Err(Error::reporter_state(format!(
                    "test '{}' started after report flush",
                    name
                )));
            }
            RunState::Idle => inner.state = RunState::Running,
            RunState::Running => {}
        }

        let id = TestId::new();
        let entry = TestEntry {
            id: id.clone(),
            name: name.to_string(),
            description: description.to_string(),
            outcome: TestOutcome::Started,
            started_at: chrono::Utc::now(),
            finished_at: None,
        };
        let position = inner.entries.len();
        inner.entries.push(entry);
        inner.index.insert(id.clone(), position);
        Ok(id)
    }

    pub fn test_passed(&self, id: &TestId) -> Result<()> {
        self.finish(id, TestOutcome::Passed)
    }

    pub fn test_failed(&self, id: &TestId, reason: &str) -> Result<()> {
        self.finish(id, TestOutcome::Failed(reason.to_string()))
    }

    pub fn test_skipped(&self, id: &TestId) -> Result<()> {
        self.finish(id, TestOutcome::Skipped)
    }

    /// Transition an entry to its terminal state.
    ///
    /// A terminal event without a matching Started entry, or a second
    /// terminal event for the same entry, is a lifecycle-ordering bug and
    /// fails loudly rather than being ignored.
    fn finish(&self, id: &TestId, outcome: TestOutcome) -> Result<()> {
        debug_assert!(outcome.is_terminal());
        let mut inner = self.lock()?;
        if inner.state == RunState::Flushed {
            return Err(Error::reporter_state(
                "terminal event after report flush; no further entries accepted",
            ));
        }

        let position = *inner
            .index
            .get(id)
            .ok_or_else(|| Error::reporter_state("terminal event with no Started entry"))?;
        let entry = &mut inner.entries[position];
        if entry.outcome.is_terminal() {
            return Err(Error::reporter_state(format!(
                "test '{}' already has a terminal outcome",
                entry.name
            )));
        }
        entry.outcome = outcome;
        entry.finished_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// Flush the accumulated report to its JSON artifact.
    ///
    /// Idempotent (a second flush is a no-op returning the same path) and
    /// irreversible. Entries still Started at flush time are closed as
    /// Failed so the artifact never carries a dangling Started entry. A run
    /// with zero tests still produces an artifact.
    pub fn flush(&self) -> Result<PathBuf> {
        let entries = {
            let mut inner = self.lock()?;
            if inner.state == RunState::Flushed {
                return Ok(self.output_path.clone());
            }
            inner.state = RunState::Flushed;

            for entry in inner.entries.iter_mut() {
                if !entry.outcome.is_terminal() {
                    warn!("Test '{}' never reported a terminal state", entry.name);
                    entry.outcome =
                        TestOutcome::Failed("no terminal state reported".to_string());
                    entry.finished_at = Some(chrono::Utc::now());
                }
            }
            inner.entries.clone()
        };

        let report = Report::from_entries(self.metadata.clone(), entries);
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&self.output_path, json)?;
        info!(
            "Report flushed to {} ({} passed, {} failed, {} skipped)",
            self.output_path.display(),
            report.passed,
            report.failed,
            report.skipped
        );
        Ok(self.output_path.clone())
    }

    /// Snapshot of the entries accumulated so far (event order)
    pub fn entries(&self) -> Result<Vec<TestEntry>> {
        Ok(self.lock()?.entries.clone())
    }
}
