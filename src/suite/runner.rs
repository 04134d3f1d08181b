//! Suite runner
//!
//! Drives suites against one wire client and feeds every outcome to the
//! reporter. Guarantees per suite: the session opens before the first
//! case, every started case gets exactly one terminal reporter event, and
//! the session is quit on every exit path.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::report::RunReporter;
use crate::session::Driver;
use crate::suite::{builtin_suites, Suite, SuiteCtx};
use crate::wire::{HttpWireClient, WireClient};
use crate::Result;

/// Aggregate result of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub suites_run: usize,
    pub suites_aborted: usize,
}

impl RunSummary {
    /// Whether every case of every suite passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.suites_aborted == 0
    }
}

/// Resolve the configuration and run the built-in suites against the
/// Appium server it names, flushing the report on every exit path.
///
/// A run that dies before any session opens (missing config file,
/// malformed URL) still leaves a flushed artifact with zero entries; the
/// error itself propagates to the caller after the flush.
pub async fn run_from_config(config_path: &str, reporter: &RunReporter) -> Result<RunSummary> {
    let outcome = drive(config_path, reporter).await;
    reporter.flush()?;
    outcome
}

async fn drive(config_path: &str, reporter: &RunReporter) -> Result<RunSummary> {
    let config = Arc::new(Config::resolve(config_path)?);
    info!(
        "Configuration loaded: server={}, platform={}, device={}",
        config.server_url, config.platform_name, config.device_name
    );

    let wire = Arc::new(HttpWireClient::new(&config.server_url)?);
    run_suites(config, wire, reporter, builtin_suites()).await
}

/// Run the given suites sequentially, recording each case's outcome.
///
/// The caller flushes the reporter once afterwards; the runner itself never
/// flushes, so several `run_suites` calls can share one report.
pub async fn run_suites(
    config: Arc<Config>,
    wire: Arc<dyn WireClient>,
    reporter: &RunReporter,
    suites: Vec<Suite>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for suite in suites {
        run_one_suite(&config, &wire, reporter, suite, &mut summary).await?;
    }

    info!(
        "Run complete: {} passed, {} failed, {} suite(s) aborted",
        summary.passed, summary.failed, summary.suites_aborted
    );
    Ok(summary)
}

#[instrument(skip_all, fields(suite = suite.name))]
async fn run_one_suite(
    config: &Arc<Config>,
    wire: &Arc<dyn WireClient>,
    reporter: &RunReporter,
    suite: Suite,
    summary: &mut RunSummary,
) -> Result<()> {
    let driver = Arc::new(Driver::new(wire.clone()));

    if let Err(e) = driver.open(config).await {
        // Session failures belong to the suite, not to individual cases;
        // later suites still get their chance.
        error!("Suite '{}' aborted: {}", suite.name, e);
        let id = reporter.test_started(suite.name, "suite session setup")?;
        reporter.test_failed(&id, &e.to_string())?;
        summary.suites_aborted += 1;
        return Ok(());
    }

    for case in &suite.cases {
        let id = reporter.test_started(case.name, case.description)?;
        let ctx = SuiteCtx {
            driver: driver.clone(),
            config: config.clone(),
        };

        match (case.body)(ctx).await {
            Ok(()) => {
                info!("Test PASSED: {}", case.name);
                reporter.test_passed(&id)?;
                summary.passed += 1;
            }
            Err(e) => {
                // The terminal event is recorded here even when the body
                // bailed out at its first await.
                warn!("Test FAILED: {}: {}", case.name, e);
                reporter.test_failed(&id, &e.to_string())?;
                summary.failed += 1;
            }
        }
    }
    summary.suites_run += 1;

    // Release the session whatever the cases did
    if let Err(e) = driver.quit().await {
        warn!("Failed to quit session for suite '{}': {}", suite.name, e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{RunMetadata, TestOutcome};
    use crate::suite::TestCase;
    use crate::wire::MockWireClient;
    use crate::Error;

    fn test_config() -> Arc<Config> {
        Arc::new(
            toml::from_str(
                r#"
server_url = "http://127.0.0.1:4723"
platform_name = "Android"
device_name = "emulator-5554"
app_path = "apps/demo-app.apk"
automation_name = "UiAutomator2"
implicit_wait = 5
valid_username = "bob@example.com"
valid_password = "10203040"
invalid_password = "wrongpass"
"#,
            )
            .unwrap(),
        )
    }

    fn reporter_at(dir: &tempfile::TempDir) -> RunReporter {
        RunReporter::with_output(RunMetadata::default(), dir.path().join("report.json"))
    }

    fn trivial_suite() -> Suite {
        Suite {
            name: "trivial",
            cases: vec![
                TestCase {
                    name: "passes",
                    description: "always passes",
                    body: |_ctx| Box::pin(async { Ok(()) }),
                },
                TestCase {
                    name: "fails",
                    description: "always fails",
                    body: |_ctx| {
                        Box::pin(async { Err(Error::assertion("expected failure")) })
                    },
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_outcomes_recorded_and_session_released() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = reporter_at(&dir);
        let mock = Arc::new(MockWireClient::new());

        let summary = run_suites(
            test_config(),
            mock.clone(),
            &reporter,
            vec![trivial_suite()],
        )
        .await
        .unwrap();

        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.suites_run, 1);
        assert!(!summary.all_passed());

        let entries = reporter.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].outcome, TestOutcome::Passed);
        assert_eq!(
            entries[1].outcome,
            TestOutcome::Failed("Assertion failed: expected failure".to_string())
        );

        // Session quit despite the failing case
        assert_eq!(mock.deleted_sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_case_still_gets_terminal_event() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = reporter_at(&dir);
        let mock = Arc::new(MockWireClient::new());

        let suite = Suite {
            name: "early_bailout",
            cases: vec![TestCase {
                name: "bails",
                description: "errors before any assertion",
                body: |ctx| {
                    Box::pin(async move {
                        // Resolution failure propagates out of the body
                        ctx.driver
                            .find_element(crate::wire::Strategy::Id, "nope")
                            .await?;
                        Ok(())
                    })
                },
            }],
        };

        run_suites(test_config(), mock, &reporter, vec![suite])
            .await
            .unwrap();

        let path = reporter.flush().unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["entries"][0]["outcome"]["status"], "Failed");
    }

    #[tokio::test]
    async fn test_session_failure_is_suite_level_and_other_suites_run() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = reporter_at(&dir);
        // Every handshake fails
        let mock = Arc::new(MockWireClient::failing_handshake("server unreachable"));

        let summary = run_suites(
            test_config(),
            mock,
            &reporter,
            vec![trivial_suite(), trivial_suite()],
        )
        .await
        .unwrap();

        assert_eq!(summary.suites_aborted, 2);
        assert_eq!(summary.passed, 0);

        // One class-level entry per suite, none per case
        let entries = reporter.entries().unwrap();
        assert_eq!(entries.len(), 2);
        for entry in entries {
            assert_eq!(entry.name, "trivial");
            assert!(matches!(entry.outcome, TestOutcome::Failed(_)));
        }
    }
}
