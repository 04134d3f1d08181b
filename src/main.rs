//! Appium-Oxide runner entry point
//!
//! Resolves the harness configuration (file plus `APPIUM_HOST` /
//! `APPIUM_PORT` overrides), runs the built-in suites against the Appium
//! server, and flushes the JSON run report. The report is written even
//! when the run aborts before any test starts. Exit status is non-zero
//! when any case failed or any suite aborted.

use appium_oxide::config::DEFAULT_CONFIG_PATH;
use appium_oxide::report::{RunMetadata, RunReporter};
use appium_oxide::suite::run_from_config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Appium-Oxide Runner v{}", appium_oxide::VERSION);

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // The reporter exists before configuration resolution so even a run
    // that fails to start leaves an artifact.
    let reporter = RunReporter::new(RunMetadata::default());
    let summary = run_from_config(&config_path, &reporter).await?;

    if !summary.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
