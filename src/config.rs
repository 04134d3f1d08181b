//! Configuration management for Appium-Oxide
//!
//! Harness configuration is loaded from a TOML file and merged with
//! environment overrides (`APPIUM_HOST` / `APPIUM_PORT`) for containerized
//! execution, where the Appium endpoint is injected by the orchestrator
//! rather than checked into the config file.

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "config/harness.toml";

/// Fallback Appium port when `APPIUM_PORT` is absent or unparsable
pub const DEFAULT_APPIUM_PORT: u16 = 4723;

/// Harness configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Appium server URL
    pub server_url: String,

    /// Target platform name (e.g. "Android")
    pub platform_name: String,

    /// Device or emulator name
    pub device_name: String,

    /// Path to the application package, relative to the working directory
    /// or absolute
    pub app_path: String,

    /// Automation engine name (e.g. "UiAutomator2")
    pub automation_name: String,

    /// Implicit element-wait floor in seconds
    pub implicit_wait: u64,

    /// Known-good login username
    pub valid_username: String,

    /// Known-good login password
    pub valid_password: String,

    /// Known-bad login password
    pub invalid_password: String,
}

impl Config {
    /// Load configuration from a file
    ///
    /// A missing or unreadable file is fatal: there are no sensible
    /// defaults for the app path or platform.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from a file and apply environment overrides
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::from_file(path)?;
        Ok(config.with_env_overrides(|key| env::var(key).ok()))
    }

    /// Apply environment overrides through an injected lookup.
    ///
    /// `APPIUM_HOST`, when set and non-blank, replaces the file-derived
    /// server URL with `http://{host}:{port}`; the port comes from
    /// `APPIUM_PORT` when it parses as a positive integer and falls back
    /// to 4723 with a warning otherwise. A lone `APPIUM_PORT` with no host
    /// has no effect.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("APPIUM_HOST") {
            Some(h) if !h.trim().is_empty() => h.trim().to_string(),
            _ => return self,
        };

        let port = match lookup("APPIUM_PORT") {
            Some(p) if !p.trim().is_empty() => match p.trim().parse::<u16>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(
                        "Invalid APPIUM_PORT '{}', defaulting to {}",
                        p, DEFAULT_APPIUM_PORT
                    );
                    DEFAULT_APPIUM_PORT
                }
            },
            _ => DEFAULT_APPIUM_PORT,
        };

        self.server_url = format!("http://{}:{}", host, port);
        info!("Using overridden Appium URL: {}", self.server_url);
        self
    }

    /// Application path resolved against the current working directory
    /// when relative
    pub fn app_absolute_path(&self) -> Result<PathBuf> {
        let path = Path::new(&self.app_path);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let cwd = env::current_dir()?;
        Ok(cwd.join(path))
    }
}
