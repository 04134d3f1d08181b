//! Appium-Oxide: Rust-based mobile UI test-automation harness
//!
//! This library drives a mobile application through a remote Appium server
//! (W3C WebDriver wire protocol), using page objects over a shared
//! explicit-wait element resolver, and records per-test outcomes into a
//! structured run report.

pub mod error;
pub mod config;

pub mod wire;
pub mod session;
pub mod page;
pub mod report;
pub mod suite;

// Re-exports
pub use error::{Error, Result};

/// Appium-Oxide library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
