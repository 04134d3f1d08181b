//! Built-in test suites and the suite runner
//!
//! Each suite owns exactly one driver for its whole run: the runner opens
//! the session before the first case, hands every case a [`SuiteCtx`], and
//! quits the session unconditionally afterwards, whatever the cases did.
//!
//! ## Module structure
//! - `login`: login-screen cases (TC01-TC04)
//! - `navigation`: catalog navigation and logout (TC05-TC07)
//! - `features`: cart and product-detail features (TC08-TC10)
//! - `runner`: drives suites and feeds the reporter

pub mod login;
pub mod navigation;
pub mod features;
pub mod runner;

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::config::Config;
use crate::session::Driver;
use crate::{Error, Result};

pub use runner::{run_from_config, run_suites, RunSummary};

/// Everything a case body needs: the suite's driver and the resolved config
#[derive(Clone)]
pub struct SuiteCtx {
    pub driver: Arc<Driver>,
    pub config: Arc<Config>,
}

/// One test case: identity plus an async body
pub struct TestCase {
    pub name: &'static str,
    pub description: &'static str,
    pub body: fn(SuiteCtx) -> BoxFuture<'static, Result<()>>,
}

/// A named group of cases sharing one session
pub struct Suite {
    pub name: &'static str,
    pub cases: Vec<TestCase>,
}

/// All built-in suites, in execution order
pub fn builtin_suites() -> Vec<Suite> {
    vec![login::suite(), navigation::suite(), features::suite()]
}

/// Fail the case with `message` unless `condition` holds
pub fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::assertion(message.to_string()))
    }
}

/// Fail the case unless `actual == expected`
pub fn ensure_eq<T>(actual: T, expected: T, message: &str) -> Result<()>
where
    T: PartialEq + std::fmt::Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "{} (expected {:?}, got {:?})",
            message, expected, actual
        )))
    }
}
