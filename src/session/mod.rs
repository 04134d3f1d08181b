//! Session management layer
//!
//! Owns the single live Appium session per test suite: capability
//! construction, the session handshake, the implicit-wait policy, and
//! guaranteed release on every exit path.

pub mod driver;


pub use driver::Driver;
