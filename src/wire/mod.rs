//! WebDriver wire-protocol layer
//!
//! Everything that talks HTTP to the Appium server lives here, behind the
//! [`WireClient`] trait so the session and page layers never depend on a
//! live endpoint.
//!
//! ## Module structure
//! - `traits`: the abstract wire client interface
//! - `types`: W3C request/response payloads and locator strategies
//! - `client`: reqwest-based production client
//! - `mock`: scriptable in-memory client for testing

pub mod traits;
pub mod types;
pub mod client;
pub mod mock;

pub use traits::WireClient;
pub use types::{Capabilities, Strategy, WireElement};
pub use client::HttpWireClient;
pub use mock::{MockWireClient, ScriptedElement};
