//! Wire client trait
//!
//! Abstract interface over the WebDriver endpoints the harness uses. The
//! production implementation speaks HTTP; tests substitute a scriptable
//! mock.

use async_trait::async_trait;
use std::time::Duration;

use crate::wire::types::{Capabilities, Strategy, WireElement};
use crate::Result;

/// Client for the subset of the WebDriver protocol the harness needs
#[async_trait]
pub trait WireClient: Send + Sync {
    /// Perform the session-creation handshake, returning the session id
    async fn new_session(&self, capabilities: &Capabilities) -> Result<String>;

    /// Delete a session on the remote end
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Set the session-level implicit element-wait floor
    async fn set_implicit_wait(&self, session_id: &str, wait: Duration) -> Result<()>;

    /// Find the first element matching the locator
    async fn find_element(
        &self,
        session_id: &str,
        strategy: Strategy,
        value: &str,
    ) -> Result<WireElement>;

    /// Find all elements matching the locator, in the server's native
    /// traversal order
    async fn find_elements(
        &self,
        session_id: &str,
        strategy: Strategy,
        value: &str,
    ) -> Result<Vec<WireElement>>;

    /// Check whether an element is displayed
    async fn is_displayed(&self, session_id: &str, element: &WireElement) -> Result<bool>;

    /// Get an element's visible text
    async fn text(&self, session_id: &str, element: &WireElement) -> Result<String>;

    /// Click an element
    async fn click(&self, session_id: &str, element: &WireElement) -> Result<()>;

    /// Clear an editable element's content
    async fn clear(&self, session_id: &str, element: &WireElement) -> Result<()>;

    /// Type text into an element
    async fn send_keys(&self, session_id: &str, element: &WireElement, text: &str) -> Result<()>;
}
