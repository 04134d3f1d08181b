//! Mock wire client for testing
//!
//! An in-memory WebDriver endpoint with a scriptable screen: tests install
//! elements (optionally appearing after a delay), remove them to simulate
//! staleness, and assert on the handshake payloads the harness sent.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::wire::traits::WireClient;
use crate::wire::types::{Capabilities, Strategy, WireElement};
use crate::{Error, Result};

/// A scripted UI element on the mock screen
#[derive(Debug, Clone)]
pub struct ScriptedElement {
    pub strategy: Strategy,
    pub locator_value: String,
    pub text: String,
    pub displayed: bool,
    /// Element only exists on screen after this delay
    pub appears_after: Option<Duration>,
}

impl ScriptedElement {
    /// A visible element matching the given locator
    pub fn visible(strategy: Strategy, locator_value: &str, text: &str) -> Self {
        Self {
            strategy,
            locator_value: locator_value.to_string(),
            text: text.to_string(),
            displayed: true,
            appears_after: None,
        }
    }

    /// A present but hidden element
    pub fn hidden(strategy: Strategy, locator_value: &str) -> Self {
        Self {
            strategy,
            locator_value: locator_value.to_string(),
            text: String::new(),
            displayed: false,
            appears_after: None,
        }
    }

    /// Delay the element's appearance on screen
    pub fn appearing_after(mut self, delay: Duration) -> Self {
        self.appears_after = Some(delay);
        self
    }
}

struct InstalledElement {
    id: String,
    scripted: ScriptedElement,
    installed_at: Instant,
    keyed_text: String,
}

impl InstalledElement {
    fn on_screen(&self) -> bool {
        match self.scripted.appears_after {
            Some(delay) => self.installed_at.elapsed() >= delay,
            None => true,
        }
    }
}

#[derive(Default)]
struct MockState {
    fail_handshake: Option<String>,
    sessions: Vec<String>,
    deleted_sessions: Vec<String>,
    capabilities_seen: Option<Capabilities>,
    implicit_wait_seen: Option<Duration>,
    screen: Vec<InstalledElement>,
    clicks: Vec<String>,
}

/// Scriptable in-memory wire client
#[derive(Default)]
pub struct MockWireClient {
    state: Mutex<MockState>,
}

impl MockWireClient {
    /// Create a mock with an empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose handshake always fails with the given message
    pub fn failing_handshake(message: &str) -> Self {
        let mock = Self::new();
        mock.lock().fail_handshake = Some(message.to_string());
        mock
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Install an element on the screen, returning its element id
    pub fn install(&self, scripted: ScriptedElement) -> String {
        let id = format!("el-{}", Uuid::new_v4());
        self.lock().screen.push(InstalledElement {
            id: id.clone(),
            scripted,
            installed_at: Instant::now(),
            keyed_text: String::new(),
        });
        id
    }

    /// Remove an element from the screen; later actions on an existing
    /// handle for it report staleness
    pub fn remove(&self, element_id: &str) {
        self.lock().screen.retain(|e| e.id != element_id);
    }

    /// Capability payload received by the last handshake
    pub fn capabilities_seen(&self) -> Option<Capabilities> {
        self.lock().capabilities_seen.clone()
    }

    /// Implicit wait the harness configured after the handshake
    pub fn implicit_wait_seen(&self) -> Option<Duration> {
        self.lock().implicit_wait_seen
    }

    /// Session ids deleted so far
    pub fn deleted_sessions(&self) -> Vec<String> {
        self.lock().deleted_sessions.clone()
    }

    /// Element ids clicked so far, in order
    pub fn clicks(&self) -> Vec<String> {
        self.lock().clicks.clone()
    }

    /// Text typed into an element via send_keys
    pub fn keyed_text(&self, element_id: &str) -> Option<String> {
        self.lock()
            .screen
            .iter()
            .find(|e| e.id == element_id)
            .map(|e| e.keyed_text.clone())
    }

    fn require_session(state: &MockState, session_id: &str) -> Result<()> {
        if state.sessions.iter().any(|s| s == session_id)
            && !state.deleted_sessions.iter().any(|s| s == session_id)
        {
            Ok(())
        } else {
            Err(Error::wire_protocol(format!(
                "unknown session: {}",
                session_id
            )))
        }
    }
}

#[async_trait]
impl WireClient for MockWireClient {
    async fn new_session(&self, capabilities: &Capabilities) -> Result<String> {
        let mut state = self.lock();
        if let Some(message) = &state.fail_handshake {
            return Err(Error::session_start(message.clone()));
        }
        let session_id = Uuid::new_v4().to_string();
        state.sessions.push(session_id.clone());
        state.capabilities_seen = Some(capabilities.clone());
        Ok(session_id)
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut state = self.lock();
        Self::require_session(&state, session_id)?;
        state.deleted_sessions.push(session_id.to_string());
        Ok(())
    }

    async fn set_implicit_wait(&self, session_id: &str, wait: Duration) -> Result<()> {
        let mut state = self.lock();
        Self::require_session(&state, session_id)?;
        state.implicit_wait_seen = Some(wait);
        Ok(())
    }

    async fn find_element(
        &self,
        session_id: &str,
        strategy: Strategy,
        value: &str,
    ) -> Result<WireElement> {
        let state = self.lock();
        Self::require_session(&state, session_id)?;
        state
            .screen
            .iter()
            .find(|e| {
                e.on_screen() && e.scripted.strategy == strategy && e.scripted.locator_value == value
            })
            .map(|e| WireElement {
                element_id: e.id.clone(),
            })
            .ok_or_else(|| Error::element_not_found(format!("{} '{}'", strategy, value)))
    }

    async fn find_elements(
        &self,
        session_id: &str,
        strategy: Strategy,
        value: &str,
    ) -> Result<Vec<WireElement>> {
        let state = self.lock();
        Self::require_session(&state, session_id)?;
        // Install order stands in for the server's traversal order
        Ok(state
            .screen
            .iter()
            .filter(|e| {
                e.on_screen() && e.scripted.strategy == strategy && e.scripted.locator_value == value
            })
            .map(|e| WireElement {
                element_id: e.id.clone(),
            })
            .collect())
    }

    async fn is_displayed(&self, session_id: &str, element: &WireElement) -> Result<bool> {
        let state = self.lock();
        Self::require_session(&state, session_id)?;
        state
            .screen
            .iter()
            .find(|e| e.id == element.element_id && e.on_screen())
            .map(|e| e.scripted.displayed)
            .ok_or_else(|| Error::stale_element(element.element_id.clone()))
    }

    async fn text(&self, session_id: &str, element: &WireElement) -> Result<String> {
        let state = self.lock();
        Self::require_session(&state, session_id)?;
        state
            .screen
            .iter()
            .find(|e| e.id == element.element_id && e.on_screen())
            .map(|e| e.scripted.text.clone())
            .ok_or_else(|| Error::stale_element(element.element_id.clone()))
    }

    async fn click(&self, session_id: &str, element: &WireElement) -> Result<()> {
        let mut state = self.lock();
        Self::require_session(&state, session_id)?;
        let known = state
            .screen
            .iter()
            .any(|e| e.id == element.element_id && e.on_screen());
        if !known {
            return Err(Error::stale_element(element.element_id.clone()));
        }
        state.clicks.push(element.element_id.clone());
        Ok(())
    }

    async fn clear(&self, session_id: &str, element: &WireElement) -> Result<()> {
        let mut state = self.lock();
        Self::require_session(&state, session_id)?;
        let entry = state
            .screen
            .iter_mut()
            .find(|e| e.id == element.element_id && e.on_screen())
            .ok_or_else(|| Error::stale_element(element.element_id.clone()))?;
        entry.keyed_text.clear();
        Ok(())
    }

    async fn send_keys(&self, session_id: &str, element: &WireElement, text: &str) -> Result<()> {
        let mut state = self.lock();
        Self::require_session(&state, session_id)?;
        let entry = state
            .screen
            .iter_mut()
            .find(|e| e.id == element.element_id && e.on_screen())
            .ok_or_else(|| Error::stale_element(element.element_id.clone()))?;
        entry.keyed_text.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capabilities() -> Capabilities {
        Capabilities {
            platform_name: "Android".to_string(),
            device_name: "emulator-5554".to_string(),
            app: "/opt/apps/demo.apk".to_string(),
            automation_name: "UiAutomator2".to_string(),
            no_reset: false,
        }
    }

    #[tokio::test]
    async fn test_handshake_records_capabilities() {
        let mock = MockWireClient::new();
        let session = mock.new_session(&capabilities()).await.unwrap();
        assert!(!session.is_empty());
        assert_eq!(mock.capabilities_seen().unwrap(), capabilities());
    }

    #[tokio::test]
    async fn test_failing_handshake() {
        let mock = MockWireClient::failing_handshake("connection refused");
        let result = mock.new_session(&capabilities()).await;
        assert!(matches!(result, Err(Error::SessionStart(_))));
    }

    #[tokio::test]
    async fn test_find_and_text() {
        let mock = MockWireClient::new();
        let session = mock.new_session(&capabilities()).await.unwrap();
        mock.install(ScriptedElement::visible(
            Strategy::AccessibilityId,
            "Login button",
            "LOGIN",
        ));

        let element = mock
            .find_element(&session, Strategy::AccessibilityId, "Login button")
            .await
            .unwrap();
        assert_eq!(mock.text(&session, &element).await.unwrap(), "LOGIN");
    }

    #[tokio::test]
    async fn test_removed_element_is_stale() {
        let mock = MockWireClient::new();
        let session = mock.new_session(&capabilities()).await.unwrap();
        let id = mock.install(ScriptedElement::visible(
            Strategy::Id,
            "com.demo:id/button",
            "OK",
        ));

        let element = mock
            .find_element(&session, Strategy::Id, "com.demo:id/button")
            .await
            .unwrap();
        mock.remove(&id);

        let result = mock.click(&session, &element).await;
        assert!(matches!(result, Err(Error::StaleElement(_))));
    }

    #[tokio::test]
    async fn test_delayed_element_not_found_until_due() {
        let mock = MockWireClient::new();
        let session = mock.new_session(&capabilities()).await.unwrap();
        mock.install(
            ScriptedElement::visible(Strategy::Xpath, "//late", "late")
                .appearing_after(Duration::from_millis(200)),
        );

        let early = mock.find_element(&session, Strategy::Xpath, "//late").await;
        assert!(matches!(early, Err(Error::ElementNotFound(_))));

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(mock
            .find_element(&session, Strategy::Xpath, "//late")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_find_elements_preserves_install_order() {
        let mock = MockWireClient::new();
        let session = mock.new_session(&capabilities()).await.unwrap();
        let first = mock.install(ScriptedElement::visible(
            Strategy::ClassName,
            "android.widget.TextView",
            "one",
        ));
        let second = mock.install(ScriptedElement::visible(
            Strategy::ClassName,
            "android.widget.TextView",
            "two",
        ));

        let elements = mock
            .find_elements(&session, Strategy::ClassName, "android.widget.TextView")
            .await
            .unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].element_id, first);
        assert_eq!(elements[1].element_id, second);
    }

    #[tokio::test]
    async fn test_send_keys_accumulates_and_clear_resets() {
        let mock = MockWireClient::new();
        let session = mock.new_session(&capabilities()).await.unwrap();
        let id = mock.install(ScriptedElement::visible(
            Strategy::AccessibilityId,
            "Username input field",
            "",
        ));

        let element = mock
            .find_element(&session, Strategy::AccessibilityId, "Username input field")
            .await
            .unwrap();
        mock.send_keys(&session, &element, "bob").await.unwrap();
        mock.send_keys(&session, &element, "@example.com")
            .await
            .unwrap();
        assert_eq!(mock.keyed_text(&id).unwrap(), "bob@example.com");

        mock.clear(&session, &element).await.unwrap();
        assert_eq!(mock.keyed_text(&id).unwrap(), "");
    }
}
