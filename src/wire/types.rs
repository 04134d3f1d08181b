//! W3C WebDriver wire-protocol types
//!
//! Payload shapes for the session handshake and element endpoints, plus the
//! locator strategies the Appium server understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// W3C element reference key
///
/// Element objects come back from the server as a single-key map under this
/// magic identifier.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Locator strategy understood by the remote end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Accessibility id (content-description on Android)
    AccessibilityId,
    /// XPath over the accessibility tree
    Xpath,
    /// Native resource id
    Id,
    /// Widget class name
    ClassName,
    /// UiAutomator selector expression
    UiAutomator,
}

impl Strategy {
    /// Wire value for the `using` field of find-element requests
    pub fn as_wire(&self) -> &'static str {
        match self {
            Strategy::AccessibilityId => "accessibility id",
            Strategy::Xpath => "xpath",
            Strategy::Id => "id",
            Strategy::ClassName => "class name",
            Strategy::UiAutomator => "-android uiautomator",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Capability set sent in the session handshake
///
/// Vendor capabilities carry the `appium:` prefix required by the W3C
/// protocol; `platformName` is the only standard capability used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Capabilities {
    #[serde(rename = "platformName")]
    pub platform_name: String,

    #[serde(rename = "appium:deviceName")]
    pub device_name: String,

    #[serde(rename = "appium:app")]
    pub app: String,

    #[serde(rename = "appium:automationName")]
    pub automation_name: String,

    /// App state persists across runs within the session
    #[serde(rename = "appium:noReset")]
    pub no_reset: bool,
}

/// `POST /session` request body
#[derive(Debug, Serialize)]
pub struct NewSessionRequest {
    pub capabilities: CapabilitiesWrapper,
}

/// W3C `capabilities` envelope
#[derive(Debug, Serialize)]
pub struct CapabilitiesWrapper {
    #[serde(rename = "alwaysMatch")]
    pub always_match: Capabilities,
}

impl NewSessionRequest {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities: CapabilitiesWrapper {
                always_match: capabilities,
            },
        }
    }
}

/// `POST /session` response value
#[derive(Debug, Deserialize)]
pub struct NewSessionValue {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// `POST /session/{id}/timeouts` request body
#[derive(Debug, Serialize)]
pub struct TimeoutsRequest {
    /// Implicit element-wait floor in milliseconds
    pub implicit: u64,
}

/// Find-element request body
#[derive(Debug, Serialize)]
pub struct FindElementRequest {
    pub using: String,
    pub value: String,
}

/// Opaque reference to a resolved element
///
/// Valid only against the session it came from, and only until the
/// underlying UI mutates; never cached across queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireElement {
    pub element_id: String,
}

impl<'de> Deserialize<'de> for WireElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as DeError;
        let map = serde_json::Map::deserialize(deserializer)?;
        let element_id = map
            .get(ELEMENT_KEY)
            .and_then(|v| v.as_str())
            .ok_or_else(|| DeError::custom("missing W3C element key"))?
            .to_string();
        Ok(WireElement { element_id })
    }
}

/// Send-keys request body
#[derive(Debug, Serialize)]
pub struct SendKeysRequest {
    pub text: String,
}

/// Error payload the server returns inside `value` on failure
#[derive(Debug, Deserialize)]
pub struct WireError {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

impl WireError {
    /// Map a W3C error code onto the harness taxonomy
    pub fn into_error(self) -> crate::Error {
        let detail = if self.message.is_empty() {
            self.error.clone()
        } else {
            self.message.clone()
        };
        match self.error.as_str() {
            "no such element" => crate::Error::ElementNotFound(detail),
            "stale element reference" => crate::Error::StaleElement(detail),
            "invalid session id" | "session not created" => crate::Error::SessionStart(detail),
            "timeout" => crate::Error::Timeout(detail),
            _ => crate::Error::WireProtocol(format!("{}: {}", self.error, detail)),
        }
    }
}
