//! Unified error types for Appium-Oxide

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Appium-Oxide
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error (missing or invalid configuration; fatal)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Session handshake with the Appium server failed
    #[error("Session start failed: {0}")]
    SessionStart(String),

    /// Element not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element became stale between resolution and action
    #[error("Stale element: {0}")]
    StaleElement(String),

    /// Collection index outside [0, len)
    #[error("Index {index} out of range for {len} matched element(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Reporter lifecycle misuse; always a defect in the caller
    #[error("Reporter state error: {0}")]
    ReporterState(String),

    /// Test assertion failure, recorded as the test's failure reason
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Bounded wait expired
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Malformed or unexpected wire-protocol response
    #[error("Wire protocol error: {0}")]
    WireProtocol(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new session start error
    pub fn session_start<S: Into<String>>(msg: S) -> Self {
        Error::SessionStart(msg.into())
    }

    /// Create a new element not found error
    pub fn element_not_found<S: Into<String>>(msg: S) -> Self {
        Error::ElementNotFound(msg.into())
    }

    /// Create a new stale element error
    pub fn stale_element<S: Into<String>>(msg: S) -> Self {
        Error::StaleElement(msg.into())
    }

    /// Create a new reporter state error
    pub fn reporter_state<S: Into<String>>(msg: S) -> Self {
        Error::ReporterState(msg.into())
    }

    /// Create a new assertion failure
    pub fn assertion<S: Into<String>>(msg: S) -> Self {
        Error::Assertion(msg.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new wire protocol error
    pub fn wire_protocol<S: Into<String>>(msg: S) -> Self {
        Error::WireProtocol(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = Error::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(
            err.to_string(),
            "Index 3 out of range for 3 matched element(s)"
        );
    }

    #[test]
    fn test_constructor_helpers() {
        assert!(matches!(
            Error::element_not_found("login button"),
            Error::ElementNotFound(_)
        ));
        assert!(matches!(
            Error::session_start("connection refused"),
            Error::SessionStart(_)
        ));
        assert!(matches!(
            Error::reporter_state("no started entry"),
            Error::ReporterState(_)
        ));
    }
}
