//! Driver implementation
//!
//! A `Driver` holds at most one remote session and is exclusively owned by
//! the suite that opened it; it is never shared across suites and never
//! re-opened mid-suite.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::wire::types::{Capabilities, Strategy, WireElement};
use crate::wire::WireClient;
use crate::{Error, Result};

#[derive(Debug, Clone)]
enum SessionState {
    /// No session yet
    Detached,
    /// Live session on the remote end
    Active {
        session_id: String,
        implicit_wait: Duration,
    },
    /// Session released; terminal
    Closed,
}

/// Handle to the single remote automation session for one test suite
pub struct Driver {
    wire: Arc<dyn WireClient>,
    state: Mutex<SessionState>,
}

impl Driver {
    /// Create a detached driver; no remote call is made until [`open`]
    ///
    /// [`open`]: Driver::open
    pub fn new(wire: Arc<dyn WireClient>) -> Self {
        Self {
            wire,
            state: Mutex::new(SessionState::Detached),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open the session: handshake with the Appium server using
    /// capabilities derived from the config, then apply the implicit
    /// element-wait floor.
    ///
    /// Handshake failure is fatal for this driver and is not retried.
    /// A driver is opened at most once; opening an active or closed driver
    /// is a lifecycle error.
    #[instrument(skip(self, config))]
    pub async fn open(&self, config: &Config) -> Result<()> {
        match &*self.lock() {
            SessionState::Detached => {}
            SessionState::Active { .. } => {
                return Err(Error::session_start("session already open"));
            }
            SessionState::Closed => {
                return Err(Error::session_start(
                    "driver already closed; sessions are never re-opened",
                ));
            }
        }

        let app = config.app_absolute_path()?;
        let capabilities = Capabilities {
            platform_name: config.platform_name.clone(),
            device_name: config.device_name.clone(),
            app: app.to_string_lossy().into_owned(),
            automation_name: config.automation_name.clone(),
            no_reset: false,
        };

        let session_id = self.wire.new_session(&capabilities).await?;
        let implicit_wait = Duration::from_secs(config.implicit_wait);
        self.wire
            .set_implicit_wait(&session_id, implicit_wait)
            .await?;

        info!(session_id, "Driver started successfully");
        *self.lock() = SessionState::Active {
            session_id,
            implicit_wait,
        };
        Ok(())
    }

    /// Release the remote session. Idempotent: quitting a detached,
    /// already-quit, or failed-open driver is a no-op.
    #[instrument(skip(self))]
    pub async fn quit(&self) -> Result<()> {
        let session_id = {
            let mut state = self.lock();
            match std::mem::replace(&mut *state, SessionState::Closed) {
                SessionState::Active { session_id, .. } => session_id,
                SessionState::Detached | SessionState::Closed => return Ok(()),
            }
        };

        if let Err(e) = self.wire.delete_session(&session_id).await {
            // The session is gone from our side either way
            warn!("Failed to delete remote session {}: {}", session_id, e);
            return Err(e);
        }
        info!(session_id, "Driver closed successfully");
        Ok(())
    }

    /// Whether a session is currently open
    pub fn is_open(&self) -> bool {
        matches!(&*self.lock(), SessionState::Active { .. })
    }

    /// Active session id
    pub fn session_id(&self) -> Result<String> {
        match &*self.lock() {
            SessionState::Active { session_id, .. } => Ok(session_id.clone()),
            _ => Err(Error::internal("no active session")),
        }
    }

    /// Implicit element-wait floor applied to this session
    pub fn implicit_wait(&self) -> Result<Duration> {
        match &*self.lock() {
            SessionState::Active { implicit_wait, .. } => Ok(*implicit_wait),
            _ => Err(Error::internal("no active session")),
        }
    }

    // Element operations proxy to the wire client with the active session.
    // Resolution order for multi-match locators is whatever the server's
    // native traversal produced; nothing is re-sorted here.

    pub async fn find_element(&self, strategy: Strategy, value: &str) -> Result<WireElement> {
        let session_id = self.session_id()?;
        self.wire.find_element(&session_id, strategy, value).await
    }

    pub async fn find_elements(&self, strategy: Strategy, value: &str) -> Result<Vec<WireElement>> {
        let session_id = self.session_id()?;
        self.wire.find_elements(&session_id, strategy, value).await
    }

    pub async fn is_displayed(&self, element: &WireElement) -> Result<bool> {
        let session_id = self.session_id()?;
        self.wire.is_displayed(&session_id, element).await
    }

    pub async fn text(&self, element: &WireElement) -> Result<String> {
        let session_id = self.session_id()?;
        self.wire.text(&session_id, element).await
    }

    pub async fn click(&self, element: &WireElement) -> Result<()> {
        let session_id = self.session_id()?;
        self.wire.click(&session_id, element).await
    }

    pub async fn clear(&self, element: &WireElement) -> Result<()> {
        let session_id = self.session_id()?;
        self.wire.clear(&session_id, element).await
    }

    pub async fn send_keys(&self, element: &WireElement, text: &str) -> Result<()> {
        let session_id = self.session_id()?;
        self.wire.send_keys(&session_id, element, text).await
    }
}
