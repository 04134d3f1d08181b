//! HTTP wire client
//!
//! reqwest-based implementation of [`WireClient`] against a live Appium
//! server. Every call is bounded by the client-level request timeout, so
//! the harness never blocks indefinitely on the transport.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::wire::traits::WireClient;
use crate::wire::types::{
    Capabilities, FindElementRequest, NewSessionRequest, NewSessionValue, SendKeysRequest,
    Strategy, TimeoutsRequest, WireElement, WireError,
};
use crate::{Error, Result};

/// Request timeout applied to every wire call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the WebDriver wire protocol
pub struct HttpWireClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpWireClient {
    /// Create a client against the given Appium server URL
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Send a request and unwrap the W3C `value` envelope
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        } else {
            // Appium rejects POSTs without a body
            request = request.json(&serde_json::json!({}));
        }

        let response = request.send().await?;
        let status = response.status();
        let envelope: Value = response.json().await?;
        let value = envelope
            .get("value")
            .cloned()
            .ok_or_else(|| Error::wire_protocol("response missing 'value'"))?;

        if status != StatusCode::OK {
            if let Ok(wire_error) = serde_json::from_value::<WireError>(value.clone()) {
                return Err(wire_error.into_error());
            }
            return Err(Error::wire_protocol(format!(
                "HTTP {} from {}: {}",
                status, url, value
            )));
        }

        Ok(serde_json::from_value(value)?)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn post_empty(&self, path: &str) -> Result<()> {
        let _: Value = self.execute(Method::POST, path, None::<&()>).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::GET, path, None::<&()>).await
    }
}

#[async_trait]
impl WireClient for HttpWireClient {
    #[instrument(skip(self, capabilities))]
    async fn new_session(&self, capabilities: &Capabilities) -> Result<String> {
        let request = NewSessionRequest::new(capabilities.clone());
        let value: NewSessionValue = self
            .post("/session", &request)
            .await
            .map_err(|e| match e {
                // Transport failures during the handshake are fatal for the
                // suite; fold them into the session-start taxonomy.
                Error::Http(e) => Error::session_start(format!(
                    "cannot reach Appium server at {}: {}",
                    self.base_url, e
                )),
                Error::SessionStart(_) => e,
                other => Error::session_start(other.to_string()),
            })?;
        Ok(value.session_id)
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let path = format!("/session/{}", session_id);
        let _: Value = self.execute(Method::DELETE, &path, None::<&()>).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_implicit_wait(&self, session_id: &str, wait: Duration) -> Result<()> {
        let path = format!("/session/{}/timeouts", session_id);
        let body = TimeoutsRequest {
            implicit: wait.as_millis() as u64,
        };
        let _: Value = self.post(&path, &body).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_element(
        &self,
        session_id: &str,
        strategy: Strategy,
        value: &str,
    ) -> Result<WireElement> {
        let path = format!("/session/{}/element", session_id);
        let body = FindElementRequest {
            using: strategy.as_wire().to_string(),
            value: value.to_string(),
        };
        self.post(&path, &body).await
    }

    #[instrument(skip(self))]
    async fn find_elements(
        &self,
        session_id: &str,
        strategy: Strategy,
        value: &str,
    ) -> Result<Vec<WireElement>> {
        let path = format!("/session/{}/elements", session_id);
        let body = FindElementRequest {
            using: strategy.as_wire().to_string(),
            value: value.to_string(),
        };
        self.post(&path, &body).await
    }

    #[instrument(skip(self))]
    async fn is_displayed(&self, session_id: &str, element: &WireElement) -> Result<bool> {
        let path = format!(
            "/session/{}/element/{}/displayed",
            session_id, element.element_id
        );
        self.get(&path).await
    }

    #[instrument(skip(self))]
    async fn text(&self, session_id: &str, element: &WireElement) -> Result<String> {
        let path = format!("/session/{}/element/{}/text", session_id, element.element_id);
        self.get(&path).await
    }

    #[instrument(skip(self))]
    async fn click(&self, session_id: &str, element: &WireElement) -> Result<()> {
        let path = format!(
            "/session/{}/element/{}/click",
            session_id, element.element_id
        );
        self.post_empty(&path).await
    }

    #[instrument(skip(self))]
    async fn clear(&self, session_id: &str, element: &WireElement) -> Result<()> {
        let path = format!(
            "/session/{}/element/{}/clear",
            session_id, element.element_id
        );
        self.post_empty(&path).await
    }

    #[instrument(skip(self, text))]
    async fn send_keys(&self, session_id: &str, element: &WireElement, text: &str) -> Result<()> {
        let path = format!(
            "/session/{}/element/{}/value",
            session_id, element.element_id
        );
        let body = SendKeysRequest {
            text: text.to_string(),
        };
        let _: Value = self.post(&path, &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpWireClient::new("http://localhost:4723/").unwrap();
        assert_eq!(client.base_url, "http://localhost:4723");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_session_start_error() {
        // Port 1 on loopback refuses the connection immediately
        let client = HttpWireClient::new("http://127.0.0.1:1").unwrap();
        let capabilities = Capabilities {
            platform_name: "Android".to_string(),
            device_name: "emulator-5554".to_string(),
            app: "/opt/apps/demo.apk".to_string(),
            automation_name: "UiAutomator2".to_string(),
            no_reset: false,
        };

        let result = client.new_session(&capabilities).await;
        assert!(matches!(result, Err(Error::SessionStart(_))));
    }
}
