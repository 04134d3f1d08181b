//! Explicit-wait element resolution
//!
//! The one reusable wait discipline every page object goes through instead
//! of re-implementing polling per screen. Two tiers:
//!
//! - **Presence queries** ([`is_displayed`]) absorb timeouts and resolution
//!   errors into `false`, because "X is NOT shown" is a routinely asserted
//!   outcome. This is the only place errors are intentionally swallowed;
//!   do not change it to propagate.
//! - **Value queries and actions** ([`text`], [`click`], [`send_keys`])
//!   surface failures, because a missing element there is a genuine defect
//!   in the flow under test.
//!
//! [`is_displayed`]: ElementResolver::is_displayed
//! [`text`]: ElementResolver::text
//! [`click`]: ElementResolver::click
//! [`send_keys`]: ElementResolver::send_keys

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::page::locator::Locator;
use crate::session::Driver;
use crate::wire::types::WireElement;
use crate::{Error, Result};

/// Default bounded wait for visibility queries
pub const DEFAULT_WAIT: Duration = Duration::from_secs(10);

/// Poll interval inside the visibility wait loop
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Shared explicit-wait protocol over a live session
#[derive(Clone)]
pub struct ElementResolver {
    driver: Arc<Driver>,
    timeout: Duration,
}

impl ElementResolver {
    /// Create a resolver with the default visibility timeout
    pub fn new(driver: Arc<Driver>) -> Self {
        Self::with_timeout(driver, DEFAULT_WAIT)
    }

    /// Create a resolver with a page-specific visibility timeout
    pub fn with_timeout(driver: Arc<Driver>, timeout: Duration) -> Self {
        Self { driver, timeout }
    }

    pub fn driver(&self) -> &Arc<Driver> {
        &self.driver
    }

    /// Wait, bounded by the configured timeout, for a visible element
    /// matching the locator.
    ///
    /// Resolution errors during the wait (not yet present, momentarily
    /// stale, hidden) are grounds for another poll, not failure; only wait
    /// expiry fails, and only after the full timeout has elapsed.
    async fn wait_for_visible(&self, locator: &Locator) -> Result<WireElement> {
        let start = Instant::now();
        loop {
            match self.driver.find_element(locator.strategy, &locator.value).await {
                Ok(element) => match self.driver.is_displayed(&element).await {
                    Ok(true) => return Ok(element),
                    Ok(false) | Err(Error::StaleElement(_)) => {}
                    Err(e) => return Err(e),
                },
                Err(Error::ElementNotFound(_)) | Err(Error::StaleElement(_)) => {}
                Err(e) => return Err(e),
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                return Err(Error::element_not_found(format!(
                    "no visible element {} within {:?}",
                    locator, self.timeout
                )));
            }
            let remaining = self.timeout - elapsed;
            tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
        }
    }

    /// Presence query: whether a visible match appears within the timeout.
    ///
    /// Never returns an error; timeout and every resolution failure fold
    /// into `false`.
    #[instrument(skip(self))]
    pub async fn is_displayed(&self, locator: &Locator) -> bool {
        match self.wait_for_visible(locator).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Presence check negative for {}: {}", locator, e);
                false
            }
        }
    }

    /// Value query: wait for visibility, then read the element's text.
    ///
    /// Wait expiry is an `ElementNotFound` error here; callers of `text`
    /// expect the element to exist.
    #[instrument(skip(self))]
    pub async fn text(&self, locator: &Locator) -> Result<String> {
        let element = self.wait_for_visible(locator).await?;
        self.driver.text(&element).await
    }

    /// Action: resolve via the session-level implicit wait and click.
    #[instrument(skip(self))]
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.resolve(locator).await?;
        self.driver.click(&element).await
    }

    /// Action: resolve, clear existing content, then type the text.
    #[instrument(skip(self, text))]
    pub async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.resolve(locator).await?;
        self.driver.clear(&element).await?;
        self.driver.send_keys(&element, text).await
    }

    /// Collection query: number of elements matching the locator, in the
    /// server's native traversal order.
    #[instrument(skip(self))]
    pub async fn count(&self, locator: &Locator) -> Result<usize> {
        let elements = self
            .driver
            .find_elements(locator.strategy, &locator.value)
            .await?;
        Ok(elements.len())
    }

    /// Collection query: handle to the match at `index`.
    #[instrument(skip(self))]
    pub async fn item_at(&self, locator: &Locator, index: usize) -> Result<ElementHandle> {
        let elements = self
            .driver
            .find_elements(locator.strategy, &locator.value)
            .await?;
        let len = elements.len();
        let element = elements
            .into_iter()
            .nth(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        Ok(ElementHandle {
            driver: self.driver.clone(),
            element,
        })
    }

    /// Single resolution through the implicit session wait, no secondary
    /// wait layer
    async fn resolve(&self, locator: &Locator) -> Result<WireElement> {
        self.driver
            .find_element(locator.strategy, &locator.value)
            .await
            .map_err(|e| match e {
                Error::ElementNotFound(_) => {
                    Error::element_not_found(format!("{} not resolvable", locator))
                }
                other => other,
            })
    }
}

/// Ephemeral reference to one resolved element
///
/// Valid only until the underlying UI changes; never cache one across
/// queries.
pub struct ElementHandle {
    driver: Arc<Driver>,
    element: WireElement,
}

impl ElementHandle {
    pub fn element_id(&self) -> &str {
        &self.element.element_id
    }

    pub async fn text(&self) -> Result<String> {
        self.driver.text(&self.element).await
    }

    pub async fn click(&self) -> Result<()> {
        self.driver.click(&self.element).await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.driver.is_displayed(&self.element).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::wire::types::Strategy;
    use crate::wire::{MockWireClient, ScriptedElement};

    fn test_config() -> Config {
        toml::from_str(
            r#"
server_url = "http://127.0.0.1:4723"
platform_name = "Android"
device_name = "emulator-5554"
app_path = "apps/demo-app.apk"
automation_name = "UiAutomator2"
implicit_wait = 5
valid_username = "bob@example.com"
valid_password = "10203040"
invalid_password = "wrongpass"
"#,
        )
        .unwrap()
    }

    async fn live_resolver(mock: &Arc<MockWireClient>, timeout: Duration) -> ElementResolver {
        let driver = Arc::new(Driver::new(mock.clone()));
        driver.open(&test_config()).await.unwrap();
        ElementResolver::with_timeout(driver, timeout)
    }

    #[tokio::test]
    async fn test_is_displayed_true_for_visible_element() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;
        mock.install(ScriptedElement::visible(
            Strategy::AccessibilityId,
            "Login button",
            "LOGIN",
        ));

        assert!(resolver
            .is_displayed(&Locator::accessibility_id("Login button"))
            .await);
    }

    #[tokio::test]
    async fn test_is_displayed_false_for_absent_element_never_errors() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_millis(300)).await;

        let start = Instant::now();
        let displayed = resolver
            .is_displayed(&Locator::accessibility_id("No such element"))
            .await;
        let elapsed = start.elapsed();

        assert!(!displayed);
        // Bounded wait: full timeout honored, plus a small epsilon at most
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_is_displayed_false_for_hidden_element() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_millis(300)).await;
        mock.install(ScriptedElement::hidden(
            Strategy::Xpath,
            "//android.widget.TextView[@text='hidden']",
        ));

        assert!(
            !resolver
                .is_displayed(&Locator::xpath("//android.widget.TextView[@text='hidden']"))
                .await
        );
    }

    #[tokio::test]
    async fn test_is_displayed_waits_for_late_element() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(2)).await;
        mock.install(
            ScriptedElement::visible(Strategy::AccessibilityId, "Late banner", "hello")
                .appearing_after(Duration::from_millis(400)),
        );

        assert!(resolver
            .is_displayed(&Locator::accessibility_id("Late banner"))
            .await);
    }

    #[tokio::test]
    async fn test_text_of_visible_element() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;
        mock.install(ScriptedElement::visible(
            Strategy::Xpath,
            "//android.widget.TextView[@text='My Cart']",
            "My Cart",
        ));

        let text = resolver
            .text(&Locator::xpath("//android.widget.TextView[@text='My Cart']"))
            .await
            .unwrap();
        assert_eq!(text, "My Cart");
    }

    #[tokio::test]
    async fn test_text_of_absent_element_errors_after_full_timeout() {
        let mock = Arc::new(MockWireClient::new());
        let timeout = Duration::from_millis(400);
        let resolver = live_resolver(&mock, timeout).await;

        let start = Instant::now();
        let result = resolver.text(&Locator::accessibility_id("Ghost")).await;
        let elapsed = start.elapsed();

        assert!(matches!(result, Err(Error::ElementNotFound(_))));
        // Not immediately: at least the full timeout passes first
        assert!(elapsed >= timeout);
    }

    #[tokio::test]
    async fn test_click_resolves_once_without_secondary_wait() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;
        let id = mock.install(ScriptedElement::visible(
            Strategy::AccessibilityId,
            "Login button",
            "LOGIN",
        ));

        resolver
            .click(&Locator::accessibility_id("Login button"))
            .await
            .unwrap();
        assert_eq!(mock.clicks(), vec![id]);
    }

    #[tokio::test]
    async fn test_click_absent_element_is_element_not_found() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;

        let result = resolver.click(&Locator::accessibility_id("Ghost")).await;
        assert!(matches!(result, Err(Error::ElementNotFound(_))));
    }

    #[tokio::test]
    async fn test_send_keys_clears_first() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;
        let id = mock.install(ScriptedElement::visible(
            Strategy::AccessibilityId,
            "Username input field",
            "",
        ));

        let locator = Locator::accessibility_id("Username input field");
        resolver.send_keys(&locator, "stale text").await.unwrap();
        resolver.send_keys(&locator, "bob@example.com").await.unwrap();

        // Second send_keys replaced, not appended
        assert_eq!(mock.keyed_text(&id).unwrap(), "bob@example.com");
    }

    #[tokio::test]
    async fn test_count_and_item_at() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;
        mock.install(ScriptedElement::visible(
            Strategy::ClassName,
            "android.widget.TextView",
            "Sauce Labs Backpack",
        ));
        mock.install(ScriptedElement::visible(
            Strategy::ClassName,
            "android.widget.TextView",
            "Sauce Labs Bike Light",
        ));

        let locator = Locator::class_name("android.widget.TextView");
        assert_eq!(resolver.count(&locator).await.unwrap(), 2);

        let first = resolver.item_at(&locator, 0).await.unwrap();
        assert_eq!(first.text().await.unwrap(), "Sauce Labs Backpack");
        let second = resolver.item_at(&locator, 1).await.unwrap();
        assert_eq!(second.text().await.unwrap(), "Sauce Labs Bike Light");
    }

    #[tokio::test]
    async fn test_item_at_one_past_end_is_out_of_range() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;
        mock.install(ScriptedElement::visible(
            Strategy::ClassName,
            "android.widget.TextView",
            "only",
        ));

        let locator = Locator::class_name("android.widget.TextView");
        let count = resolver.count(&locator).await.unwrap();
        let result = resolver.item_at(&locator, count).await;
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[tokio::test]
    async fn test_item_at_on_empty_match_is_out_of_range() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;

        let locator = Locator::class_name("android.widget.ImageView");
        let result = resolver.item_at(&locator, 0).await;
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[tokio::test]
    async fn test_stale_element_surfaces_from_action() {
        let mock = Arc::new(MockWireClient::new());
        let resolver = live_resolver(&mock, Duration::from_secs(1)).await;
        let id = mock.install(ScriptedElement::visible(
            Strategy::AccessibilityId,
            "remove item",
            "",
        ));

        let handle = resolver
            .item_at(&Locator::accessibility_id("remove item"), 0)
            .await
            .unwrap();
        mock.remove(&id);

        let result = handle.click().await;
        assert!(matches!(result, Err(Error::StaleElement(_))));
    }
}
