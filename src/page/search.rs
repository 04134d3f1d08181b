//! Search screen page object
//!
//! This screen's locator table uses the resource-id family rather than
//! accessibility ids; the strategy choice is per screen, not global.

use std::sync::Arc;
use std::time::Duration;

use crate::page::locator::Locator;
use crate::page::resolver::ElementResolver;
use crate::session::Driver;
use crate::Result;

pub struct SearchPage {
    resolver: ElementResolver,
    search_input: Locator,
    search_submit: Locator,
    search_results: Locator,
    no_results_text: Locator,
}

impl SearchPage {
    pub fn new(driver: Arc<Driver>) -> Self {
        Self {
            resolver: ElementResolver::new(driver),
            search_input: Locator::id("com.saucelabs.mydemoapp.android:id/searchET"),
            search_submit: Locator::id("com.saucelabs.mydemoapp.android:id/searchIV"),
            search_results: Locator::id("com.saucelabs.mydemoapp.android:id/productRV"),
            no_results_text: Locator::id("com.saucelabs.mydemoapp.android:id/noResultsTV"),
        }
    }

    pub fn with_timeout(driver: Arc<Driver>, timeout: Duration) -> Self {
        let mut page = Self::new(driver.clone());
        page.resolver = ElementResolver::with_timeout(driver, timeout);
        page
    }

    /// Type the search query, replacing any existing content
    pub async fn enter_query(&self, query: &str) -> Result<()> {
        self.resolver.send_keys(&self.search_input, query).await
    }

    /// Tap the search button
    pub async fn tap_search(&self) -> Result<()> {
        self.resolver.click(&self.search_submit).await
    }

    /// Full search flow
    pub async fn search_for(&self, query: &str) -> Result<()> {
        self.enter_query(query).await?;
        self.tap_search().await
    }

    /// Whether the results list is shown
    pub async fn results_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.search_results).await
    }

    /// Whether the no-results message is shown
    pub async fn no_results_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.no_results_text).await
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

    #[tokio::test]
    async fn test_search_flow() {
        let mock = Arc::new(MockWireClient::new());
        let driver = Arc::new(Driver::new(mock.clone()));
        driver.open(&test_config()).await.unwrap();
        let input = mock.install(ScriptedElement::visible(
            Strategy::Id,
            "com.saucelabs.mydemoapp.android:id/searchET",
            "",
        ));
        let submit = mock.install(ScriptedElement::visible(
            Strategy::Id,
            "com.saucelabs.mydemoapp.android:id/searchIV",
            "",
        ));
        mock.install(ScriptedElement::visible(
            Strategy::Id,
            "com.saucelabs.mydemoapp.android:id/productRV",
            "",
        ));

        let page = SearchPage::with_timeout(driver, Duration::from_millis(300));
        page.search_for("backpack").await.unwrap();

        assert_eq!(mock.keyed_text(&input).unwrap(), "backpack");
        assert_eq!(mock.clicks(), vec![submit]);
        assert!(page.results_displayed().await);
        assert!(!page.no_results_displayed().await);
    }
}
