//! Login screen page object
//!
//! Locator table uses the accessibility-id family for form controls and
//! xpath for the validation messages, matching the app's accessibility
//! tree.

use std::sync::Arc;
use std::time::Duration;

use crate::page::locator::Locator;
use crate::page::resolver::ElementResolver;
use crate::session::Driver;
use crate::Result;

pub struct LoginPage {
    resolver: ElementResolver,
    username_field: Locator,
    password_field: Locator,
    login_button: Locator,
    error_message: Locator,
    username_required_error: Locator,
    password_required_error: Locator,
}

impl LoginPage {
    pub fn new(driver: Arc<Driver>) -> Self {
        Self {
            resolver: ElementResolver::new(driver),
            username_field: Locator::accessibility_id("Username input field"),
            password_field: Locator::accessibility_id("Password input field"),
            login_button: Locator::accessibility_id("Login button"),
            error_message: Locator::xpath(
                "//android.widget.TextView[contains(@text,'provided credentials')]",
            ),
            username_required_error: Locator::xpath(
                "//android.widget.TextView[contains(@text,'Username is required')]",
            ),
            password_required_error: Locator::xpath(
                "//android.widget.TextView[contains(@text,'Password is required')]",
            ),
        }
    }

    /// Override the visibility-wait timeout for this screen
    pub fn with_timeout(driver: Arc<Driver>, timeout: Duration) -> Self {
        let mut page = Self::new(driver.clone());
        page.resolver = ElementResolver::with_timeout(driver, timeout);
        page
    }

    /// Enter the username, replacing any existing content
    pub async fn enter_username(&self, username: &str) -> Result<()> {
        self.resolver.send_keys(&self.username_field, username).await
    }

    /// Enter the password, replacing any existing content
    pub async fn enter_password(&self, password: &str) -> Result<()> {
        self.resolver.send_keys(&self.password_field, password).await
    }

    /// Tap the login button
    pub async fn tap_login(&self) -> Result<()> {
        self.resolver.click(&self.login_button).await
    }

    /// Full login flow with the given credentials
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.tap_login().await
    }

    /// Whether the generic credentials error is shown
    pub async fn is_error_message_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.error_message).await
    }

    /// Text of the credentials error message
    pub async fn error_message_text(&self) -> Result<String> {
        self.resolver.text(&self.error_message).await
    }

    /// Whether the "Username is required" validation is shown
    pub async fn is_username_required_error_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.username_required_error).await
    }

    /// Whether the "Password is required" validation is shown
    pub async fn is_password_required_error_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.password_required_error).await
    }

    pub async fn is_login_button_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.login_button).await
    }

    pub async fn is_username_field_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.username_field).await
    }
}
