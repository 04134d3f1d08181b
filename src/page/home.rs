//! Catalog (home) screen page object
//!
//! The app opens on the product catalog. Navigation to the login screen
//! and logout both go through the hamburger menu.

use std::sync::Arc;
use std::time::Duration;

use crate::page::locator::Locator;
use crate::page::resolver::{ElementHandle, ElementResolver};
use crate::session::Driver;
use crate::Result;

pub struct HomePage {
    resolver: ElementResolver,
    title: Locator,
    product_item: Locator,
    menu_button: Locator,
    menu_login_item: Locator,
    menu_logout_item: Locator,
    logout_confirm: Locator,
}

impl HomePage {
    pub fn new(driver: Arc<Driver>) -> Self {
        Self {
            resolver: ElementResolver::new(driver),
            title: Locator::xpath("//android.widget.TextView[@text='Products']"),
            product_item: Locator::accessibility_id("store item"),
            menu_button: Locator::accessibility_id("View menu"),
            menu_login_item: Locator::accessibility_id("menu item log in"),
            menu_logout_item: Locator::accessibility_id("menu item log out"),
            logout_confirm: Locator::xpath("//android.widget.Button[@text='LOG OUT']"),
        }
    }

    pub fn with_timeout(driver: Arc<Driver>, timeout: Duration) -> Self {
        let mut page = Self::new(driver.clone());
        page.resolver = ElementResolver::with_timeout(driver, timeout);
        page
    }

    /// Whether the catalog screen is shown
    pub async fn is_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.title).await
    }

    /// Catalog title text ("Products")
    pub async fn title_text(&self) -> Result<String> {
        self.resolver.text(&self.title).await
    }

    /// Whether any product tiles are on screen
    pub async fn products_displayed(&self) -> Result<bool> {
        Ok(self.resolver.count(&self.product_item).await? > 0)
    }

    /// Number of product tiles on screen
    pub async fn product_count(&self) -> Result<usize> {
        self.resolver.count(&self.product_item).await
    }

    /// Tap the product tile at `index` (server traversal order)
    pub async fn tap_product_at(&self, index: usize) -> Result<()> {
        let product: ElementHandle = self.resolver.item_at(&self.product_item, index).await?;
        product.click().await
    }

    /// Open the hamburger menu
    pub async fn open_menu(&self) -> Result<()> {
        self.resolver.click(&self.menu_button).await
    }

    /// Navigate to the login screen via the menu
    pub async fn navigate_to_login(&self) -> Result<()> {
        self.open_menu().await?;
        self.resolver.click(&self.menu_login_item).await
    }

    /// Log out via the menu and confirm the dialog
    pub async fn logout(&self) -> Result<()> {
        self.open_menu().await?;
        self.resolver.click(&self.menu_logout_item).await?;
        self.resolver.click(&self.logout_confirm).await
    }
}
