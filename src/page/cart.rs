//! Cart screen page object
//!
//! Covers cart display, item removal and the checkout entry point.

use std::sync::Arc;
use std::time::Duration;

use crate::page::locator::Locator;
use crate::page::resolver::ElementResolver;
use crate::session::Driver;
use crate::Result;

pub struct CartPage {
    resolver: ElementResolver,
    title: Locator,
    checkout_button: Locator,
    remove_item_button: Locator,
    no_items_text: Locator,
    total_price: Locator,
    back_button: Locator,
}

impl CartPage {
    pub fn new(driver: Arc<Driver>) -> Self {
        Self {
            resolver: ElementResolver::new(driver),
            title: Locator::xpath("//android.widget.TextView[@text='My Cart']"),
            checkout_button: Locator::accessibility_id("Proceed To Checkout button"),
            remove_item_button: Locator::accessibility_id("remove item"),
            no_items_text: Locator::xpath("//android.widget.TextView[@text='No Items']"),
            total_price: Locator::accessibility_id("total price"),
            back_button: Locator::accessibility_id("Go back"),
        }
    }

    pub fn with_timeout(driver: Arc<Driver>, timeout: Duration) -> Self {
        let mut page = Self::new(driver.clone());
        page.resolver = ElementResolver::with_timeout(driver, timeout);
        page
    }

    /// Whether the cart screen is shown
    pub async fn is_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.title).await
    }

    /// Cart title text
    pub async fn title_text(&self) -> Result<String> {
        self.resolver.text(&self.title).await
    }

    /// Tap the Proceed To Checkout button
    pub async fn tap_checkout(&self) -> Result<()> {
        self.resolver.click(&self.checkout_button).await
    }

    /// Remove an item from the cart
    pub async fn remove_item(&self) -> Result<()> {
        self.resolver.click(&self.remove_item_button).await
    }

    /// Whether the cart shows the empty state
    pub async fn is_empty(&self) -> bool {
        self.resolver.is_displayed(&self.no_items_text).await
    }

    /// Total price text
    pub async fn total_price(&self) -> Result<String> {
        self.resolver.text(&self.total_price).await
    }

    /// Navigate back from the cart
    pub async fn tap_back(&self) -> Result<()> {
        self.resolver.click(&self.back_button).await
    }

    /// Whether the checkout button is shown (items exist)
    pub async fn is_checkout_button_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.checkout_button).await
    }
}
