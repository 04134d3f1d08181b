//! Product-detail screen page object

use std::sync::Arc;
use std::time::Duration;

use crate::page::locator::Locator;
use crate::page::resolver::ElementResolver;
use crate::session::Driver;
use crate::Result;

pub struct ProductPage {
    resolver: ElementResolver,
    title: Locator,
    price: Locator,
    add_to_cart_button: Locator,
    cart_badge: Locator,
    back_button: Locator,
}

impl ProductPage {
    pub fn new(driver: Arc<Driver>) -> Self {
        Self {
            resolver: ElementResolver::new(driver),
            title: Locator::accessibility_id("container header"),
            price: Locator::accessibility_id("product price"),
            add_to_cart_button: Locator::accessibility_id("Add To Cart button"),
            cart_badge: Locator::accessibility_id("cart badge"),
            back_button: Locator::accessibility_id("Navigate up"),
        }
    }

    pub fn with_timeout(driver: Arc<Driver>, timeout: Duration) -> Self {
        let mut page = Self::new(driver.clone());
        page.resolver = ElementResolver::with_timeout(driver, timeout);
        page
    }

    /// Whether the product detail screen is shown
    pub async fn is_displayed(&self) -> bool {
        self.resolver.is_displayed(&self.title).await
    }

    /// Product title text
    pub async fn title(&self) -> Result<String> {
        self.resolver.text(&self.title).await
    }

    /// Product price text (e.g. "$ 29.99")
    pub async fn price(&self) -> Result<String> {
        self.resolver.text(&self.price).await
    }

    /// Tap the Add To Cart button
    pub async fn tap_add_to_cart(&self) -> Result<()> {
        self.resolver.click(&self.add_to_cart_button).await
    }

    /// Open the cart via the badge
    pub async fn go_to_cart(&self) -> Result<()> {
        self.resolver.click(&self.cart_badge).await
    }

    /// Navigate back to the catalog
    pub async fn tap_back(&self) -> Result<()> {
        self.resolver.click(&self.back_button).await
    }
}
