//! Locators
//!
//! An immutable `(strategy, value)` pair identifying zero or more elements
//! on the current screen. Declared once per page object and stable for the
//! object's lifetime.

use std::fmt;

pub use crate::wire::types::Strategy;

/// Immutable element locator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    pub strategy: Strategy,
    pub value: String,
}

impl Locator {
    pub fn new(strategy: Strategy, value: &str) -> Self {
        Self {
            strategy,
            value: value.to_string(),
        }
    }

    /// Accessibility id (content-description) locator
    pub fn accessibility_id(value: &str) -> Self {
        Self::new(Strategy::AccessibilityId, value)
    }

    /// XPath locator
    pub fn xpath(value: &str) -> Self {
        Self::new(Strategy::Xpath, value)
    }

    /// Native resource-id locator
    pub fn id(value: &str) -> Self {
        Self::new(Strategy::Id, value)
    }

    /// Widget class-name locator
    pub fn class_name(value: &str) -> Self {
        Self::new(Strategy::ClassName, value)
    }

    /// UiAutomator selector-expression locator
    pub fn ui_automator(value: &str) -> Self {
        Self::new(Strategy::UiAutomator, value)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}='{}'", self.strategy, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_constructors() {
        let locator = Locator::accessibility_id("Login button");
        assert_eq!(locator.strategy, Strategy::AccessibilityId);
        assert_eq!(locator.value, "Login button");

        let locator = Locator::id("com.demo:id/search_input");
        assert_eq!(locator.strategy, Strategy::Id);

        let locator = Locator::ui_automator("new UiSelector().textContains(\"Cart\")");
        assert_eq!(locator.strategy, Strategy::UiAutomator);
        assert_eq!(locator.strategy.as_wire(), "-android uiautomator");
    }

    #[test]
    fn test_display() {
        let locator = Locator::xpath("//android.widget.TextView[@text='My Cart']");
        assert_eq!(
            locator.to_string(),
            "xpath='//android.widget.TextView[@text='My Cart']'"
        );
    }
}
