//! Page-object layer
//!
//! Every screen is a page object over the shared [`ElementResolver`], the
//! one place the explicit-wait protocol is implemented. Page objects hold
//! no state beyond their driver handle and locator table; elements are
//! resolved lazily per call because the underlying UI mutates between
//! calls.
//!
//! ## Module structure
//! - `locator`: locator strategies and the `(strategy, value)` pair
//! - `resolver`: the two-tier explicit-wait protocol
//! - one module per screen: `login`, `home`, `product`, `cart`, `search`

pub mod locator;
pub mod resolver;

pub mod login;
pub mod home;
pub mod product;
pub mod cart;
pub mod search;

pub use locator::Locator;
pub use resolver::{ElementHandle, ElementResolver};

pub use login::LoginPage;
pub use home::HomePage;
pub use product::ProductPage;
pub use cart::CartPage;
pub use search::SearchPage;
