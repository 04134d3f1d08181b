//! Cart and product feature suite (TC08-TC10)

use crate::page::{CartPage, HomePage, ProductPage};
use crate::suite::{ensure, Suite, SuiteCtx, TestCase};
use crate::Result;

pub fn suite() -> Suite {
    Suite {
        name: "features",
        cases: vec![
            TestCase {
                name: "tc08_add_product_to_cart",
                description: "TC08: Verify adding a product to cart",
                body: |ctx| Box::pin(tc08_add_product_to_cart(ctx)),
            },
            TestCase {
                name: "tc09_product_detail_shows_info",
                description: "TC09: Verify product detail displays title and price",
                body: |ctx| Box::pin(tc09_product_detail_shows_info(ctx)),
            },
            TestCase {
                name: "tc10_back_from_detail_returns_to_catalog",
                description: "TC10: Verify back navigation from product detail",
                body: |ctx| Box::pin(tc10_back_from_detail_returns_to_catalog(ctx)),
            },
        ],
    }
}

async fn tc08_add_product_to_cart(ctx: SuiteCtx) -> Result<()> {
    let home = HomePage::new(ctx.driver.clone());
    let product = ProductPage::new(ctx.driver.clone());
    let cart = CartPage::new(ctx.driver.clone());

    home.tap_product_at(0).await?;
    ensure(
        product.is_displayed().await,
        "Product detail page should be displayed",
    )?;

    product.tap_add_to_cart().await?;
    product.go_to_cart().await?;

    ensure(cart.is_displayed().await, "Cart page should be displayed")?;
    ensure(
        cart.is_checkout_button_displayed().await,
        "Checkout button should be visible indicating items in cart",
    )
}

async fn tc09_product_detail_shows_info(ctx: SuiteCtx) -> Result<()> {
    let home = HomePage::new(ctx.driver.clone());
    let product = ProductPage::new(ctx.driver.clone());

    home.tap_product_at(0).await?;
    ensure(
        product.is_displayed().await,
        "Product detail page should load",
    )?;

    let title = product.title().await?;
    ensure(!title.is_empty(), "Product title should not be empty")?;

    let price = product.price().await?;
    ensure(
        price.contains('$'),
        "Product price should contain '$' symbol",
    )
}

async fn tc10_back_from_detail_returns_to_catalog(ctx: SuiteCtx) -> Result<()> {
    let home = HomePage::new(ctx.driver.clone());
    let product = ProductPage::new(ctx.driver.clone());

    home.tap_product_at(0).await?;
    ensure(
        product.is_displayed().await,
        "Product detail page should be displayed",
    )?;

    product.tap_back().await?;

    ensure(
        home.is_displayed().await,
        "Catalog should be displayed after navigating back",
    )
}
