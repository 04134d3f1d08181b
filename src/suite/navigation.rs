//! Navigation suite (TC05-TC07)

use crate::page::{HomePage, LoginPage, ProductPage};
use crate::suite::{ensure, ensure_eq, Suite, SuiteCtx, TestCase};
use crate::Result;

pub fn suite() -> Suite {
    Suite {
        name: "navigation",
        cases: vec![
            TestCase {
                name: "tc05_home_page_displays_products",
                description: "TC05: Verify home page displays products after launch",
                body: |ctx| Box::pin(tc05_home_page_displays_products(ctx)),
            },
            TestCase {
                name: "tc06_navigate_to_product_detail",
                description: "TC06: Verify navigation to product detail page",
                body: |ctx| Box::pin(tc06_navigate_to_product_detail(ctx)),
            },
            TestCase {
                name: "tc07_logout_returns_to_home",
                description: "TC07: Verify logout navigates back to catalog",
                body: |ctx| Box::pin(tc07_logout_returns_to_home(ctx)),
            },
        ],
    }
}

async fn tc05_home_page_displays_products(ctx: SuiteCtx) -> Result<()> {
    let home = HomePage::new(ctx.driver.clone());

    ensure(
        home.is_displayed().await,
        "Product catalog page should be displayed on app launch",
    )?;
    ensure_eq(
        home.title_text().await?.as_str(),
        "Products",
        "Home page title should be 'Products'",
    )?;
    ensure(
        home.products_displayed().await?,
        "Products should be visible on the catalog page",
    )
}

async fn tc06_navigate_to_product_detail(ctx: SuiteCtx) -> Result<()> {
    let home = HomePage::new(ctx.driver.clone());
    let product = ProductPage::new(ctx.driver.clone());

    home.tap_product_at(0).await?;

    ensure(
        product.is_displayed().await,
        "Product detail page should be displayed after clicking a product",
    )?;
    let title = product.title().await?;
    ensure(!title.is_empty(), "Product title should not be empty")
}

async fn tc07_logout_returns_to_home(ctx: SuiteCtx) -> Result<()> {
    let home = HomePage::new(ctx.driver.clone());
    let login = LoginPage::new(ctx.driver.clone());

    // Login first
    home.navigate_to_login().await?;
    login
        .login(&ctx.config.valid_username, &ctx.config.valid_password)
        .await?;
    ensure(
        home.is_displayed().await,
        "Home page should be visible after login",
    )?;

    home.logout().await?;

    ensure(
        home.is_displayed().await,
        "Catalog should be displayed again after logout",
    )
}
