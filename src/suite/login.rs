//! Login suite (TC01-TC04)
//!
//! The app opens on the catalog, so every case first navigates to the
//! login screen through the menu.

use crate::page::{HomePage, LoginPage};
use crate::suite::{ensure, ensure_eq, Suite, SuiteCtx, TestCase};
use crate::Result;

pub fn suite() -> Suite {
    Suite {
        name: "login",
        cases: vec![
            TestCase {
                name: "tc01_login_page_displayed",
                description: "TC01: Verify login page UI elements are displayed",
                body: |ctx| Box::pin(tc01_login_page_displayed(ctx)),
            },
            TestCase {
                name: "tc02_successful_login",
                description: "TC02: Verify successful login with valid credentials",
                body: |ctx| Box::pin(tc02_successful_login(ctx)),
            },
            TestCase {
                name: "tc03_invalid_password_shows_error",
                description: "TC03: Verify error message for invalid password",
                body: |ctx| Box::pin(tc03_invalid_password_shows_error(ctx)),
            },
            TestCase {
                name: "tc04_empty_credentials_show_error",
                description: "TC04: Verify error when submitting empty credentials",
                body: |ctx| Box::pin(tc04_empty_credentials_show_error(ctx)),
            },
        ],
    }
}

async fn open_login_screen(ctx: &SuiteCtx) -> Result<(LoginPage, HomePage)> {
    let home = HomePage::new(ctx.driver.clone());
    home.navigate_to_login().await?;
    Ok((LoginPage::new(ctx.driver.clone()), home))
}

async fn tc01_login_page_displayed(ctx: SuiteCtx) -> Result<()> {
    let (login, _) = open_login_screen(&ctx).await?;

    ensure(
        login.is_username_field_displayed().await,
        "Username field should be visible on login page",
    )?;
    ensure(
        login.is_login_button_displayed().await,
        "Login button should be visible on login page",
    )
}

async fn tc02_successful_login(ctx: SuiteCtx) -> Result<()> {
    let (login, home) = open_login_screen(&ctx).await?;

    login
        .login(&ctx.config.valid_username, &ctx.config.valid_password)
        .await?;

    ensure(
        home.is_displayed().await,
        "Home/Products page should appear after successful login",
    )?;
    ensure_eq(
        home.title_text().await?.as_str(),
        "Products",
        "Home page title should be 'Products'",
    )
}

async fn tc03_invalid_password_shows_error(ctx: SuiteCtx) -> Result<()> {
    let (login, _) = open_login_screen(&ctx).await?;

    login
        .login(&ctx.config.valid_username, &ctx.config.invalid_password)
        .await?;

    ensure(
        login.is_error_message_displayed().await,
        "Error message should be displayed for incorrect password",
    )?;
    let error_text = login.error_message_text().await?;
    ensure(!error_text.is_empty(), "Error message text should not be empty")
}

async fn tc04_empty_credentials_show_error(ctx: SuiteCtx) -> Result<()> {
    let (login, _) = open_login_screen(&ctx).await?;

    login.tap_login().await?;

    ensure(
        login.is_username_required_error_displayed().await,
        "Username required error should appear for empty username",
    )
}
