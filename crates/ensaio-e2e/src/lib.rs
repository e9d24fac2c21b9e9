//! Page objects for the demonstration suite.
//!
//! Targets the public SauceDemo shop (<https://www.saucedemo.com>).
//! Each page owns its locator table; the step definitions only ever go
//! through these and the `ensaio` facade.

#![warn(missing_docs)]

use ensaio::{Locator, PageObject};

/// Base URL of the shop under test.
pub const SHOP_URL: &str = "https://www.saucedemo.com";

/// Sign-in screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginPage;

impl LoginPage {
    /// Username input.
    #[must_use]
    pub fn username(&self) -> Locator {
        Locator::xpath("//input[@id='user-name']")
    }

    /// Password input.
    #[must_use]
    pub fn password(&self) -> Locator {
        Locator::xpath("//input[@id='password']")
    }

    /// Submit button.
    #[must_use]
    pub fn login_button(&self) -> Locator {
        Locator::xpath("//input[@id='login-button']")
    }
}

impl PageObject for LoginPage {
    fn name(&self) -> &'static str {
        "página de login"
    }

    fn anchor(&self) -> Locator {
        Locator::xpath("//div[@class='login_logo']")
    }

    fn anchor_text(&self) -> &str {
        "Swag Labs"
    }
}

/// Product listing shown after login.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryPage;

impl InventoryPage {
    /// Name link of the first listed product.
    #[must_use]
    pub fn first_product_name(&self) -> Locator {
        Locator::xpath("//div[@class='inventory_item_name']")
    }

    /// Price tag of the first listed product.
    #[must_use]
    pub fn first_product_price(&self) -> Locator {
        Locator::xpath("//div[@class='inventory_item_price']")
    }

    /// Add-to-cart button of the backpack product.
    #[must_use]
    pub fn add_to_cart(&self) -> Locator {
        Locator::id("add-to-cart-sauce-labs-backpack")
    }

    /// Cart icon in the header.
    #[must_use]
    pub fn cart(&self) -> Locator {
        Locator::css("a.shopping_cart_link")
    }
}

impl PageObject for InventoryPage {
    fn name(&self) -> &'static str {
        "página de produtos"
    }

    fn anchor(&self) -> Locator {
        Locator::css("span.title")
    }

    fn anchor_text(&self) -> &str {
        "Products"
    }
}

/// Cart and checkout flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutPage;

impl CheckoutPage {
    /// Checkout button on the cart page.
    #[must_use]
    pub fn checkout(&self) -> Locator {
        Locator::xpath("//button[@id='checkout']")
    }

    /// First-name field of the checkout form.
    #[must_use]
    pub fn first_name(&self) -> Locator {
        Locator::id("first-name")
    }

    /// Last-name field of the checkout form.
    #[must_use]
    pub fn last_name(&self) -> Locator {
        Locator::id("last-name")
    }

    /// Postal-code field of the checkout form.
    #[must_use]
    pub fn postal_code(&self) -> Locator {
        Locator::id("postal-code")
    }

    /// Continue button of the checkout form.
    #[must_use]
    pub fn cont(&self) -> Locator {
        Locator::id("continue")
    }

    /// Finish button on the overview page.
    #[must_use]
    pub fn finish(&self) -> Locator {
        Locator::id("finish")
    }
}

impl PageObject for CheckoutPage {
    fn name(&self) -> &'static str {
        "página de checkout"
    }

    fn anchor(&self) -> Locator {
        Locator::css("span.title")
    }

    fn anchor_text(&self) -> &str {
        "Checkout"
    }
}

/// Order-confirmation screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletePage;

impl PageObject for CompletePage {
    fn name(&self) -> &'static str {
        "página de conclusão"
    }

    fn anchor(&self) -> Locator {
        Locator::xpath("//h2[@class='complete-header']")
    }

    fn anchor_text(&self) -> &str {
        "THANK YOU FOR YOUR ORDER"
    }
}
