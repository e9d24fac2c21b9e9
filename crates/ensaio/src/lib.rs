//! Ensaio: WebDriver UI test-automation framework.
//!
//! Ensaio (Portuguese: "rehearsal") lets testers write page objects and
//! Gherkin step definitions that drive a real browser (Chrome, Firefox,
//! Edge or Opera, locally or through a Selenium Grid) with built-in
//! waiting, centralized error classification, and automatic screenshot
//! evidence on scenario completion.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  steps / page objects                                        │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  Interactions (facade: click / write / wait / read / ...)    │
//! │        │            │                                        │
//! │        ▼            ▼                                        │
//! │  Session<B>    error classifier ──► ERRO / MASSA / DICAS     │
//! │        │                              failure banner         │
//! │        ▼                                                     │
//! │  Backend trait ──► WebDriverBackend (thirtyfour)             │
//! │                └─► MockBackend (unit tests)                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every facade operation follows one template: log intent, perform a
//! single driver operation, and on failure funnel the classified error,
//! together with the caller's element label and the captured scenario
//! source line, into a single [`EnsaioError`] carrying the fixed
//! failure banner.
//!
//! # Example
//!
//! ```no_run
//! use ensaio::prelude::*;
//!
//! # async fn run() -> EnsaioResult<()> {
//! let config = Config::from_env();
//! let mut session: Session<WebDriverBackend> = Session::new(config);
//! let mut ui = Interactions::new(&mut session);
//!
//! ui.goto("https://www.saucedemo.com").await?;
//! ui.write(&Locator::xpath("//input[@id='user-name']"), "standard_user", "inputUsername").await?;
//! ui.click(&Locator::xpath("//input[@id='login-button']"), "btnLogin").await?;
//! session.kill().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod evidence;
pub mod hooks;
pub mod interactions;
pub mod locator;
pub mod page;
pub mod session;
pub mod wait;
pub mod webdriver;

pub use backend::{Backend, MockBackend};
pub use config::{BrowserKind, Config};
pub use context::ScenarioContext;
pub use error::{DriverError, EnsaioError, EnsaioResult, ErrorKind};
pub use evidence::Outcome;
pub use interactions::Interactions;
pub use locator::{Locator, Strategy};
pub use page::PageObject;
pub use session::Session;
pub use wait::WaitOptions;
pub use webdriver::WebDriverBackend;

/// Convenience re-exports for test suites.
pub mod prelude {
    pub use crate::backend::Backend;
    pub use crate::config::{BrowserKind, Config};
    pub use crate::context::ScenarioContext;
    pub use crate::error::{EnsaioError, EnsaioResult, ErrorKind};
    pub use crate::interactions::Interactions;
    pub use crate::locator::Locator;
    pub use crate::page::PageObject;
    pub use crate::session::Session;
    pub use crate::wait::WaitOptions;
    pub use crate::webdriver::WebDriverBackend;
}
