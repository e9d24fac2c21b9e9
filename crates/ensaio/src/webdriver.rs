//! WebDriver-backed [`Backend`] implementation.
//!
//! Talks to a local driver binary (chromedriver, geckodriver,
//! msedgedriver, operadriver) or a Selenium Grid hub through the
//! `thirtyfour` client. Every protocol error is classified into a
//! [`DriverError`] at this boundary.

use async_trait::async_trait;
use thirtyfour::common::capabilities::desiredcapabilities::Capabilities;
use thirtyfour::prelude::*;

use crate::backend::Backend;
use crate::config::{BrowserKind, Config};
use crate::error::DriverError;
use crate::locator::Locator;
use crate::wait::WaitOptions;

// WebDriver key code for ArrowRight.
const ARROW_RIGHT: &str = "\u{e014}";

static SESSION_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Browser session driven over the WebDriver protocol.
pub struct WebDriverBackend {
    driver: WebDriver,
    id: String,
}

impl std::fmt::Debug for WebDriverBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriverBackend")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

fn build_capabilities(config: &Config) -> Result<Capabilities, DriverError> {
    let caps: Capabilities = match config.browser {
        BrowserKind::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            if config.headless {
                caps.add_arg("--headless=new")?;
            }
            caps.add_arg("--disable-gpu")?;
            caps.add_arg("--no-sandbox")?;
            if config.grid {
                caps.accept_insecure_certs(true)?;
            }
            caps.into()
        }
        BrowserKind::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if config.headless {
                caps.add_arg("-headless")?;
            }
            if config.grid {
                caps.accept_insecure_certs(true)?;
            }
            caps.into()
        }
        BrowserKind::Edge => {
            let mut caps = DesiredCapabilities::edge();
            if config.headless {
                caps.add_arg("--headless=new")?;
            }
            if config.grid {
                caps.accept_insecure_certs(true)?;
            }
            caps.into()
        }
        BrowserKind::Opera => {
            // operadriver takes no headless switch worth relying on.
            if config.headless {
                tracing::warn!("headless mode is not supported for opera; launching windowed");
            }
            let mut caps = DesiredCapabilities::opera();
            caps.accept_insecure_certs(true)?;
            caps.into()
        }
    };
    Ok(caps)
}

impl WebDriverBackend {
    async fn element(&self, locator: &Locator) -> Result<WebElement, DriverError> {
        Ok(self.driver.find(locator.to_by()).await?)
    }
}

#[async_trait]
impl Backend for WebDriverBackend {
    async fn launch(config: &Config) -> Result<Self, DriverError> {
        let endpoint = config.endpoint();
        tracing::info!(browser = %config.browser, endpoint, grid = config.grid, "launching browser session");
        let caps = build_capabilities(config)?;
        let driver = WebDriver::new(endpoint, caps).await?;
        driver.maximize_window().await?;
        let n = SESSION_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let id = format!("{}-{n}", config.browser);
        Ok(Self { driver, id })
    }

    fn session_id(&self) -> &str {
        &self.id
    }

    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), DriverError> {
        self.driver.refresh().await?;
        Ok(())
    }

    async fn wait_clickable(
        &mut self,
        locator: &Locator,
        wait: &WaitOptions,
    ) -> Result<(), DriverError> {
        // Two stages: the query resolves presence (NoSuchElement maps to
        // ElementNotFound), the waiter resolves clickability (Timeout).
        // The clickability stage only gets what is left of the budget, so
        // an element that appears late cannot stretch the wait past the
        // configured timeout.
        let started = std::time::Instant::now();
        let element = self
            .driver
            .query(locator.to_by())
            .wait(wait.timeout(), wait.poll_interval())
            .first()
            .await?;
        let remaining = wait.timeout().saturating_sub(started.elapsed());
        element
            .wait_until()
            .wait(remaining, wait.poll_interval())
            .clickable()
            .await?;
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.element(locator).await?.click().await?;
        Ok(())
    }

    async fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        self.element(locator).await?.send_keys(text).await?;
        Ok(())
    }

    async fn clear(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.element(locator).await?.clear().await?;
        Ok(())
    }

    async fn text(&mut self, locator: &Locator) -> Result<String, DriverError> {
        Ok(self.element(locator).await?.text().await?)
    }

    async fn attribute(
        &mut self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        Ok(self.element(locator).await?.attr(name).await?)
    }

    async fn is_selected(&mut self, locator: &Locator) -> Result<bool, DriverError> {
        Ok(self.element(locator).await?.is_selected().await?)
    }

    async fn is_displayed(&mut self, locator: &Locator) -> Result<bool, DriverError> {
        Ok(self.element(locator).await?.is_displayed().await?)
    }

    async fn count(&mut self, locator: &Locator) -> Result<usize, DriverError> {
        Ok(self.driver.find_all(locator.to_by()).await?.len())
    }

    async fn click_nth(&mut self, locator: &Locator, index: usize) -> Result<(), DriverError> {
        let elements = self.driver.find_all(locator.to_by()).await?;
        let element = elements.get(index).ok_or_else(|| DriverError {
            kind: crate::error::ErrorKind::ElementNotFound,
            message: format!("index {index} out of {} matches: {locator}", elements.len()),
        })?;
        element.click().await?;
        Ok(())
    }

    async fn select_by_value(
        &mut self,
        locator: &Locator,
        value: &str,
    ) -> Result<(), DriverError> {
        let element = self.element(locator).await?;
        let select = thirtyfour::components::SelectElement::new(&element).await?;
        select.select_by_value(value).await?;
        Ok(())
    }

    async fn drag_by_offset(
        &mut self,
        locator: &Locator,
        x: i64,
        y: i64,
    ) -> Result<(), DriverError> {
        let element = self.element(locator).await?;
        self.driver
            .action_chain()
            .drag_and_drop_element_by_offset(&element, x, y)
            .perform()
            .await?;
        Ok(())
    }

    async fn press_arrow_right(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.element(locator).await?.send_keys(ARROW_RIGHT).await?;
        Ok(())
    }

    async fn enter_frame(&mut self, index: usize) -> Result<(), DriverError> {
        let frames = self.driver.find_all(By::Tag("iframe")).await?;
        let frame = frames.get(index).ok_or_else(|| DriverError {
            kind: crate::error::ErrorKind::FrameNotFound,
            message: format!("no iframe at index {index} ({} present)", frames.len()),
        })?;
        frame.clone().enter_frame().await?;
        Ok(())
    }

    async fn enter_frame_at(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.element(locator).await?.enter_frame().await?;
        Ok(())
    }

    async fn enter_default_frame(&mut self) -> Result<(), DriverError> {
        self.driver.enter_default_frame().await?;
        Ok(())
    }

    async fn open_tab(&mut self) -> Result<(), DriverError> {
        self.driver
            .execute("window.open('about:blank');", vec![])
            .await?;
        let handles = self.driver.windows().await?;
        if let Some(last) = handles.last() {
            self.driver.switch_to_window(last.clone()).await?;
        }
        Ok(())
    }

    async fn switch_tab(&mut self, index: usize) -> Result<(), DriverError> {
        let handles = self.driver.windows().await?;
        let handle = handles.get(index).ok_or_else(|| DriverError {
            kind: crate::error::ErrorKind::Generic,
            message: format!("no window handle at index {index} ({} open)", handles.len()),
        })?;
        self.driver.switch_to_window(handle.clone()).await?;
        Ok(())
    }

    async fn close_tab(&mut self, index: usize) -> Result<(), DriverError> {
        self.driver.close_window().await?;
        self.switch_tab(index).await
    }

    async fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.element(locator).await?.scroll_into_view().await?;
        Ok(())
    }

    async fn move_to(&mut self, locator: &Locator) -> Result<(), DriverError> {
        let element = self.element(locator).await?;
        self.driver
            .action_chain()
            .move_to_element_center(&element)
            .perform()
            .await?;
        Ok(())
    }

    async fn execute(&mut self, script: &str) -> Result<serde_json::Value, DriverError> {
        let ret = self.driver.execute(script, vec![]).await?;
        Ok(ret.json().clone())
    }

    async fn screenshot_png(&mut self) -> Result<Vec<u8>, DriverError> {
        Ok(self.driver.screenshot_as_png().await?)
    }

    async fn close(self) -> Result<(), DriverError> {
        tracing::info!(session = %self.id, "closing browser session");
        self.driver.quit().await?;
        Ok(())
    }
}
