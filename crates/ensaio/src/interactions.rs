//! Interaction facade.
//!
//! [`Interactions`] is the single surface page objects and step
//! definitions talk to. Every operation logs its intent, performs one
//! backend call (or a short fixed sequence), and on failure wraps the
//! already-classified [`DriverError`] with the caller's element label
//! and the active scenario context, producing the full failure banner.
//!
//! There are no automatic retries; the `await_*` operations are the
//! only bounded polling in the crate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::backend::Backend;
use crate::context::ScenarioContext;
use crate::error::{DriverError, EnsaioError, EnsaioResult, ErrorKind};
use crate::locator::Locator;
use crate::session::Session;
use crate::wait::WaitOptions;

/// Facade over a borrowed [`Session`].
///
/// Holds the scenario context for banner rendering and the RNG used by
/// [`Interactions::click_random`]. Built fresh per scenario; cheap.
#[derive(Debug)]
pub struct Interactions<'s, B: Backend> {
    session: &'s mut Session<B>,
    context: ScenarioContext,
    rng: StdRng,
}

impl<'s, B: Backend> Interactions<'s, B> {
    /// Facade without scenario context (ad-hoc scripts, unit tests).
    #[must_use]
    pub fn new(session: &'s mut Session<B>) -> Self {
        Self::with_context(session, ScenarioContext::none())
    }

    /// Facade carrying the context captured by the before-hook.
    #[must_use]
    pub fn with_context(session: &'s mut Session<B>, context: ScenarioContext) -> Self {
        let rng = match session.config().seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            session,
            context,
            rng,
        }
    }

    /// The scenario context failures will carry.
    #[must_use]
    pub const fn context(&self) -> &ScenarioContext {
        &self.context
    }

    fn raise(context: &ScenarioContext, err: DriverError, label: &str) -> EnsaioError {
        let failure = EnsaioError::interaction(err, label, context);
        tracing::error!(label, "interaction failed");
        failure
    }

    /// Navigate to `url`.
    pub async fn goto(&mut self, url: &str) -> EnsaioResult<()> {
        tracing::info!(url, "goto");
        let backend = self.session.get(&self.context).await?;
        backend
            .goto(url)
            .await
            .map_err(|err| Self::raise(&self.context, err, url))
    }

    /// Reload the page, then assert the expected page is showing.
    pub async fn refresh(
        &mut self,
        locator: &Locator,
        expected: &str,
        label: &str,
    ) -> EnsaioResult<()> {
        tracing::info!(label, "refresh");
        let backend = self.session.get(&self.context).await?;
        backend
            .refresh()
            .await
            .map_err(|err| Self::raise(&self.context, err, label))?;
        self.validate_page(locator, expected, label).await
    }

    /// Wait until the element is clickable, with the default 20 s
    /// timeout and 500 ms poll interval.
    pub async fn await_element(&mut self, locator: &Locator, label: &str) -> EnsaioResult<()> {
        self.await_element_for(locator, WaitOptions::new(), label)
            .await
    }

    /// Wait until the element is clickable, with explicit options.
    pub async fn await_element_for(
        &mut self,
        locator: &Locator,
        wait: WaitOptions,
        label: &str,
    ) -> EnsaioResult<()> {
        tracing::debug!(%locator, label, timeout_ms = wait.timeout_ms, "awaiting element");
        let started = std::time::Instant::now();
        let backend = self.session.get(&self.context).await?;
        backend
            .wait_clickable(locator, &wait)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))?;
        tracing::debug!(
            label,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "element ready"
        );
        Ok(())
    }

    /// Wait for the element, then click it.
    pub async fn click(&mut self, locator: &Locator, label: &str) -> EnsaioResult<()> {
        tracing::info!(%locator, label, "click");
        self.await_element(locator, label).await?;
        let backend = self.session.get(&self.context).await?;
        backend
            .click(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Wait for the element, then type `text` into it.
    pub async fn write(&mut self, locator: &Locator, text: &str, label: &str) -> EnsaioResult<()> {
        tracing::info!(%locator, label, "write");
        self.await_element(locator, label).await?;
        let backend = self.session.get(&self.context).await?;
        backend
            .send_keys(locator, text)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Clear the field, then type `text` one character at a time.
    /// Useful against inputs with per-keystroke listeners.
    pub async fn write_slowly(
        &mut self,
        locator: &Locator,
        text: &str,
        label: &str,
    ) -> EnsaioResult<()> {
        tracing::info!(%locator, label, "write slowly");
        self.await_element(locator, label).await?;
        let context = &self.context;
        let backend = self.session.get(context).await?;
        backend
            .clear(locator)
            .await
            .map_err(|err| Self::raise(context, err, label))?;
        for ch in text.chars() {
            let key = ch.to_string();
            backend
                .send_keys(locator, &key)
                .await
                .map_err(|err| Self::raise(context, err, label))?;
        }
        Ok(())
    }

    /// Wait for the element, then clear its value.
    pub async fn clear_text(&mut self, locator: &Locator, label: &str) -> EnsaioResult<()> {
        tracing::info!(%locator, label, "clear text");
        self.await_element(locator, label).await?;
        let backend = self.session.get(&self.context).await?;
        backend
            .clear(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Whether the element is selected.
    pub async fn is_selected(&mut self, locator: &Locator, label: &str) -> EnsaioResult<bool> {
        tracing::debug!(%locator, label, "is_selected");
        let backend = self.session.get(&self.context).await?;
        backend
            .is_selected(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Whether the element is displayed.
    pub async fn is_displayed(&mut self, locator: &Locator, label: &str) -> EnsaioResult<bool> {
        tracing::debug!(%locator, label, "is_displayed");
        let backend = self.session.get(&self.context).await?;
        backend
            .is_displayed(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Wait for the element, then read its visible text.
    pub async fn text(&mut self, locator: &Locator, label: &str) -> EnsaioResult<String> {
        tracing::debug!(%locator, label, "text");
        self.await_element(locator, label).await?;
        let backend = self.session.get(&self.context).await?;
        backend
            .text(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Read an attribute; `Ok(None)` when the attribute is absent.
    pub async fn attribute(
        &mut self,
        locator: &Locator,
        name: &str,
        label: &str,
    ) -> EnsaioResult<Option<String>> {
        tracing::debug!(%locator, label, name, "attribute");
        let backend = self.session.get(&self.context).await?;
        backend
            .attribute(locator, name)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Number of elements matching the locator.
    pub async fn count(&mut self, locator: &Locator, label: &str) -> EnsaioResult<usize> {
        tracing::debug!(%locator, label, "count");
        let backend = self.session.get(&self.context).await?;
        backend
            .count(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Click a uniformly random member of the match set.
    ///
    /// Seedable through the configuration for reproducible runs; an
    /// empty match set is an [`ErrorKind::ElementNotFound`] failure.
    pub async fn click_random(&mut self, locator: &Locator, label: &str) -> EnsaioResult<()> {
        let n = self.count(locator, label).await?;
        if n == 0 {
            let err = DriverError {
                kind: ErrorKind::ElementNotFound,
                message: format!("no such element: {locator}"),
            };
            return Err(Self::raise(&self.context, err, label));
        }
        let index = self.rng.gen_range(0..n);
        tracing::info!(%locator, label, index, matches = n, "click random");
        let backend = self.session.get(&self.context).await?;
        backend
            .click_nth(locator, index)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Select the option with the given underlying value in a dropdown.
    pub async fn select_by_value(
        &mut self,
        locator: &Locator,
        value: &str,
        label: &str,
    ) -> EnsaioResult<()> {
        tracing::info!(%locator, label, value, "select by value");
        self.await_element(locator, label).await?;
        let backend = self.session.get(&self.context).await?;
        backend
            .select_by_value(locator, value)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Drag a slider handle by a horizontal pixel offset.
    pub async fn drag_slider(
        &mut self,
        locator: &Locator,
        pixels: i64,
        label: &str,
    ) -> EnsaioResult<()> {
        tracing::info!(%locator, label, pixels, "drag slider");
        self.await_element(locator, label).await?;
        let backend = self.session.get(&self.context).await?;
        backend
            .drag_by_offset(locator, pixels, 0)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Focus a slider with a click, then press arrow-right `presses`
    /// times. Keyboard alternative to [`Interactions::drag_slider`].
    pub async fn slide_by_keys(
        &mut self,
        locator: &Locator,
        presses: usize,
        label: &str,
    ) -> EnsaioResult<()> {
        tracing::info!(%locator, label, presses, "slide by keys");
        self.click(locator, label).await?;
        let context = &self.context;
        let backend = self.session.get(context).await?;
        for _ in 0..presses {
            backend
                .press_arrow_right(locator)
                .await
                .map_err(|err| Self::raise(context, err, label))?;
        }
        Ok(())
    }

    /// Switch into the `index`-th iframe on the page (0-based).
    pub async fn enter_frame(&mut self, index: usize) -> EnsaioResult<()> {
        tracing::info!(index, "enter frame");
        let label = format!("iframe[{index}]");
        let backend = self.session.get(&self.context).await?;
        backend
            .enter_frame(index)
            .await
            .map_err(|err| Self::raise(&self.context, err, &label))
    }

    /// Switch into the iframe with the given `name` attribute.
    pub async fn enter_frame_named(&mut self, name: &str) -> EnsaioResult<()> {
        tracing::info!(name, "enter frame by name");
        let locator = Locator::name(name);
        let backend = self.session.get(&self.context).await?;
        backend
            .enter_frame_at(&locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, name))
    }

    /// Switch back to the top-level document.
    pub async fn default_frame(&mut self) -> EnsaioResult<()> {
        tracing::info!("default frame");
        let backend = self.session.get(&self.context).await?;
        backend
            .enter_default_frame()
            .await
            .map_err(|err| Self::raise(&self.context, err, "default frame"))
    }

    /// Open a blank tab and switch to it.
    pub async fn new_tab(&mut self) -> EnsaioResult<()> {
        tracing::info!("new tab");
        let backend = self.session.get(&self.context).await?;
        backend
            .open_tab()
            .await
            .map_err(|err| Self::raise(&self.context, err, "nova aba"))
    }

    /// Switch to the `index`-th open tab (0-based).
    pub async fn switch_tab(&mut self, index: usize) -> EnsaioResult<()> {
        tracing::info!(index, "switch tab");
        let label = format!("aba {index}");
        let backend = self.session.get(&self.context).await?;
        backend
            .switch_tab(index)
            .await
            .map_err(|err| Self::raise(&self.context, err, &label))
    }

    /// Close the current tab and return to the first one.
    pub async fn close_tab(&mut self) -> EnsaioResult<()> {
        tracing::info!("close tab");
        let backend = self.session.get(&self.context).await?;
        backend
            .close_tab(0)
            .await
            .map_err(|err| Self::raise(&self.context, err, "fechar aba"))
    }

    /// Scroll the element into view.
    pub async fn scroll_into_view(&mut self, locator: &Locator, label: &str) -> EnsaioResult<()> {
        tracing::info!(%locator, label, "scroll into view");
        let backend = self.session.get(&self.context).await?;
        backend
            .scroll_into_view(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Move the pointer to the element's center (hover).
    pub async fn move_to(&mut self, locator: &Locator, label: &str) -> EnsaioResult<()> {
        tracing::info!(%locator, label, "move to");
        self.await_element(locator, label).await?;
        let backend = self.session.get(&self.context).await?;
        backend
            .move_to(locator)
            .await
            .map_err(|err| Self::raise(&self.context, err, label))
    }

    /// Assert the expected page is loaded: wait for the anchor element,
    /// read its text, and require it to contain `expected`.
    pub async fn validate_page(
        &mut self,
        locator: &Locator,
        expected: &str,
        label: &str,
    ) -> EnsaioResult<()> {
        tracing::info!(%locator, label, expected, "validate page");
        let actual = self.text(locator, label).await?;
        if actual.contains(expected) {
            Ok(())
        } else {
            Err(EnsaioError::Assertion {
                message: format!(
                    "página inesperada: esperava \"{expected}\" em \"{actual}\" ({label})"
                ),
            })
        }
    }

    /// Fixed pause. Discouraged: prefer [`Interactions::await_element`],
    /// which resolves as soon as the element is ready.
    pub async fn sleep(&mut self, millis: u64) {
        tracing::debug!(millis, "sleep");
        tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
    }
}
