//! Browser backend seam.
//!
//! [`Backend`] is the narrow surface the facade drives. The production
//! implementation ([`crate::webdriver::WebDriverBackend`]) speaks the
//! WebDriver protocol; [`MockBackend`] records calls and serves canned
//! elements so the facade and hooks can be exercised without a browser.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{DriverError, ErrorKind};
use crate::locator::Locator;
use crate::wait::WaitOptions;

/// Operations a browser backend must provide.
///
/// Every method returns a [`DriverError`] whose kind has already been
/// classified; the facade only attaches the scenario context on top.
#[async_trait]
pub trait Backend: Send + Sized {
    /// Launch a browser session for `config`.
    async fn launch(config: &Config) -> Result<Self, DriverError>;

    /// Opaque identifier of this session.
    fn session_id(&self) -> &str;

    /// Navigate to `url`.
    async fn goto(&mut self, url: &str) -> Result<(), DriverError>;

    /// Reload the current page.
    async fn refresh(&mut self) -> Result<(), DriverError>;

    /// Block until the element is present and clickable, or fail with
    /// [`ErrorKind::ElementNotFound`] (absent at the deadline) or
    /// [`ErrorKind::Timeout`] (present but never clickable).
    async fn wait_clickable(
        &mut self,
        locator: &Locator,
        wait: &WaitOptions,
    ) -> Result<(), DriverError>;

    /// Click the first element matching `locator`.
    async fn click(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Type `text` into the element.
    async fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), DriverError>;

    /// Clear the element's value.
    async fn clear(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Visible text of the element.
    async fn text(&mut self, locator: &Locator) -> Result<String, DriverError>;

    /// Attribute value, `None` when the attribute is absent.
    async fn attribute(
        &mut self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Whether the element is selected (checkbox, radio, option).
    async fn is_selected(&mut self, locator: &Locator) -> Result<bool, DriverError>;

    /// Whether the element is displayed.
    async fn is_displayed(&mut self, locator: &Locator) -> Result<bool, DriverError>;

    /// Number of elements matching `locator`.
    async fn count(&mut self, locator: &Locator) -> Result<usize, DriverError>;

    /// Click the `index`-th element (0-based) of the match list.
    async fn click_nth(&mut self, locator: &Locator, index: usize) -> Result<(), DriverError>;

    /// Select the option with `value` in a `<select>` element.
    async fn select_by_value(
        &mut self,
        locator: &Locator,
        value: &str,
    ) -> Result<(), DriverError>;

    /// Drag the element by a pixel offset.
    async fn drag_by_offset(
        &mut self,
        locator: &Locator,
        x: i64,
        y: i64,
    ) -> Result<(), DriverError>;

    /// Send one arrow-right keypress to the element.
    async fn press_arrow_right(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Switch into the `index`-th iframe on the page (0-based).
    async fn enter_frame(&mut self, index: usize) -> Result<(), DriverError>;

    /// Switch into the iframe matched by `locator`.
    async fn enter_frame_at(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Switch back to the top-level document.
    async fn enter_default_frame(&mut self) -> Result<(), DriverError>;

    /// Open a blank tab and switch to it.
    async fn open_tab(&mut self) -> Result<(), DriverError>;

    /// Switch to the `index`-th window handle (0-based).
    async fn switch_tab(&mut self, index: usize) -> Result<(), DriverError>;

    /// Close the current tab and switch to the `index`-th remaining one.
    async fn close_tab(&mut self, index: usize) -> Result<(), DriverError>;

    /// Scroll the element into view.
    async fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Move the pointer to the element's center.
    async fn move_to(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Run a script in the page and return its JSON result.
    async fn execute(&mut self, script: &str) -> Result<serde_json::Value, DriverError>;

    /// PNG screenshot of the current viewport.
    async fn screenshot_png(&mut self) -> Result<Vec<u8>, DriverError>;

    /// Tear the session down.
    async fn close(self) -> Result<(), DriverError>;
}

/// A canned element served by [`MockBackend`].
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Visible text.
    pub text: String,
    /// Attribute map.
    pub attributes: HashMap<String, String>,
    /// Selected state.
    pub selected: bool,
    /// Displayed state.
    pub displayed: bool,
    /// Whether clicks and waits succeed.
    pub clickable: bool,
    /// How many elements the locator matches.
    pub count: usize,
}

impl Default for MockElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            attributes: HashMap::new(),
            selected: false,
            displayed: true,
            clickable: true,
            count: 1,
        }
    }
}

impl MockElement {
    /// A displayed, clickable element with the given text.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Mark the element present but never clickable.
    #[must_use]
    pub fn unclickable(mut self) -> Self {
        self.clickable = false;
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the match count.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the selected state.
    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

static MOCK_SESSION_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// In-memory backend for tests.
///
/// Elements are registered up front with [`MockBackend::insert`]; every
/// operation appends to [`MockBackend::calls`] so tests can assert what
/// the facade actually did. Waits poll on the tokio clock, so tests run
/// under `#[tokio::test(start_paused = true)]` resolve instantly.
#[derive(Debug)]
pub struct MockBackend {
    id: String,
    /// Canned elements keyed by locator.
    pub elements: HashMap<Locator, MockElement>,
    /// Every call performed, in order, formatted `op(args)`.
    pub calls: Vec<String>,
    /// Queued results for [`Backend::execute`], popped front-first.
    pub script_results: Vec<serde_json::Value>,
    /// Bytes returned by [`Backend::screenshot_png`].
    pub screenshot: Vec<u8>,
    /// Number of iframes on the mock page.
    pub frame_count: usize,
    /// Number of open tabs.
    pub tab_count: usize,
    /// When set, every navigation fails with this kind.
    pub fail_with: Option<ErrorKind>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// A fresh mock with a unique session id and no elements.
    #[must_use]
    pub fn new() -> Self {
        let n = MOCK_SESSION_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Self {
            id: format!("mock-session-{n}"),
            elements: HashMap::new(),
            calls: Vec::new(),
            script_results: Vec::new(),
            screenshot: Vec::new(),
            frame_count: 0,
            tab_count: 1,
            fail_with: None,
        }
    }

    /// Register a canned element.
    pub fn insert(&mut self, locator: Locator, element: MockElement) {
        self.elements.insert(locator, element);
    }

    /// Whether an operation name appears in the call log.
    #[must_use]
    pub fn was_called(&self, op: &str) -> bool {
        self.calls.iter().any(|c| c.starts_with(op))
    }

    fn record(&mut self, call: String) {
        self.calls.push(call);
    }

    fn lookup(&self, locator: &Locator) -> Result<&MockElement, DriverError> {
        self.elements.get(locator).ok_or_else(|| DriverError {
            kind: ErrorKind::ElementNotFound,
            message: format!("no such element: {locator}"),
        })
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn launch(_config: &Config) -> Result<Self, DriverError> {
        Ok(Self::new())
    }

    fn session_id(&self) -> &str {
        &self.id
    }

    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.record(format!("goto({url})"));
        if let Some(kind) = self.fail_with {
            return Err(DriverError {
                kind,
                message: format!("navigation to {url} failed"),
            });
        }
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), DriverError> {
        self.record("refresh".to_string());
        Ok(())
    }

    async fn wait_clickable(
        &mut self,
        locator: &Locator,
        wait: &WaitOptions,
    ) -> Result<(), DriverError> {
        self.record(format!("wait_clickable({locator})"));
        let deadline = tokio::time::Instant::now() + wait.timeout();
        loop {
            match self.elements.get(locator) {
                Some(e) if e.clickable && e.displayed => return Ok(()),
                _ if tokio::time::Instant::now() >= deadline => {
                    // Absent at the deadline reads as "not found"; present
                    // but never clickable reads as a timeout.
                    return match self.elements.get(locator) {
                        None => Err(DriverError {
                            kind: ErrorKind::ElementNotFound,
                            message: format!("no such element: {locator}"),
                        }),
                        Some(_) => Err(DriverError::timeout(wait.timeout_ms)),
                    };
                }
                _ => tokio::time::sleep(wait.poll_interval()).await,
            }
        }
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.record(format!("click({locator})"));
        let element = self.lookup(locator)?;
        if element.clickable {
            Ok(())
        } else {
            Err(DriverError {
                kind: ErrorKind::NotInteractable,
                message: format!("element not interactable: {locator}"),
            })
        }
    }

    async fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        self.record(format!("send_keys({locator}, {text})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn clear(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.record(format!("clear({locator})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn text(&mut self, locator: &Locator) -> Result<String, DriverError> {
        self.record(format!("text({locator})"));
        Ok(self.lookup(locator)?.text.clone())
    }

    async fn attribute(
        &mut self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.record(format!("attribute({locator}, {name})"));
        Ok(self.lookup(locator)?.attributes.get(name).cloned())
    }

    async fn is_selected(&mut self, locator: &Locator) -> Result<bool, DriverError> {
        self.record(format!("is_selected({locator})"));
        Ok(self.lookup(locator)?.selected)
    }

    async fn is_displayed(&mut self, locator: &Locator) -> Result<bool, DriverError> {
        self.record(format!("is_displayed({locator})"));
        Ok(self.lookup(locator)?.displayed)
    }

    async fn count(&mut self, locator: &Locator) -> Result<usize, DriverError> {
        self.record(format!("count({locator})"));
        Ok(self.elements.get(locator).map_or(0, |e| e.count))
    }

    async fn click_nth(&mut self, locator: &Locator, index: usize) -> Result<(), DriverError> {
        self.record(format!("click_nth({locator}, {index})"));
        let element = self.lookup(locator)?;
        if index < element.count {
            Ok(())
        } else {
            Err(DriverError {
                kind: ErrorKind::ElementNotFound,
                message: format!("index {index} out of {} matches: {locator}", element.count),
            })
        }
    }

    async fn select_by_value(
        &mut self,
        locator: &Locator,
        value: &str,
    ) -> Result<(), DriverError> {
        self.record(format!("select_by_value({locator}, {value})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn drag_by_offset(
        &mut self,
        locator: &Locator,
        x: i64,
        y: i64,
    ) -> Result<(), DriverError> {
        self.record(format!("drag_by_offset({locator}, {x}, {y})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn press_arrow_right(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.record(format!("press_arrow_right({locator})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn enter_frame(&mut self, index: usize) -> Result<(), DriverError> {
        self.record(format!("enter_frame({index})"));
        if index < self.frame_count {
            Ok(())
        } else {
            Err(DriverError {
                kind: ErrorKind::FrameNotFound,
                message: format!("no iframe at index {index}"),
            })
        }
    }

    async fn enter_frame_at(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.record(format!("enter_frame_at({locator})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn enter_default_frame(&mut self) -> Result<(), DriverError> {
        self.record("enter_default_frame".to_string());
        Ok(())
    }

    async fn open_tab(&mut self) -> Result<(), DriverError> {
        self.record("open_tab".to_string());
        self.tab_count += 1;
        Ok(())
    }

    async fn switch_tab(&mut self, index: usize) -> Result<(), DriverError> {
        self.record(format!("switch_tab({index})"));
        if index < self.tab_count {
            Ok(())
        } else {
            Err(DriverError {
                kind: ErrorKind::Generic,
                message: format!("no window handle at index {index}"),
            })
        }
    }

    async fn close_tab(&mut self, index: usize) -> Result<(), DriverError> {
        self.record(format!("close_tab({index})"));
        if self.tab_count == 0 || index >= self.tab_count - 1 {
            return Err(DriverError {
                kind: ErrorKind::Generic,
                message: format!("no window handle at index {index}"),
            });
        }
        self.tab_count -= 1;
        Ok(())
    }

    async fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.record(format!("scroll_into_view({locator})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn move_to(&mut self, locator: &Locator) -> Result<(), DriverError> {
        self.record(format!("move_to({locator})"));
        self.lookup(locator)?;
        Ok(())
    }

    async fn execute(&mut self, script: &str) -> Result<serde_json::Value, DriverError> {
        self.record(format!("execute({script})"));
        if self.script_results.is_empty() {
            Ok(serde_json::Value::Null)
        } else {
            Ok(self.script_results.remove(0))
        }
    }

    async fn screenshot_png(&mut self) -> Result<Vec<u8>, DriverError> {
        self.record("screenshot_png".to_string());
        Ok(self.screenshot.clone())
    }

    async fn close(mut self) -> Result<(), DriverError> {
        self.record("close".to_string());
        Ok(())
    }
}
