//! Session configuration.
//!
//! Browser kind, headless and grid flags, endpoints, evidence directory
//! and the optional random seed. Values come from the environment
//! (`ENSAIO_*` variables) or from the builder methods; driver binaries
//! themselves are expected to be already running (chromedriver,
//! geckodriver, msedgedriver, operadriver) or reachable through a
//! Selenium Grid hub; ensaio does not provision them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default Selenium Grid hub endpoint.
pub const DEFAULT_GRID_URL: &str = "http://localhost:4444/wd/hub";

/// Supported browsers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Google Chrome (chromedriver).
    #[default]
    Chrome,
    /// Mozilla Firefox (geckodriver).
    Firefox,
    /// Microsoft Edge (msedgedriver).
    Edge,
    /// Opera (operadriver).
    Opera,
}

impl BrowserKind {
    /// Parse a case-insensitive browser name; unknown names fall back to
    /// Chrome.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "firefox" => Self::Firefox,
            "edge" => Self::Edge,
            "opera" => Self::Opera,
            _ => Self::Chrome,
        }
    }

    /// Default local driver endpoint for this browser.
    #[must_use]
    pub const fn default_endpoint(&self) -> &'static str {
        match self {
            // chromedriver, msedgedriver and operadriver default to 9515
            Self::Chrome | Self::Edge | Self::Opera => "http://localhost:9515",
            Self::Firefox => "http://localhost:4444",
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
            Self::Opera => "opera",
        };
        f.write_str(name)
    }
}

/// Framework configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Which browser to drive.
    pub browser: BrowserKind,
    /// Launch the browser headless.
    pub headless: bool,
    /// Connect through a Selenium Grid hub instead of a local driver.
    pub grid: bool,
    /// Grid hub endpoint (used when `grid` is set).
    pub grid_url: String,
    /// Local driver endpoint (used when `grid` is unset). When `None`,
    /// the browser's default endpoint is used.
    pub webdriver_url: Option<String>,
    /// Close the browser after every scenario.
    pub close_after_scenario: bool,
    /// Root of the evidence tree (screenshots land below it).
    pub evidence_dir: PathBuf,
    /// Seed for the random-click selector; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chrome,
            headless: false,
            grid: false,
            grid_url: DEFAULT_GRID_URL.to_string(),
            webdriver_url: None,
            close_after_scenario: true,
            evidence_dir: PathBuf::from("target"),
            seed: None,
        }
    }
}

impl Config {
    /// Default configuration: local non-headless Chrome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from `ENSAIO_*` environment variables,
    /// falling back to defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(browser) = std::env::var("ENSAIO_BROWSER") {
            config.browser = BrowserKind::parse(&browser);
        }
        if let Ok(v) = std::env::var("ENSAIO_HEADLESS") {
            config.headless = parse_flag(&v);
        }
        if let Ok(v) = std::env::var("ENSAIO_GRID") {
            config.grid = parse_flag(&v);
        }
        if let Ok(url) = std::env::var("ENSAIO_GRID_URL") {
            config.grid_url = url;
        }
        if let Ok(url) = std::env::var("ENSAIO_WEBDRIVER_URL") {
            config.webdriver_url = Some(url);
        }
        if let Ok(v) = std::env::var("ENSAIO_CLOSE_AFTER_SCENARIO") {
            config.close_after_scenario = parse_flag(&v);
        }
        if let Ok(dir) = std::env::var("ENSAIO_EVIDENCE_DIR") {
            config.evidence_dir = PathBuf::from(dir);
        }
        if let Ok(seed) = std::env::var("ENSAIO_SEED") {
            config.seed = seed.parse().ok();
        }
        config
    }

    /// Set the browser kind.
    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Set headless mode.
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Enable or disable grid mode.
    #[must_use]
    pub const fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Override the grid hub endpoint.
    #[must_use]
    pub fn with_grid_url(mut self, url: impl Into<String>) -> Self {
        self.grid_url = url.into();
        self
    }

    /// Override the local driver endpoint.
    #[must_use]
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = Some(url.into());
        self
    }

    /// Set whether the browser closes after every scenario.
    #[must_use]
    pub const fn with_close_after_scenario(mut self, close: bool) -> Self {
        self.close_after_scenario = close;
        self
    }

    /// Set the evidence-tree root.
    #[must_use]
    pub fn with_evidence_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.evidence_dir = dir.into();
        self
    }

    /// Seed the random-click selector for reproducible runs.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The endpoint a session should connect to, given the grid flag.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        if self.grid {
            &self.grid_url
        } else {
            self.webdriver_url
                .as_deref()
                .unwrap_or_else(|| self.browser.default_endpoint())
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "sim")
}
