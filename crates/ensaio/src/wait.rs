//! Bounded-wait options.
//!
//! Waiting is the only built-in retry in the framework: a bounded poll
//! for "element is clickable", delegated to the driver layer. Everything
//! else fails on the first attempt.

use std::time::Duration;

/// Default wait timeout (20 seconds).
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 20_000;

/// Short wait preset (15 seconds).
pub const SHORT_WAIT_TIMEOUT_MS: u64 = 15_000;

/// Default polling interval (500 ms).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Options for bounded waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds.
    pub timeout_ms: u64,
    /// Polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Default options (20 s / 500 ms).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Short preset (15 s / 500 ms).
    #[must_use]
    pub const fn short() -> Self {
        Self {
            timeout_ms: SHORT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Wait for the given number of seconds.
    #[must_use]
    pub const fn seconds(secs: u64) -> Self {
        Self {
            timeout_ms: secs * 1000,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Set the timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Polling interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
