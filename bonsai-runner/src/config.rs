//! Runner configuration
//!
//! Defines the API connection and the polling limits used when following
//! jobs.

use std::time::Duration;

use crate::scheduler::PollOptions;
use crate::scheduler::poller::DEFAULT_POLL_INTERVAL;

/// Runner configuration
///
/// Polling is unbounded unless a maximum number of attempts or a timeout is
/// set explicitly.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// API base URL (e.g., "http://localhost:8000")
    pub api_url: String,

    /// Wait between two status fetches
    pub poll_interval: Duration,

    /// Give up after this many status fetches
    pub max_attempts: Option<u32>,

    /// Give up once a job has been polled this long
    pub poll_timeout: Option<Duration>,
}

impl RunnerConfig {
    /// Creates a new configuration with defaults
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            poll_timeout: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Poll loop settings derived from this configuration
    pub fn poll_options(&self) -> PollOptions {
        let mut options = PollOptions::new(self.poll_interval);
        options.max_attempts = self.max_attempts;
        options.timeout = self.poll_timeout;
        options
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_attempts == Some(0) {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.poll_timeout.is_some_and(|timeout| timeout.is_zero()) {
            anyhow::bail!("poll_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
