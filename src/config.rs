//! Settings threaded through every scrape entry point.

use std::time::Duration;

use crate::constants::{MAX_HTTP_RESPONSE_SIZE, MAX_TRACKER_ATTEMPTS, USER_AGENT};

/// Configuration for tracker scrapes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rscrape::ScrapeConfig;
///
/// let config = ScrapeConfig::default().with_timeout(Some(Duration::from_secs(10)));
/// assert_eq!(config.timeout, Some(Duration::from_secs(10)));
/// assert_eq!(config.max_trackers, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Applied separately to connect, send and each receive. `None` waits
    /// indefinitely.
    pub timeout: Option<Duration>,
    /// Largest HTTP response accepted, headers included.
    pub max_http_response: usize,
    /// Cap on the number of announce URLs tried for one torrent.
    pub max_trackers: usize,
    /// Sent as `User-Agent` on HTTP scrapes.
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_http_response: MAX_HTTP_RESPONSE_SIZE,
            max_trackers: MAX_TRACKER_ATTEMPTS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Interprets a whole number of seconds the way the command line does:
    /// zero disables the timeout.
    pub fn with_timeout_secs(self, secs: u64) -> Self {
        let timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self.with_timeout(timeout)
    }

    pub fn with_max_http_response(mut self, bytes: usize) -> Self {
        self.max_http_response = bytes;
        self
    }

    pub fn with_max_trackers(mut self, max: usize) -> Self {
        self.max_trackers = max;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
