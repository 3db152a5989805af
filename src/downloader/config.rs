//! Configuration structures and defaults for the downloader.
//!
//! [`RetryPolicy`] holds the retry timing that used to be process-wide
//! constants; it is passed to the [`Downloader`](super::Downloader) at
//! construction so tests can shorten the delays.
//!
//! # Examples
//!
//! ```rust
//! use harvester::downloader::RetryPolicy;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::default();
//! assert_eq!(policy.max_retries, 3);
//! assert_eq!(policy.retry_delay, Duration::from_millis(2000));
//! assert_eq!(policy.max_attempts(), 4);
//!
//! let fast = RetryPolicy::immediate(2);
//! assert_eq!(fast.retry_round_delay, Duration::ZERO);
//! ```

use crate::progress::ProgressObserver;
use crate::transfer::Transfer;

use reqwest::header::HeaderMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default number of retries, used both inline and as the round budget.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default wait between two inline attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);
/// Default wait between two retry rounds.
pub const DEFAULT_RETRY_ROUND_DELAY: Duration = Duration::from_millis(3000);
/// Default output directory, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "downloads";

/// Retry budget and timing.
///
/// `max_retries` bounds both layers: each inline retry invocation makes up to
/// `1 + max_retries` transfer calls, and up to `max_retries` rounds run after
/// the first pass, each with a fresh inline budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt, and number of retry rounds.
    pub max_retries: u32,
    /// Wait between two inline attempts for the same target.
    pub retry_delay: Duration,
    /// Wait between two retry rounds.
    pub retry_round_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            retry_round_delay: DEFAULT_RETRY_ROUND_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a new [`RetryPolicy`].
    pub fn new(max_retries: u32, retry_delay: Duration, retry_round_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
            retry_round_delay,
        }
    }

    /// A policy with `max_retries` and no waiting at all.
    pub fn immediate(max_retries: u32) -> Self {
        Self::new(max_retries, Duration::ZERO, Duration::ZERO)
    }

    /// Transfer calls made by one inline retry invocation when every one fails.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Retry budget and timing.
    pub retry_policy: RetryPolicy,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Timeout for establishing connections.
    pub connect_timeout: Option<Duration>,
    /// Receives progress events.
    pub observer: Option<Arc<dyn ProgressObserver>>,
    /// Transfer unit replacing the default HTTP one.
    pub transfer: Option<Arc<dyn Transfer>>,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("retry_policy", &self.retry_policy)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("connect_timeout", &self.connect_timeout)
            .field("observer", &self.observer.is_some())
            .field("transfer", &self.transfer.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            retry_policy: RetryPolicy::default(),
            headers: None,
            proxy: None,
            connect_timeout: None,
            observer: None,
            transfer: None,
        }
    }
}
