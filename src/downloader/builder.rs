//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use harvester::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), harvester::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .retries(5)
//!     .retry_delay(Duration::from_millis(500))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Observing Events
//!
//! ```rust
//! use harvester::downloader::DownloaderBuilder;
//! use harvester::progress::DownloadEvent;
//!
//! # fn example() -> Result<(), harvester::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .on_event(|event| {
//!         if let DownloadEvent::AttemptsExhausted { target, error } = event {
//!             println!("Giving up on {} for now: {}", target.file_name(), error);
//!         }
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::DownloaderConfig, config::RetryPolicy, downloader::Downloader};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::progress::{DownloadEvent, ProgressObserver};
use crate::transfer::{HttpTransfer, Transfer};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() -> Result<(), harvester::Error> {
/// use harvester::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().retries(5).directory("downloads".into()).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the retry budget, used both inline and as the number of rounds.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retry_policy.max_retries = retries;
        self
    }

    /// Set the wait between two inline attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_policy.retry_delay = delay;
        self
    }

    /// Set the wait between two retry rounds.
    pub fn retry_round_delay(mut self, delay: Duration) -> Self {
        self.config.retry_policy.retry_round_delay = delay;
        self
    }

    /// Replace the whole retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_policy = policy;
        self
    }

    /// Use a proxy for every request.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Register the observer receiving every [`DownloadEvent`].
    pub fn observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Register a closure receiving every [`DownloadEvent`].
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DownloadEvent<'_>) + Send + Sync + 'static,
    {
        self.config.observer = Some(Arc::new(callback));
        self
    }

    /// Use `transfer` instead of the default HTTP transfer unit.
    ///
    /// The HTTP options of this builder ([`proxy`], [`headers`], [`header`] and
    /// [`connect_timeout`]) only configure the default transfer unit, so
    /// [`build`] rejects them when a custom one is set. Configure the client
    /// of the custom transfer unit instead.
    ///
    /// [`proxy`]: DownloaderBuilder::proxy
    /// [`headers`]: DownloaderBuilder::headers
    /// [`header`]: DownloaderBuilder::header
    /// [`connect_timeout`]: DownloaderBuilder::connect_timeout
    /// [`build`]: DownloaderBuilder::build
    pub fn transfer(mut self, transfer: Arc<dyn Transfer>) -> Self {
        self.config.transfer = Some(transfer);
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one. See also [`header()`].
    ///
    /// [`header()`]: DownloaderBuilder::header
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use harvester::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_static("Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/109.0");
    ///
    /// let downloader = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, ua)
    ///     .build();
    /// assert!(downloader.is_ok());
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    ///
    /// Builds the HTTP client unless a custom transfer unit was provided.
    /// Fails with [`Error::Config`] when HTTP options are combined with a
    /// custom transfer unit.
    pub fn build(self) -> Result<Downloader> {
        let transfer: Arc<dyn Transfer> = match self.config.transfer {
            Some(ref transfer) => {
                let config = &self.config;
                if config.proxy.is_some()
                    || config.headers.is_some()
                    || config.connect_timeout.is_some()
                {
                    return Err(Error::Config(
                        "proxy, headers and connect timeout cannot be combined with a custom transfer unit"
                            .to_string(),
                    ));
                }
                transfer.clone()
            }
            None => Arc::new(HttpTransfer::from_config(HttpClientConfig {
                proxy: self.config.proxy.clone(),
                headers: self.config.headers.clone(),
                connect_timeout: self.config.connect_timeout,
            })?),
        };
        Ok(Downloader::new(self.config, transfer))
    }
}
