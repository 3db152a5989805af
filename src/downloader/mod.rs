//! Downloader module containing the batch orchestrator, its builder pattern, and configuration.
//!
//! This module provides the main [`Downloader`] struct and its associated builder pattern
//! for configuring and executing batches of downloads. It owns all retry policy: the
//! transfer unit it drives makes exactly one attempt per call.
//!
//! # Overview
//!
//! - `downloader` - Core Downloader struct: first pass, inline retry, retry rounds
//! - `builder` - DownloaderBuilder for flexible configuration using the builder pattern
//! - `config` - [`RetryPolicy`] and the main configuration structure with its defaults
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use harvester::downloader::DownloaderBuilder;
//! use harvester::download::DownloadTarget;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().build()?;
//! downloader.prepare_directory().await?;
//!
//! let targets = vec![
//!     DownloadTarget::try_new("https://example.com/file1.zip", downloader.directory(), 0)?,
//!     DownloadTarget::try_new("https://example.com/file2.pdf", downloader.directory(), 1)?,
//! ];
//!
//! let result = downloader.download(&targets).await;
//! for failure in result.terminally_failed() {
//!     println!("Failed: {} ({})", failure.target.file_name(), failure.last_error);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Shortened Delays
//!
//! ```rust
//! use harvester::downloader::{DownloaderBuilder, RetryPolicy};
//!
//! # fn example() -> Result<(), harvester::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .retry_policy(RetryPolicy::immediate(2))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{
    DownloaderConfig, RetryPolicy, DEFAULT_DIRECTORY, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY,
    DEFAULT_RETRY_ROUND_DELAY,
};
pub use downloader::{AttemptResult, Downloader, FirstPass};
