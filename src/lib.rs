//! Harvester discovers typed resource links (archives, documents, images,
//! video, audio) on a web page and downloads them, retrying failures in
//! organized rounds.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use harvester::{
//!     discovery::{fetch_page, Category, HtmlLinkDiscovery, LinkDiscovery},
//!     downloader::DownloaderBuilder,
//!     http::{create_http_client, HttpClientConfig},
//! };
//! use reqwest::Url;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let page = fetch_page(&client, &Url::parse("https://example.com/reports")?).await?;
//! let links = HtmlLinkDiscovery.discover(&page, Category::Pdf)?;
//!
//! let downloader = DownloaderBuilder::new().directory("downloads".into()).build()?;
//! let result = downloader.download_urls(&links).await?;
//! println!("{}/{} downloaded", result.succeeded_count(), result.total_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`discovery`] - Resource categories, link extraction and URL normalization
//! - [`download`] - Download targets and outcome types
//! - [`downloader`] - The `Downloader` batch orchestrator and its builder
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client functionality
//! - [`progress`] - Download events, progress bars and the final report
//! - [`transfer`] - The single-attempt transfer unit
//! - [`utils`] - Shared utility functions

pub mod discovery;
pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod transfer;
pub mod utils;

pub use discovery::{Category, HtmlLinkDiscovery, LinkDiscovery, Page};
pub use download::{BatchResult, DownloadTarget, FailureRecord, SkipReason, TransferOutcome};
pub use downloader::{AttemptResult, Downloader, DownloaderBuilder, RetryPolicy};
pub use error::{Error, Result, TransferError};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{DownloadEvent, ProgressBarOpts, ProgressDisplay, ProgressObserver, StyleOptions};
pub use transfer::{HttpTransfer, Transfer};
