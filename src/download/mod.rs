//! Download data model.
//!
//! This module provides the types the orchestrator and the transfer unit
//! exchange:
//!
//! - [`target`] - [`DownloadTarget`] and destination file naming
//! - [`summary`] - per-attempt [`TransferOutcome`], [`FailureRecord`] and the final [`BatchResult`]
//!
//! # Examples
//!
//! ```rust
//! use harvester::download::DownloadTarget;
//! use std::path::Path;
//!
//! let target = DownloadTarget::try_new("https://example.com/song.mp3", Path::new("downloads"), 0)?;
//! println!("Downloading: {}", target.file_name());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod summary;
pub mod target;

pub use summary::{BatchResult, FailureRecord, SkipReason, TransferOutcome};
pub use target::{file_name_from_url, DownloadTarget};
