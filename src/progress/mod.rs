//! Progress module: download events and their presentation.
//!
//! The orchestrator never writes to the terminal. It emits [`DownloadEvent`]s
//! to a [`ProgressObserver`]; presentation subscribes from the outside.
//!
//! # Overview
//!
//! - `event` - [`DownloadEvent`], the [`ProgressObserver`] trait and [`NoopObserver`]
//! - `display` - [`ProgressDisplay`], an indicatif observer
//! - `style` - Progress bar styling options and templates
//! - `report` - End-of-run report text
//!
//! # Examples
//!
//! ```rust
//! use harvester::downloader::DownloaderBuilder;
//! use harvester::progress::{ProgressDisplay, StyleOptions};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), harvester::Error> {
//! let display = Arc::new(ProgressDisplay::new(StyleOptions::default()));
//! let downloader = DownloaderBuilder::new().observer(display).build()?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod display;
pub(crate) mod event;
pub(crate) mod report;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use event::{DownloadEvent, NoopObserver, ProgressObserver};
pub use report::{no_files_found, render_report};
pub use style::{ProgressBarOpts, StyleOptions};
