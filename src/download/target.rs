//! Download targets.
//!
//! A [`DownloadTarget`] maps one discovered URL to one file on disk. Its
//! identity is the destination path, which is derived from the last path
//! segment of the URL.
//!
//! ```rust
//! use harvester::download::DownloadTarget;
//! use std::path::Path;
//!
//! let target = DownloadTarget::try_new("https://example.com/files/report.pdf", Path::new("out"), 0)?;
//! assert_eq!(target.file_name(), "report.pdf");
//! assert_eq!(target.destination_path, Path::new("out").join("report.pdf"));
//! # Ok::<(), harvester::Error>(())
//! ```

use crate::error::Error;

use reqwest::Url;
use std::path::{Path, PathBuf};

/// Represents one file to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// URL of the file to download.
    pub source_url: Url,
    /// Where the file is written.
    pub destination_path: PathBuf,
    /// Position of the link in the discovered sequence.
    pub sequence_index: usize,
}

impl DownloadTarget {
    /// Creates a target that stores `url` inside `directory`.
    ///
    /// The file name comes from [`file_name_from_url`].
    pub fn new(url: &Url, directory: &Path, sequence_index: usize) -> Self {
        Self {
            source_url: url.clone(),
            destination_path: directory.join(file_name_from_url(url, sequence_index)),
            sequence_index,
        }
    }

    /// Parses `url` and creates a target inside `directory`.
    pub fn try_new(url: &str, directory: &Path, sequence_index: usize) -> Result<Self, Error> {
        let parsed = Url::parse(url).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", url, e))
        })?;
        Ok(Self::new(&parsed, directory, sequence_index))
    }

    /// Creates a target with an explicit destination path.
    pub fn with_destination(url: &Url, destination_path: PathBuf, sequence_index: usize) -> Self {
        Self {
            source_url: url.clone(),
            destination_path,
            sequence_index,
        }
    }

    /// The file name part of the destination path.
    pub fn file_name(&self) -> &str {
        self.destination_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Derive the on-disk file name for `url`.
///
/// Uses the last non-empty path segment, percent-decoded, with path
/// separators replaced by `_`. Falls back to `file_<sequence_index>` when the
/// URL has no usable segment.
pub fn file_name_from_url(url: &Url, sequence_index: usize) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    let name: String = decoded
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();

    match name.trim() {
        "" | "." | ".." => format!("file_{}", sequence_index),
        _ => name,
    }
}
