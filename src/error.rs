//! Error handling for the Harvester library.
//!
//! Two families of errors live here. [`Error`] is the crate-level error that
//! setup operations (building the HTTP client, fetching the page, creating the
//! output directory) propagate with `?`. [`TransferError`] describes why a
//! single download attempt failed; it is captured into a
//! [`TransferOutcome::Failed`](crate::download::TransferOutcome::Failed) and
//! never propagated, so the orchestrator can treat all kinds the same way.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen when using Harvester.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The downloader options contradict each other.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The requested resource category does not exist.
    #[error("Unknown category \"{0}\" (expected zip, pdf, img, mp4, mp3 or 1-5)")]
    UnknownCategory(String),

    /// A CSS selector used for link discovery could not be parsed.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// The page to scan answered with a non-success status.
    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised by the HTTP middleware stack.
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Result type alias for operations that can fail with a Harvester error.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single transfer attempt failed.
///
/// All variants are handled identically by the retry logic.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The connection could not be established or the body stream broke.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: StatusCode },

    /// Writing the destination file failed.
    #[error("filesystem error on {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TransferError {
    /// Wrap any error as a network failure.
    pub fn network<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TransferError::Network(error.into())
    }

    /// Wrap an I/O error raised while touching `path`.
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TransferError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest_middleware::Error> for TransferError {
    fn from(error: reqwest_middleware::Error) -> Self {
        TransferError::network(error)
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => TransferError::HttpStatus { status },
            None => TransferError::network(error),
        }
    }
}
