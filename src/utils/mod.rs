//! Shared utility functions.
//!
//! - [`content_length`] - `Content-Length` parsing and guarded percentages

pub mod content_length;

pub use content_length::{content_length_from_headers, progress_percent};
