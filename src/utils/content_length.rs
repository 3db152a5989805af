//! Content length extraction utilities.
//!
//! Progress is reported against the `Content-Length` header when the server
//! sends one. A missing, unparsable or zero length means the total is
//! unknown, and no percentage is computed for it.

use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Read the announced body length from response headers.
///
/// # Example
///
/// ```rust
/// use harvester::utils::content_length_from_headers;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(content_length_from_headers(&headers), Some(2048));
/// ```
pub fn content_length_from_headers(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

/// Percentage of `received` over `total`, or `None` when the total is unknown.
///
/// ```rust
/// use harvester::utils::progress_percent;
///
/// assert_eq!(progress_percent(512, Some(1024)), Some(50.0));
/// assert_eq!(progress_percent(512, None), None);
/// assert_eq!(progress_percent(512, Some(0)), None);
/// ```
pub fn progress_percent(received: u64, total: Option<u64>) -> Option<f64> {
    match total {
        Some(total) if total > 0 => Some(received as f64 / total as f64 * 100.0),
        _ => None,
    }
}
