//! Link normalization against the page's base URL.

use crate::error::{Error, Result};

use reqwest::Url;

/// Resolve a raw link found on a page into an absolute URL.
///
/// - `http://…` and `https://…` are kept as they are.
/// - `//host/path` takes the scheme of `base`.
/// - `/path` is appended to the origin of `base`.
/// - anything else is appended to the origin of `base` after a `/`, without
///   regard to the directory of the page.
///
/// ```rust
/// use harvester::discovery::to_absolute;
/// use reqwest::Url;
///
/// let base = Url::parse("https://example.com/gallery/index.html")?;
/// assert_eq!(to_absolute("/a.png", &base)?.as_str(), "https://example.com/a.png");
/// assert_eq!(to_absolute("b.png", &base)?.as_str(), "https://example.com/b.png");
/// assert_eq!(to_absolute("//cdn.example.com/c.png", &base)?.as_str(), "https://cdn.example.com/c.png");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_absolute(raw: &str, base: &Url) -> Result<Url> {
    let raw = raw.trim();
    let absolute = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else if raw.starts_with("//") {
        format!("{}:{}", base.scheme(), raw)
    } else if raw.starts_with('/') {
        format!("{}{}", base.origin().ascii_serialization(), raw)
    } else {
        format!("{}/{}", base.origin().ascii_serialization(), raw)
    };

    Url::parse(&absolute).map_err(|e| {
        Error::InvalidUrl(format!("The link \"{}\" cannot be resolved: {}", raw, e))
    })
}

/// Normalize a user-supplied page address, prepending `https://` when no
/// HTTP scheme is given.
///
/// ```rust
/// use harvester::discovery::normalize_page_url;
///
/// assert_eq!(normalize_page_url("example.com/files")?.as_str(), "https://example.com/files");
/// assert_eq!(normalize_page_url("http://example.com/")?.as_str(), "http://example.com/");
/// # Ok::<(), harvester::Error>(())
/// ```
pub fn normalize_page_url(input: &str) -> Result<Url> {
    let input = input.trim();
    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", input, e)))?;
    if url.host_str().is_none() {
        return Err(Error::InvalidUrl(format!(
            "The url \"{}\" has no host",
            input
        )));
    }
    Ok(url)
}
