//! Link extraction from fetched pages.

use super::url::to_absolute;
use super::Category;
use crate::error::{Error, Result};

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use scraper::{Html, Selector};
use tracing::debug;

/// A fetched page: the URL it was served from and its HTML.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects; links are resolved against it.
    pub url: Url,
    /// Raw HTML body.
    pub html: String,
}

impl Page {
    /// Create a new [`Page`].
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }
}

/// Finds the links of a category on a page.
pub trait LinkDiscovery {
    /// Absolute URLs of `category` resources on `page`, in document order.
    fn discover(&self, page: &Page, category: Category) -> Result<Vec<Url>>;
}

/// Static HTML link discovery.
///
/// ```rust
/// use harvester::discovery::{Category, HtmlLinkDiscovery, LinkDiscovery, Page};
/// use reqwest::Url;
///
/// let page = Page::new(
///     Url::parse("https://example.com/list")?,
///     r#"<a href="/a.pdf">A</a><a href="b.zip">B</a>"#,
/// );
/// let links = HtmlLinkDiscovery.discover(&page, Category::Pdf)?;
/// assert_eq!(links[0].as_str(), "https://example.com/a.pdf");
/// assert_eq!(links.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlLinkDiscovery;

impl HtmlLinkDiscovery {
    /// Raw attribute values of the elements `category` reads from.
    pub fn raw_links(&self, page: &Page, category: Category) -> Result<Vec<String>> {
        let selector = Selector::parse(category.selector())
            .map_err(|e| Error::Selector(format!("{}: {}", category.selector(), e)))?;
        let document = Html::parse_document(&page.html);

        Ok(document
            .select(&selector)
            .filter_map(|element| element.value().attr(category.attribute()))
            .map(str::trim)
            .filter(|value| !value.is_empty() && !value.starts_with('#'))
            .map(String::from)
            .collect())
    }
}

impl LinkDiscovery for HtmlLinkDiscovery {
    fn discover(&self, page: &Page, category: Category) -> Result<Vec<Url>> {
        let links: Vec<Url> = self
            .raw_links(page, category)?
            .iter()
            .filter_map(|raw| match to_absolute(raw, &page.url) {
                Ok(url) => Some(url),
                Err(e) => {
                    debug!("Skipping link {:?}: {}", raw, e);
                    None
                }
            })
            .filter(|url| category.matches(url))
            .collect();

        debug!(
            page = %page.url,
            category = %category,
            found = links.len(),
            "Discovered links"
        );
        Ok(links)
    }
}

/// Download the HTML of `url`.
///
/// Any network failure or non-2xx status is an error: without the page there
/// is nothing to scan.
pub async fn fetch_page(client: &ClientWithMiddleware, url: &Url) -> Result<Page> {
    debug!("Fetching page {}", url);
    let res = client.get(url.as_str()).send().await?;

    let status = res.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let final_url = res.url().clone();
    let html = res.text().await?;
    Ok(Page::new(final_url, html))
}
