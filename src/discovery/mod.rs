//! Link discovery: which resources a page offers for a category.
//!
//! - [`Category`] - closed set of resource kinds and how to find them
//! - [`links`] - [`Page`], the [`LinkDiscovery`] trait and [`HtmlLinkDiscovery`]
//! - [`url`] - [`to_absolute`] link normalization
//!
//! # Examples
//!
//! ```rust
//! use harvester::discovery::Category;
//!
//! let category: Category = "img".parse()?;
//! assert_eq!(category, Category::Image);
//! assert_eq!(category.name(), "images");
//! assert_eq!("2".parse::<Category>()?, Category::Pdf);
//! # Ok::<(), harvester::Error>(())
//! ```

pub mod links;
pub mod url;

pub use links::{fetch_page, HtmlLinkDiscovery, LinkDiscovery, Page};
pub use url::{normalize_page_url, to_absolute};

use crate::error::Error;

use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// Kind of resource to harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// ZIP archives.
    Zip,
    /// PDF documents.
    Pdf,
    /// Images referenced by `<img>` elements.
    Image,
    /// MP4 videos.
    Mp4,
    /// MP3 audio.
    Mp3,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 5] = [
        Category::Zip,
        Category::Pdf,
        Category::Image,
        Category::Mp4,
        Category::Mp3,
    ];

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Zip => "ZIP",
            Category::Pdf => "PDF",
            Category::Image => "images",
            Category::Mp4 => "MP4",
            Category::Mp3 => "MP3",
        }
    }

    /// File extensions, lowercase, with the leading dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Category::Zip => &[".zip"],
            Category::Pdf => &[".pdf"],
            Category::Image => &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"],
            Category::Mp4 => &[".mp4"],
            Category::Mp3 => &[".mp3"],
        }
    }

    /// CSS selector of the elements carrying the links.
    pub fn selector(self) -> &'static str {
        match self {
            Category::Image => "img[src]",
            _ => "a[href]",
        }
    }

    /// Attribute holding the link.
    pub fn attribute(self) -> &'static str {
        match self {
            Category::Image => "src",
            _ => "href",
        }
    }

    /// Whether the path of `url` ends with one of the extensions.
    pub fn matches(self, url: &Url) -> bool {
        let path = url.path().to_ascii_lowercase();
        self.extensions().iter().any(|ext| path.ends_with(ext))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "zip" => Ok(Category::Zip),
            "2" | "pdf" => Ok(Category::Pdf),
            "3" | "img" | "image" | "images" => Ok(Category::Image),
            "4" | "mp4" => Ok(Category::Mp4),
            "5" | "mp3" => Ok(Category::Mp3),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}
