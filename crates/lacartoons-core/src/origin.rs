//! Scheme + host resolution for site-local paths
//!
//! The catalog links to its own pages with bare paths (`/serie/7`). Those
//! are turned into absolute URLs by prefixing `{scheme}://{host}` of either
//! the page being parsed (catalog cards) or the caller-supplied catalog
//! root (episode links). The concatenation is literal: no
//! normalization and no relative-path resolution.

use url::Url;

use crate::error::{CrawlError, Result};

/// Scheme and authority (host plus optional port) of a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    /// Extract the origin of an absolute URL.
    ///
    /// # Errors
    /// Returns `CrawlError::InvalidUrl` if the URL does not parse or has no host.
    ///
    /// # Examples
    /// ```
    /// use lacartoons_core::Origin;
    ///
    /// let origin = Origin::parse("https://www.lacartoons.com/?page=2").unwrap();
    /// assert_eq!(origin.join("/serie/7"), "https://www.lacartoons.com/serie/7");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| CrawlError::InvalidUrl(format!("{raw}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| CrawlError::InvalidUrl(format!("{raw}: missing host")))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host including the port when one was given explicitly.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build `{scheme}://{host}{path}`.
    pub fn join(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme, self.host, path)
    }
}

/// Catalog page URL for a 1-based page number: `{root}/?page={n}`.
pub fn catalog_page_url(root: &str, page: u32) -> String {
    format!("{}/?page={}", root, page)
}

/// Every catalog page URL from 1 up to and including `last_page`.
///
/// A `last_page` of 0 yields no URLs.
pub fn catalog_page_urls(root: &str, last_page: u32) -> Vec<String> {
    (1..=last_page).map(|n| catalog_page_url(root, n)).collect()
}
