//! HTTP client for the catalog site
//!
//! Plain GET requests with no retries. Only `200 OK` counts as success;
//! any other status is returned as `CrawlError::HttpStatus` without reading
//! the body. Every fetch honors a cancellation token.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{CrawlError, Result};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout in seconds; `None` or `Some(0)` waits forever (default: 30)
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
        }
    }
}

/// HTTP client that turns URLs into page bodies
#[derive(Debug, Clone)]
pub struct PageClient {
    client: reqwest::Client,
}

impl PageClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch a page body.
    ///
    /// # Arguments
    /// * `url` - Absolute URL to GET
    /// * `cancel` - Token that aborts the request when cancelled
    ///
    /// # Errors
    /// - `CrawlError::Network` - transport failure or timeout
    /// - `CrawlError::HttpStatus` - any status other than 200
    /// - `CrawlError::Parse` - body could not be decoded as text
    /// - `CrawlError::Cancelled` - `cancel` fired first
    pub async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<String> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CrawlError::Cancelled),
            result = self.get(url) => result,
        }
    }

    async fn get(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(CrawlError::HttpStatus {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_decode() {
                CrawlError::Parse(format!("Unreadable body from {url}: {e}"))
            } else {
                CrawlError::Network(e)
            }
        })
    }
}
