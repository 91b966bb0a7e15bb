//! Error types for the LaCartoons crawler
//!
//! This module defines all error types used throughout the library.
//! CrawlError implements Serialize so crawl reports can be emitted as JSON.
//!
//! Missing optional markup (a year, a marker, an embedded player) is never
//! an error: those fields degrade to defaults inside the parsers. Only the
//! hard failures below propagate.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for crawler operations
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Transport-level failure (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with anything other than 200 OK
    #[error("HTTP {code} for {url}")]
    HttpStatus { code: u16, url: String },

    /// Response body could not be decoded or a selector could not be compiled
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    /// A numeric field that must be valid was not a number
    #[error("Invalid number in {field}: {value:?}")]
    Format { field: &'static str, value: String },

    /// An expected structural landmark is missing from the page
    #[error("Markup landmark '{landmark}' not found on {url}")]
    SchemaDrift { landmark: &'static str, url: String },

    /// Season headings and episode lists could not be paired one to one
    #[error("Found {headings} season headings but {containers} episode lists on {url}")]
    SeasonMismatch {
        headings: usize,
        containers: usize,
        url: String,
    },

    /// URL without a usable scheme and host
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The operation was cancelled before it completed
    #[error("Operation cancelled")]
    Cancelled,
}

impl CrawlError {
    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CrawlError::HttpStatus { code, .. } => Some(*code),
            CrawlError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Serialize CrawlError as a string for report output
impl Serialize for CrawlError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;
