//! Data types for the LaCartoons crawler
//!
//! This module contains the catalog aggregate (show → seasons → episodes)
//! and the report types the orchestrator hands to its caller.
//! Catalog types implement Serialize and Deserialize for JSON output.

use serde::{Deserialize, Serialize};

use crate::error::CrawlError;

/// One series entry from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Display name as it appears on the catalog card
    pub name: String,
    /// Short categorical tag shown next to the name (trimmed)
    pub marker: String,
    /// Absolute detail page URL; identifies the show within one crawl
    pub url: String,
    /// Absolute thumbnail URL, empty when the card has no image
    pub image_url: String,
    /// Release year, 0 when missing or not a number
    pub year: i32,
    /// Rating, 0 when missing or not a number
    pub rating: i32,
    /// Seasons in page order. Empty until episode extraction runs.
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl Show {
    /// Total number of episodes across every season.
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

/// A named group of episodes belonging to one show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Heading text with surrounding whitespace removed
    pub name: String,
    /// Episodes in page order
    pub episodes: Vec<Episode>,
}

impl Season {
    /// Create a season with no episodes yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            episodes: Vec::new(),
        }
    }
}

/// One playable episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// 1-based position inside its season's list
    pub chapter: u32,
    /// Link text with surrounding whitespace removed
    pub name: String,
    /// Absolute URL of the episode page on the catalog site
    pub internal_url: String,
    /// Embedded player source, empty when the page has no player
    pub external_url: String,
}

/// Outcome of crawling one show
#[derive(Debug, Serialize)]
pub struct ShowReport {
    /// The show with every season/episode extracted before any failure
    pub show: Show,
    /// Set when extraction stopped early; `show.seasons` is then partial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CrawlError>,
}

impl ShowReport {
    /// Whether extraction for this show failed.
    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }
}

/// A catalog page that could not be scraped under a skip policy
#[derive(Debug, Serialize)]
pub struct PageFailure {
    /// 1-based page number
    pub page: u32,
    pub url: String,
    pub error: CrawlError,
}

/// Aggregated result of a full catalog crawl
#[derive(Debug, Default, Serialize)]
pub struct CrawlReport {
    /// Highest page number discovered on the catalog root
    pub last_page: u32,
    /// Shows in catalog order, each with its extraction outcome
    pub shows: Vec<ShowReport>,
    /// Pages skipped under `FailurePolicy::SkipAndReport`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_failures: Vec<PageFailure>,
    /// True when a show failure stopped the crawl early
    pub halted: bool,
}

impl CrawlReport {
    /// Number of shows whose extraction failed.
    pub fn failed_shows(&self) -> usize {
        self.shows.iter().filter(|r| r.is_errored()).count()
    }

    /// Number of episodes collected across every show.
    pub fn episode_count(&self) -> usize {
        self.shows.iter().map(|r| r.show.episode_count()).sum()
    }
}
