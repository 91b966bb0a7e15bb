//! Crawl configuration
//!
//! Groups everything that changes how a crawl behaves: HTTP client settings,
//! the markup selector table, failure handling per stage, crawl scope and
//! worker pool widths.

use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::parser::SeasonAlignment;
use crate::schema::SiteSchema;

/// What a crawl stage does when one of its units fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the crawl at the first failure
    Abort,
    /// Record the failure, notify the caller and move on
    SkipAndReport,
}

/// Configuration for a full catalog crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub client: ClientConfig,
    pub schema: SiteSchema,
    /// Catalog page failures (default: `Abort`)
    pub page_policy: FailurePolicy,
    /// Show extraction failures (default: `SkipAndReport`)
    pub show_policy: FailurePolicy,
    /// Stop after this many shows; `None` crawls the whole catalog
    pub max_shows: Option<usize>,
    /// Catalog pages fetched at once (default: 1)
    pub page_concurrency: usize,
    /// Shows extracted at once (default: 1)
    pub show_concurrency: usize,
    /// Episode pages resolved at once inside one season (default: 1)
    pub episode_concurrency: usize,
    /// Fail with `SchemaDrift` instead of defaulting when a landmark is missing
    pub strict_landmarks: bool,
    pub season_alignment: SeasonAlignment,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            schema: SiteSchema::default(),
            page_policy: FailurePolicy::Abort,
            show_policy: FailurePolicy::SkipAndReport,
            max_shows: None,
            page_concurrency: 1,
            show_concurrency: 1,
            episode_concurrency: 1,
            strict_landmarks: false,
            season_alignment: SeasonAlignment::Positional,
        }
    }
}

impl CrawlConfig {
    pub(crate) fn page_width(&self) -> usize {
        self.page_concurrency.max(1)
    }

    pub(crate) fn show_width(&self) -> usize {
        self.show_concurrency.max(1)
    }

    pub(crate) fn episode_width(&self) -> usize {
        self.episode_concurrency.max(1)
    }
}
