//! LaCartoons Crawler Core Library
//!
//! This crate crawls the paginated LaCartoons catalog of animated series,
//! discovers each show's seasons and episodes, and resolves the externally
//! hosted video embedded in every episode page.
//!
//! # Features
//! - Pagination discovery on the catalog root
//! - Show summaries from every catalog page
//! - Season/episode structure of each show
//! - Embedded player URL of each episode
//! - Ordered worker pools, cancellation and per-stage failure policies
//!
//! # Compatibility
//! Extraction depends on the remote site's markup. All selectors live in
//! [`SiteSchema`]; when the site changes, missing optional markup silently
//! yields default values unless `strict_landmarks` is enabled, in which case
//! the crawl fails with `CrawlError::SchemaDrift`.

pub mod client;
pub mod config;
pub mod crawl;
pub mod crawler;
pub mod error;
pub mod origin;
pub mod parser;
pub mod schema;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, PageClient};
pub use config::{CrawlConfig, FailurePolicy};
pub use crawl::CrawlEvent;
pub use crawler::{Crawler, SeasonExtraction, DEFAULT_CATALOG_ROOT};
pub use error::{CrawlError, Result};
pub use origin::{catalog_page_url, catalog_page_urls, Origin};
pub use parser::SeasonAlignment;
pub use schema::{CompiledSchema, SiteSchema, SCHEMA_VERSION};
pub use types::{CrawlReport, Episode, PageFailure, Season, Show, ShowReport};
