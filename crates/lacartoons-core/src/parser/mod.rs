//! HTML parsers for LaCartoons pages
//!
//! This module contains parsers for extracting data from the site's pages:
//! - `pagination`: highest page number on the catalog root
//! - `catalog`: show cards on one catalog page
//! - `episodes`: season/episode structure of a show page
//! - `player`: embedded player source on an episode page
//!
//! Parsers are synchronous and take the raw body, so the parsed document
//! never lives across an `.await`.

pub mod catalog;
pub mod episodes;
pub mod pagination;
pub mod player;

use scraper::ElementRef;

// Re-export main parsing functions
pub use catalog::{parse_catalog, parse_lenient_int};
pub use episodes::{parse_show_page, EpisodeLink, SeasonAlignment, SeasonOutline};
pub use pagination::parse_last_page;
pub use player::parse_player_source;

/// Trim the whitespace the site puts around text nodes (spaces, tabs, newlines).
pub fn trim_markup(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, ' ' | '\t' | '\n'))
}

/// Concatenated text of an element and its descendants.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}
