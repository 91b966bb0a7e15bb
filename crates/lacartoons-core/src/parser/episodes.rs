//! Show page parser
//!
//! Extracts the season/episode structure of a show's detail page. Episode
//! links are made absolute against the catalog's base origin rather than the
//! show page's own URL. Resolving each episode's player source is a separate
//! network step, so this parser only produces outlines.

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CrawlError, Result};
use crate::origin::Origin;
use crate::schema::CompiledSchema;

use super::{element_text, trim_markup};

/// How season headings are paired with episode lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonAlignment {
    /// The i-th episode list belongs to the i-th heading. Surplus headings
    /// stay empty and surplus lists are ignored.
    #[default]
    Positional,
    /// Each heading owns the list wrapped by its next sibling element.
    Adjacent,
    /// Positional, but a count mismatch is an error.
    Strict,
}

/// One episode link found on a show page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeLink {
    /// 1-based position inside its list
    pub chapter: u32,
    pub name: String,
    pub internal_url: String,
}

/// A season heading with the episode links assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonOutline {
    pub name: String,
    pub episodes: Vec<EpisodeLink>,
}

/// Parse the seasons and episode links of a show page.
///
/// # Arguments
/// * `html` - Raw HTML of the show page
/// * `base` - Origin used to make episode links absolute
/// * `schema` - Compiled selector table
/// * `alignment` - Heading/list pairing rule
/// * `strict` - Treat a page without the season container as markup drift
/// * `url` - Show URL, used in log and error messages
///
/// # Returns
/// * `Ok(Vec<SeasonOutline>)` in page order, one per heading
/// * `Err(CrawlError::SeasonMismatch)` under `SeasonAlignment::Strict`
/// * `Err(CrawlError::SchemaDrift)` if the container is missing in strict mode
pub fn parse_show_page(
    html: &str,
    base: &Origin,
    schema: &CompiledSchema,
    alignment: SeasonAlignment,
    strict: bool,
    url: &str,
) -> Result<Vec<SeasonOutline>> {
    let document = Html::parse_document(html);

    if strict && document.select(&schema.season_container).next().is_none() {
        return Err(CrawlError::SchemaDrift {
            landmark: "season container",
            url: url.to_string(),
        });
    }

    let headings: Vec<ElementRef> = document.select(&schema.season_heading).collect();
    let mut seasons: Vec<SeasonOutline> = headings
        .iter()
        .map(|h| SeasonOutline {
            name: trim_markup(&element_text(h)).to_string(),
            episodes: Vec::new(),
        })
        .collect();

    match alignment {
        SeasonAlignment::Positional | SeasonAlignment::Strict => {
            let lists: Vec<ElementRef> = document.select(&schema.episode_list).collect();

            if lists.len() != seasons.len() {
                if alignment == SeasonAlignment::Strict {
                    return Err(CrawlError::SeasonMismatch {
                        headings: seasons.len(),
                        containers: lists.len(),
                        url: url.to_string(),
                    });
                }
                warn!(
                    show = url,
                    headings = seasons.len(),
                    lists = lists.len(),
                    "Season headings and episode lists differ in count"
                );
            }

            for (season, list) in seasons.iter_mut().zip(&lists) {
                season.episodes = episode_links(std::slice::from_ref(list), base, schema);
            }
        }
        SeasonAlignment::Adjacent => {
            for (season, heading) in seasons.iter_mut().zip(&headings) {
                let Some(wrapper) = heading.next_siblings().find_map(ElementRef::wrap) else {
                    continue;
                };
                if !schema.episode_list_wrapper.matches(&wrapper) {
                    continue;
                }
                // Outermost list only; nested lists are already its descendants
                let Some(list) = wrapper.select(&schema.episode_list_inner).next() else {
                    continue;
                };
                season.episodes = episode_links(std::slice::from_ref(&list), base, schema);
            }
        }
    }

    Ok(seasons)
}

/// Episode links of one season, numbered from 1 across `lists` in order.
fn episode_links(lists: &[ElementRef], base: &Origin, schema: &CompiledSchema) -> Vec<EpisodeLink> {
    lists
        .iter()
        .flat_map(|list| list.select(&schema.episode_link))
        .enumerate()
        .map(|(i, link)| EpisodeLink {
            chapter: i as u32 + 1,
            name: trim_markup(&element_text(&link)).to_string(),
            internal_url: base.join(link.value().attr("href").unwrap_or_default()),
        })
        .collect()
}
