//! Episode page parser.

use scraper::Html;

use crate::error::{CrawlError, Result};
use crate::schema::CompiledSchema;

/// Parse the embedded player source of an episode page.
///
/// Returns an empty string when the page has no player frame (or the frame
/// has no `src`), unless `strict` is set.
pub fn parse_player_source(
    html: &str,
    schema: &CompiledSchema,
    strict: bool,
    url: &str,
) -> Result<String> {
    let document = Html::parse_document(html);

    let source = document
        .select(&schema.player_frame)
        .next()
        .and_then(|frame| frame.value().attr("src"));

    match source {
        Some(src) => Ok(src.to_string()),
        None if strict => Err(CrawlError::SchemaDrift {
            landmark: "episode frame",
            url: url.to_string(),
        }),
        None => Ok(String::new()),
    }
}
