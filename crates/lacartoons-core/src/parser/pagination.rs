//! Pagination parser for the catalog root page.

use scraper::Html;

use crate::error::{CrawlError, Result};
use crate::schema::CompiledSchema;

use super::element_text;

/// Parse the highest catalog page number.
///
/// The number is the text of the second-to-last pagination item (the last
/// one is the "next" control). A page without pagination yields `Ok(0)`
/// unless `strict` is set.
///
/// # Arguments
/// * `html` - Raw HTML of the catalog root
/// * `schema` - Compiled selector table
/// * `strict` - Treat a missing pagination control as markup drift
/// * `url` - Page URL, used in error messages
///
/// # Returns
/// * `Ok(n)` with the last page number
/// * `Err(CrawlError::Format)` if the item text is not a number
/// * `Err(CrawlError::SchemaDrift)` if the control is missing in strict mode
pub fn parse_last_page(html: &str, schema: &CompiledSchema, strict: bool, url: &str) -> Result<u32> {
    let document = Html::parse_document(html);

    let Some(anchor) = document.select(&schema.last_page).next() else {
        if strict {
            return Err(CrawlError::SchemaDrift {
                landmark: "pagination control",
                url: url.to_string(),
            });
        }
        return Ok(0);
    };

    let text = element_text(&anchor);
    text.trim().parse::<u32>().map_err(|_| CrawlError::Format {
        field: "last page",
        value: text,
    })
}
