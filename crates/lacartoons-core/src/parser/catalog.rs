//! Catalog page parser
//!
//! Parses one catalog listing page into show summaries. Seasons are left
//! empty; they are filled in later from each show's own page.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{CrawlError, Result};
use crate::origin::Origin;
use crate::schema::CompiledSchema;
use crate::types::Show;

use super::{element_text, trim_markup};

/// Parse every show card on a catalog page.
///
/// Relative image and detail links are made absolute with the scheme and
/// host of `page_url`. Every card field falls back to a default when its
/// markup is missing, except the detail link: a card without an `href`
/// is left out of the result.
///
/// # Arguments
/// * `html` - Raw HTML of the catalog page
/// * `page_url` - URL the page was fetched from
/// * `schema` - Compiled selector table
/// * `strict` - Treat a page with no cards at all as markup drift
///
/// # Returns
/// * `Ok(Vec<Show>)` in page order
/// * `Err(CrawlError::InvalidUrl)` if `page_url` has no scheme/host
/// * `Err(CrawlError::SchemaDrift)` if no card is found in strict mode
pub fn parse_catalog(
    html: &str,
    page_url: &str,
    schema: &CompiledSchema,
    strict: bool,
) -> Result<Vec<Show>> {
    let origin = Origin::parse(page_url)?;
    let document = Html::parse_document(html);

    let mut shows = Vec::new();
    let mut cards = 0usize;

    for card in document.select(&schema.catalog_entry) {
        cards += 1;
        if let Some(show) = parse_card(&card, &origin, schema) {
            shows.push(show);
        } else {
            debug!(page = page_url, position = cards, "Skipping catalog card without detail link");
        }
    }

    if strict && cards == 0 {
        return Err(CrawlError::SchemaDrift {
            landmark: "catalog entries",
            url: page_url.to_string(),
        });
    }

    Ok(shows)
}

/// Parse a single catalog card; `None` when it has no detail link.
fn parse_card(card: &ElementRef, origin: &Origin, schema: &CompiledSchema) -> Option<Show> {
    let image_url = card
        .select(&schema.entry_image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| origin.join(src))
        .unwrap_or_default();

    let name = first_text(card, &schema.entry_name).unwrap_or_default();
    let marker = first_text(card, &schema.entry_marker)
        .map(|t| trim_markup(&t).to_string())
        .unwrap_or_default();
    let year = first_text(card, &schema.entry_year)
        .map(|t| parse_lenient_int(&t))
        .unwrap_or(0);
    let rating = first_text(card, &schema.entry_rating)
        .map(|t| parse_lenient_int(&t))
        .unwrap_or(0);

    let href = card.value().attr("href")?;

    Some(Show {
        name,
        marker,
        url: origin.join(href),
        image_url,
        year,
        rating,
        seasons: Vec::new(),
    })
}

fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|el| element_text(&el))
}

/// Parse an integer card field, falling back to 0.
///
/// # Examples
/// ```
/// use lacartoons_core::parser::parse_lenient_int;
///
/// assert_eq!(parse_lenient_int("1998"), 1998);
/// assert_eq!(parse_lenient_int(" 7 "), 7);
/// assert_eq!(parse_lenient_int("N/A"), 0);
/// ```
pub fn parse_lenient_int(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.lacartoons.com/?page=1";

    fn card(href: Option<&str>, body: &str) -> String {
        match href {
            Some(h) => format!(r#"<a href="{h}">{body}</a>"#),
            None => format!("<a>{body}</a>"),
        }
    }

    fn full_body(name: &str, year: &str, rating: &str) -> String {
        format!(
            r#"<img src="/assets/{name}.jpg">
               <div class="informacion-serie"><div>
                   <p class="nombre-serie">{name}</p>
                   <span class="marcador-cartoon">
                       Cartoon
                   </span>
                   <span class="marcador-ano">{year}</span>
                   <span class="valoracion">{rating}</span>
               </div></div>"#
        )
    }

    fn catalog(cards: &[String]) -> String {
        format!(
            r#"<html><body><div class="conjuntos-series">{}</div></body></html>"#,
            cards.concat()
        )
    }

    #[test]
    fn test_parse_catalog_full_card() {
        let schema = CompiledSchema::builtin().unwrap();
        let html = catalog(&[card(Some("/serie/7"), &full_body("Ben 10", "2005", "8"))]);

        let shows = parse_catalog(&html, PAGE_URL, &schema, false).unwrap();
        assert_eq!(shows.len(), 1);
        let show = &shows[0];
        assert_eq!(show.name, "Ben 10");
        assert_eq!(show.marker, "Cartoon");
        assert_eq!(show.year, 2005);
        assert_eq!(show.rating, 8);
        assert_eq!(show.url, "https://www.lacartoons.com/serie/7");
        assert_eq!(show.image_url, "https://www.lacartoons.com/assets/Ben 10.jpg");
        assert!(show.seasons.is_empty());
    }

    #[test]
    fn test_parse_catalog_drops_card_without_href() {
        let schema = CompiledSchema::builtin().unwrap();
        let html = catalog(&[
            card(Some("/serie/1"), &full_body("Uno", "2001", "5")),
            card(None, &full_body("Dos", "2002", "6")),
            card(Some("/serie/3"), &full_body("Tres", "2003", "7")),
        ]);

        let shows = parse_catalog(&html, PAGE_URL, &schema, false).unwrap();
        let names: Vec<_> = shows.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Uno", "Tres"]);
    }

    #[test]
    fn test_parse_catalog_missing_fields_default() {
        let schema = CompiledSchema::builtin().unwrap();
        let html = catalog(&[card(
            Some("/serie/9"),
            r#"<div class="informacion-serie"><div><p class="nombre-serie">Solo nombre</p></div></div>"#,
        )]);

        let shows = parse_catalog(&html, PAGE_URL, &schema, false).unwrap();
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].marker, "");
        assert_eq!(shows[0].year, 0);
        assert_eq!(shows[0].rating, 0);
        assert_eq!(shows[0].image_url, "");
    }

    #[test]
    fn test_parse_catalog_unparsable_numbers_default_to_zero() {
        let schema = CompiledSchema::builtin().unwrap();
        let html = catalog(&[card(Some("/serie/2"), &full_body("X", "198?", "alta"))]);

        let shows = parse_catalog(&html, PAGE_URL, &schema, false).unwrap();
        assert_eq!(shows[0].year, 0);
        assert_eq!(shows[0].rating, 0);
    }

    #[test]
    fn test_parse_catalog_uses_page_origin() {
        let schema = CompiledSchema::builtin().unwrap();
        let html = catalog(&[card(Some("/serie/2"), &full_body("X", "1", "1"))]);

        let shows = parse_catalog(&html, "http://127.0.0.1:9000/?page=4", &schema, false).unwrap();
        assert_eq!(shows[0].url, "http://127.0.0.1:9000/serie/2");
        assert_eq!(shows[0].image_url, "http://127.0.0.1:9000/assets/X.jpg");
    }

    #[test]
    fn test_parse_catalog_is_deterministic() {
        let schema = CompiledSchema::builtin().unwrap();
        let html = catalog(&[
            card(Some("/serie/1"), &full_body("Uno", "2001", "5")),
            card(Some("/serie/2"), &full_body("Dos", "2002", "6")),
        ]);

        let first = parse_catalog(&html, PAGE_URL, &schema, false).unwrap();
        let second = parse_catalog(&html, PAGE_URL, &schema, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_catalog_empty_page() {
        let schema = CompiledSchema::builtin().unwrap();
        let html = "<html><body></body></html>";
        assert!(parse_catalog(html, PAGE_URL, &schema, false).unwrap().is_empty());
        assert!(matches!(
            parse_catalog(html, PAGE_URL, &schema, true),
            Err(CrawlError::SchemaDrift { landmark: "catalog entries", .. })
        ));
    }

    #[test]
    fn test_parse_catalog_invalid_page_url() {
        let schema = CompiledSchema::builtin().unwrap();
        assert!(matches!(
            parse_catalog("<html></html>", "/relative", &schema, false),
            Err(CrawlError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_lenient_int() {
        assert_eq!(parse_lenient_int("2005"), 2005);
        assert_eq!(parse_lenient_int("\n 9 \t"), 9);
        assert_eq!(parse_lenient_int("-3"), -3);
        assert_eq!(parse_lenient_int(""), 0);
        assert_eq!(parse_lenient_int("8.5"), 0);
    }
}
