//! Plain-text rendering of a crawl report

use std::fmt::Write;

use lacartoons_core::{CrawlReport, ShowReport};

/// Render the report as an indented tree, one line per show, season and episode.
///
/// ```text
///  1 Show name https://host/serie/1
///      1 Temporada 1 2
///          1 <-> Episode <-> https://host/capitulo/1 <-> https://player/1
/// ```
///
/// A show whose extraction failed is followed by an `ERROR` line and the
/// error message, then whatever seasons were extracted before the failure.
pub fn render_tree(report: &CrawlReport) -> String {
    let mut out = String::new();

    for failure in &report.page_failures {
        let _ = writeln!(out, "page {} skipped: {}", failure.page, failure.error);
    }

    for (index, entry) in report.shows.iter().enumerate() {
        render_show(&mut out, index, entry);
    }

    if report.halted {
        out.push_str("crawl halted before every show was extracted\n");
    }

    out
}

fn render_show(out: &mut String, index: usize, entry: &ShowReport) {
    let show = &entry.show;
    let _ = writeln!(out, "{:2} {} {}", index + 1, show.name, show.url);

    if let Some(error) = &entry.error {
        out.push_str("ERROR\n");
        let _ = writeln!(out, "{error}");
    }

    for (number, season) in show.seasons.iter().enumerate() {
        let _ = writeln!(
            out,
            "\t{:2} {} {}",
            number + 1,
            season.name,
            season.episodes.len()
        );
        for episode in &season.episodes {
            let _ = writeln!(
                out,
                "\t\t{} <-> {} <-> {} <-> {}",
                episode.chapter, episode.name, episode.internal_url, episode.external_url
            );
        }
    }
}
