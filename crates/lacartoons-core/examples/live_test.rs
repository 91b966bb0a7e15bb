use lacartoons_core::{CrawlConfig, Crawler, DEFAULT_CATALOG_ROOT};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let crawler = Crawler::new(DEFAULT_CATALOG_ROOT, CrawlConfig::default())?;
    let cancel = CancellationToken::new();

    println!("🔍 Reading pagination of {}...\n", crawler.root());

    let pages = crawler.page_urls(&cancel).await?;
    println!("Catalog has {} pages", pages.len());

    let Some(first) = pages.first() else {
        println!("No pagination found, nothing to crawl");
        return Ok(());
    };

    let shows = crawler.extract_shows(first, &cancel).await?;
    println!("First page lists {} shows:", shows.len());
    for (i, show) in shows.iter().enumerate() {
        println!("  {}. {} ({}, rating {}) - {}", i + 1, show.name, show.year, show.rating, show.url);
    }

    if let Some(show) = shows.first() {
        println!("\n📺 Extracting seasons of: {}\n", show.name);

        let extraction = crawler.extract_seasons(show, &cancel).await;
        for season in &extraction.seasons {
            println!("  • {} - {} episodes", season.name, season.episodes.len());
            for episode in season.episodes.iter().take(3) {
                println!("      {}. {} -> {}", episode.chapter, episode.name, episode.external_url);
            }
        }
        if let Some(error) = extraction.error {
            println!("\n⚠️  Extraction stopped early: {}", error);
        }
    }

    Ok(())
}
