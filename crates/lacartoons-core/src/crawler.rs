//! Main crawler API
//!
//! This module combines the HTTP client with the parsers. Each method is one
//! stage of the crawl pipeline and can be used on its own; [`Crawler::crawl`]
//! in the `crawl` module chains them over the whole catalog.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::PageClient;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::origin::{catalog_page_urls, Origin};
use crate::parser::{
    parse_catalog, parse_last_page, parse_player_source, parse_show_page, SeasonOutline,
};
use crate::schema::CompiledSchema;
use crate::types::{Episode, Season, Show};

/// Catalog root of the live site
pub const DEFAULT_CATALOG_ROOT: &str = "https://www.lacartoons.com";

/// Result of extracting one show's seasons
///
/// Extraction stops at the first episode whose page cannot be fetched.
/// `seasons` then holds every season found on the show page, with the
/// episodes resolved before the failure, and `error` holds the failure.
#[derive(Debug)]
pub struct SeasonExtraction {
    pub seasons: Vec<Season>,
    pub error: Option<CrawlError>,
}

impl SeasonExtraction {
    fn failed(seasons: Vec<Season>, error: CrawlError) -> Self {
        Self {
            seasons,
            error: Some(error),
        }
    }

    /// Discard partial seasons when extraction failed.
    pub fn into_result(self) -> Result<Vec<Season>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.seasons),
        }
    }
}

/// Crawler for one catalog site
///
/// # Example
/// ```no_run
/// use lacartoons_core::{Crawler, CrawlConfig};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let crawler = Crawler::new("https://www.lacartoons.com", CrawlConfig::default())?;
///     let cancel = CancellationToken::new();
///
///     let pages = crawler.page_urls(&cancel).await?;
///     let shows = crawler.extract_shows(&pages[0], &cancel).await?;
///     println!("First page lists {} shows", shows.len());
///
///     Ok(())
/// }
/// ```
pub struct Crawler {
    client: PageClient,
    schema: CompiledSchema,
    root: String,
    base: Origin,
    pub(crate) config: CrawlConfig,
}

impl Crawler {
    /// Create a crawler for the catalog at `root`.
    ///
    /// # Arguments
    /// * `root` - Catalog root URL; also the origin episode links resolve against
    /// * `config` - Crawl configuration
    ///
    /// # Errors
    /// - `CrawlError::InvalidUrl` if `root` has no scheme/host
    /// - `CrawlError::Parse` if a schema selector does not compile
    /// - `CrawlError::Network` if the HTTP client cannot be created
    pub fn new(root: impl Into<String>, config: CrawlConfig) -> Result<Self> {
        let root = root.into();
        let base = Origin::parse(&root)?;
        let schema = config.schema.compile()?;
        let client = PageClient::with_config(&config.client)?;

        Ok(Self {
            client,
            schema,
            root,
            base,
            config,
        })
    }

    /// Catalog root URL this crawler was created with.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Highest catalog page number, 0 when the root has no pagination.
    ///
    /// # Errors
    /// Fetch errors, or `CrawlError::Format` if the page number is not numeric.
    pub async fn last_page(&self, cancel: &CancellationToken) -> Result<u32> {
        let html = self.client.fetch(&self.root, cancel).await?;
        let last_page = parse_last_page(&html, &self.schema, self.config.strict_landmarks, &self.root)?;
        info!(
            root = %self.root,
            last_page,
            schema_version = self.schema.version,
            "Discovered catalog pages"
        );
        Ok(last_page)
    }

    /// URLs of every catalog page, `{root}/?page={n}` for n in 1..=last page.
    pub async fn page_urls(&self, cancel: &CancellationToken) -> Result<Vec<String>> {
        let last_page = self.last_page(cancel).await?;
        Ok(catalog_page_urls(&self.root, last_page))
    }

    /// Show summaries listed on one catalog page, with no seasons yet.
    ///
    /// # Errors
    /// Fetch errors for the page itself. Missing card fields never fail.
    pub async fn extract_shows(&self, page_url: &str, cancel: &CancellationToken) -> Result<Vec<Show>> {
        let html = self.client.fetch(page_url, cancel).await?;
        let shows = parse_catalog(&html, page_url, &self.schema, self.config.strict_landmarks)?;
        info!(page = page_url, shows = shows.len(), "Scraped catalog page");
        Ok(shows)
    }

    /// Seasons and episodes of one show.
    ///
    /// Episode links resolve against the catalog root, not the show URL. Each
    /// episode's player source is resolved before it is appended; the first
    /// resolution failure ends extraction (see [`SeasonExtraction`]).
    pub async fn extract_seasons(&self, show: &Show, cancel: &CancellationToken) -> SeasonExtraction {
        let outlines = match self.fetch_outlines(&show.url, cancel).await {
            Ok(outlines) => outlines,
            Err(error) => return SeasonExtraction::failed(Vec::new(), error),
        };

        let mut seasons: Vec<Season> = outlines.iter().map(|o| Season::new(o.name.clone())).collect();

        for (index, outline) in outlines.into_iter().enumerate() {
            let mut resolved = stream::iter(outline.episodes)
                .map(|link| async move {
                    let external = self.resolve_external(&link.internal_url, cancel).await;
                    (link, external)
                })
                .buffered(self.config.episode_width());

            while let Some((link, external)) = resolved.next().await {
                match external {
                    Ok(external_url) => seasons[index].episodes.push(Episode {
                        chapter: link.chapter,
                        name: link.name,
                        internal_url: link.internal_url,
                        external_url,
                    }),
                    Err(error) => return SeasonExtraction::failed(seasons, error),
                }
            }
        }

        debug!(
            show = %show.name,
            seasons = seasons.len(),
            episodes = seasons.iter().map(|s| s.episodes.len()).sum::<usize>(),
            "Extracted seasons"
        );

        SeasonExtraction {
            seasons,
            error: None,
        }
    }

    async fn fetch_outlines(
        &self,
        show_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SeasonOutline>> {
        let html = self.client.fetch(show_url, cancel).await?;
        parse_show_page(
            &html,
            &self.base,
            &self.schema,
            self.config.season_alignment,
            self.config.strict_landmarks,
            show_url,
        )
    }

    /// Embedded player source of an episode page; empty when there is none.
    ///
    /// # Errors
    /// Fetch errors only, unless strict landmarks are enabled.
    pub async fn resolve_external(&self, internal_url: &str, cancel: &CancellationToken) -> Result<String> {
        let html = self.client.fetch(internal_url, cancel).await?;
        parse_player_source(&html, &self.schema, self.config.strict_landmarks, internal_url)
    }
}
