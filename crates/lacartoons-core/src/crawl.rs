//! Full-catalog crawl
//!
//! Chains the crawler stages over every catalog page and every show. Pages
//! and shows run on ordered worker pools, so results come back in catalog
//! order whatever the pool width.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::FailurePolicy;
use crate::crawler::Crawler;
use crate::error::{CrawlError, Result};
use crate::origin::catalog_page_urls;
use crate::types::{CrawlReport, PageFailure, Show, ShowReport};

/// Progress notifications emitted during [`Crawler::crawl`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// The catalog root was read
    PagesDiscovered { last_page: u32 },
    /// One catalog page was scraped
    PageScraped { page: u32, url: String, shows: usize },
    /// One catalog page failed and was skipped
    PageFailed { page: u32, url: String, error: String },
    /// Every page is done; `shows` will be extracted
    ShowsListed { shows: usize },
    /// A show's seasons were fully extracted
    ShowCompleted {
        index: usize,
        name: String,
        seasons: usize,
        episodes: usize,
    },
    /// A show's extraction stopped early; partial seasons are kept
    ShowFailed {
        index: usize,
        name: String,
        error: String,
    },
    /// The crawl is over
    Finished {
        shows: usize,
        failed: usize,
        halted: bool,
    },
}

impl Crawler {
    /// Crawl the whole catalog.
    ///
    /// Reads the last page number, scrapes every catalog page, then extracts
    /// seasons and episodes for each show (up to `max_shows`). `on_event` is
    /// called from the crawl task, in catalog order.
    ///
    /// # Failure handling
    /// - The catalog root failing always ends the crawl with `Err`.
    /// - A page failing under `FailurePolicy::Abort` cancels outstanding work
    ///   and returns `Err`; under `SkipAndReport` it is recorded in
    ///   `page_failures`.
    /// - A show failing is recorded with its partial seasons. Under
    ///   `FailurePolicy::Abort` no further show is extracted and
    ///   `CrawlReport::halted` is set.
    /// - Cancelling `cancel` stops scheduling work. During the page stage this
    ///   returns `Err(CrawlError::Cancelled)`; during the show stage the report
    ///   collected so far is returned with `halted` set.
    pub async fn crawl<F>(&self, cancel: &CancellationToken, mut on_event: F) -> Result<CrawlReport>
    where
        F: FnMut(CrawlEvent) + Send,
    {
        let last_page = self.last_page(cancel).await?;
        on_event(CrawlEvent::PagesDiscovered { last_page });

        let crawl_token = cancel.child_token();
        let mut report = CrawlReport {
            last_page,
            ..CrawlReport::default()
        };

        let shows = self
            .scrape_pages(last_page, cancel, &crawl_token, &mut report, &mut on_event)
            .await?;
        on_event(CrawlEvent::ShowsListed { shows: shows.len() });

        self.extract_all(shows, cancel, &crawl_token, &mut report, &mut on_event)
            .await;

        info!(
            shows = report.shows.len(),
            failed = report.failed_shows(),
            episodes = report.episode_count(),
            halted = report.halted,
            "Crawl finished"
        );
        on_event(CrawlEvent::Finished {
            shows: report.shows.len(),
            failed: report.failed_shows(),
            halted: report.halted,
        });

        Ok(report)
    }

    /// Scrape every catalog page and flatten the shows in page order.
    async fn scrape_pages<F>(
        &self,
        last_page: u32,
        cancel: &CancellationToken,
        crawl_token: &CancellationToken,
        report: &mut CrawlReport,
        on_event: &mut F,
    ) -> Result<Vec<Show>>
    where
        F: FnMut(CrawlEvent) + Send,
    {
        let urls = catalog_page_urls(self.root(), last_page);

        let mut pages = stream::iter(urls.into_iter().zip(1u32..))
            .map(|(url, page)| async move {
                let result = self.extract_shows(&url, crawl_token).await;
                (page, url, result)
            })
            .buffered(self.config.page_width());

        let mut shows = Vec::new();
        while let Some((page, url, result)) = pages.next().await {
            match result {
                Ok(found) => {
                    on_event(CrawlEvent::PageScraped {
                        page,
                        url,
                        shows: found.len(),
                    });
                    shows.extend(found);
                }
                Err(err) if cancel.is_cancelled() => {
                    warn!(page, error = %err, "Crawl cancelled during page scraping");
                    return Err(CrawlError::Cancelled);
                }
                Err(err) => match self.config.page_policy {
                    FailurePolicy::Abort => {
                        crawl_token.cancel();
                        error!(page, url = %url, error = %err, "Catalog page failed, stopping crawl");
                        return Err(err);
                    }
                    FailurePolicy::SkipAndReport => {
                        warn!(page, url = %url, error = %err, "Catalog page failed, skipping");
                        on_event(CrawlEvent::PageFailed {
                            page,
                            url: url.clone(),
                            error: err.to_string(),
                        });
                        report.page_failures.push(PageFailure {
                            page,
                            url,
                            error: err,
                        });
                    }
                },
            }
        }

        if let Some(max) = self.config.max_shows {
            shows.truncate(max);
        }
        Ok(shows)
    }

    /// Extract seasons for each show, recording every outcome in `report`.
    async fn extract_all<F>(
        &self,
        shows: Vec<Show>,
        cancel: &CancellationToken,
        crawl_token: &CancellationToken,
        report: &mut CrawlReport,
        on_event: &mut F,
    ) where
        F: FnMut(CrawlEvent) + Send,
    {
        let mut extracted = stream::iter(shows.into_iter().enumerate())
            .map(|(index, show)| async move {
                let extraction = self.extract_seasons(&show, crawl_token).await;
                (index, show, extraction)
            })
            .buffered(self.config.show_width());

        while let Some((index, mut show, extraction)) = extracted.next().await {
            show.seasons = extraction.seasons;

            let Some(err) = extraction.error else {
                on_event(CrawlEvent::ShowCompleted {
                    index,
                    name: show.name.clone(),
                    seasons: show.seasons.len(),
                    episodes: show.episode_count(),
                });
                report.shows.push(ShowReport { show, error: None });
                continue;
            };

            warn!(show = %show.name, url = %show.url, error = %err, "Show extraction failed");
            on_event(CrawlEvent::ShowFailed {
                index,
                name: show.name.clone(),
                error: err.to_string(),
            });
            report.shows.push(ShowReport {
                show,
                error: Some(err),
            });

            if cancel.is_cancelled() || self.config.show_policy == FailurePolicy::Abort {
                crawl_token.cancel();
                report.halted = true;
                break;
            }
        }
    }
}
