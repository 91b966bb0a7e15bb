mod report;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lacartoons_core::{
    ClientConfig, CrawlConfig, CrawlEvent, Crawler, FailurePolicy, SeasonAlignment, SiteSchema,
    DEFAULT_CATALOG_ROOT,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lacartoons")]
#[command(about = "Crawl the LaCartoons catalog and list every show, season and episode", long_about = None)]
struct Cli {
    /// Catalog root URL
    #[arg(default_value = DEFAULT_CATALOG_ROOT)]
    root: String,

    /// Stop after this many shows
    #[arg(long)]
    max_shows: Option<usize>,

    /// Catalog pages fetched at once
    #[arg(long, default_value = "1")]
    page_workers: usize,

    /// Shows extracted at once
    #[arg(long, default_value = "1")]
    show_workers: usize,

    /// Episode pages resolved at once within a season
    #[arg(long, default_value = "1")]
    episode_workers: usize,

    /// Per-request timeout in seconds
    #[arg(
        long,
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..),
        conflicts_with = "no_timeout"
    )]
    timeout: u64,

    /// Wait on every request with no deadline
    #[arg(long)]
    no_timeout: bool,

    /// JSON file replacing the built-in selector table
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Fail when expected markup is missing instead of using defaults
    #[arg(long)]
    strict: bool,

    /// How season headings are paired with episode lists
    #[arg(long, value_enum, default_value_t = Alignment::Positional)]
    alignment: Alignment,

    /// Skip catalog pages that fail instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Stop at the first show that fails
    #[arg(long)]
    fail_fast: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Alignment {
    Positional,
    Adjacent,
    Strict,
}

impl From<Alignment> for SeasonAlignment {
    fn from(value: Alignment) -> Self {
        match value {
            Alignment::Positional => SeasonAlignment::Positional,
            Alignment::Adjacent => SeasonAlignment::Adjacent,
            Alignment::Strict => SeasonAlignment::Strict,
        }
    }
}

impl Cli {
    fn crawl_config(&self) -> Result<CrawlConfig, Box<dyn std::error::Error>> {
        let schema = match &self.schema {
            Some(path) => SiteSchema::from_json(&std::fs::read_to_string(path)?)?,
            None => SiteSchema::default(),
        };

        Ok(CrawlConfig {
            client: ClientConfig {
                timeout_secs: (!self.no_timeout).then_some(self.timeout),
            },
            schema,
            page_policy: if self.keep_going {
                FailurePolicy::SkipAndReport
            } else {
                FailurePolicy::Abort
            },
            show_policy: if self.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::SkipAndReport
            },
            max_shows: self.max_shows,
            page_concurrency: self.page_workers,
            show_concurrency: self.show_workers,
            episode_concurrency: self.episode_workers,
            strict_landmarks: self.strict,
            season_alignment: self.alignment.into(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let crawler = Crawler::new(cli.root.clone(), cli.crawl_config()?)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing in-flight requests");
            on_interrupt.cancel();
        }
    });

    let mut total = 0;
    let report = crawler
        .crawl(&cancel, |event| match event {
            CrawlEvent::ShowsListed { shows } => {
                total = shows;
                info!(shows, "Extracting shows");
            }
            CrawlEvent::ShowCompleted {
                index,
                name,
                seasons,
                episodes,
            } => {
                info!(seasons, episodes, "[{}/{}] {}", index + 1, total, name);
            }
            _ => {}
        })
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render_tree(&report));
    }

    Ok(())
}
