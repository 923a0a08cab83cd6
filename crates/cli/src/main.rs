//! subgrab entry point.
//!
//! Loads configuration, crawls the configured listing pages, resolves
//! subtitle archives for the requested languages, and prints the final
//! collection. Logging goes to stderr so stdout stays clean for the
//! report or JSON output.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use subgrab_client::{FetchConfig, HttpFetcher, pipeline};
use subgrab_core::{AppConfig, CacheStore};
use tracing_subscriber::EnvFilter;

mod report;

/// Crawl a subtitle listing site and download subtitles by language.
#[derive(Debug, Parser)]
#[command(name = "subgrab", version, about)]
struct Cli {
    /// Base site URL to crawl.
    #[arg(long)]
    base_uri: Option<String>,

    /// Accepted language label (repeatable; default: English).
    #[arg(long = "language")]
    languages: Vec<String>,

    /// First listing page, inclusive.
    #[arg(long)]
    first_page: Option<u32>,

    /// Last listing page, exclusive.
    #[arg(long)]
    last_page: Option<u32>,

    /// Cache directory for raw responses.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Maximum cached-response age in seconds.
    #[arg(long)]
    cache_max_age_secs: Option<u64>,

    /// Maximum concurrent fetches (1 = strictly sequential).
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Print the full collection as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Overlay the flags that were given onto the loaded configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(base_uri) = &self.base_uri {
            config.base_uri = base_uri.clone();
        }
        if !self.languages.is_empty() {
            config.languages = self.languages.clone();
        }
        if let Some(first_page) = self.first_page {
            config.first_page = first_page;
        }
        if let Some(last_page) = self.last_page {
            config.last_page = last_page;
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = cache_dir.clone();
        }
        if let Some(cache_max_age_secs) = self.cache_max_age_secs {
            config.cache_max_age_secs = cache_max_age_secs;
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.max_concurrency = max_concurrency;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    cli.apply(&mut config);
    config.validate()?;

    tracing::info!(
        "crawling {} pages {}..{} for languages {:?}",
        config.base_uri,
        config.first_page,
        config.last_page,
        config.languages
    );

    let store = CacheStore::new(&config.cache_dir, config.cache_max_age());
    let fetcher = HttpFetcher::new(
        FetchConfig { user_agent: config.user_agent.clone(), timeout: config.timeout() },
        store,
    )?;

    let movies = pipeline::run(&fetcher, &config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
    } else {
        print!("{}", report::render(&movies));
    }

    Ok(())
}
