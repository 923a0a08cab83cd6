//! End-to-end crawl driver.
//!
//! Composes listing crawl, movie-page parsing, and subtitle resolution
//! into one run. Movie pages fan out with bounded concurrency; `buffered`
//! yields in input order, so the collection keeps listing-discovery order
//! no matter how fetches interleave.

use crate::fetch::Fetch;
use crate::model::Movie;
use crate::parse::{extract_detail_pages, parse_movie_page};
use crate::resolve::resolve_subtitles;
use futures_util::{StreamExt, stream};
use std::ops::Range;
use subgrab_core::{AppConfig, Error};
use url::Url;

/// Crawl the listing pages and return discovered detail-page URLs, in
/// listing order.
///
/// A page that fails to fetch is logged and skipped; the page range is a
/// fixed input, with no last-page detection.
pub async fn crawl_listing<F: Fetch>(fetcher: &F, base_url: &Url, pages: Range<u32>) -> Vec<String> {
    let mut detail_pages = Vec::new();

    for page in pages {
        let page_url = match base_url.join(&format!("browse/page-{}", page)) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("cannot build URL for listing page {}: {}", page, e);
                continue;
            }
        };

        let html = match fetcher.fetch_text(page_url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("skipping listing page {}: {}", page_url, e);
                continue;
            }
        };

        detail_pages.extend(extract_detail_pages(&html, base_url));
    }

    detail_pages
}

/// Run the whole pipeline: crawl, parse, resolve.
///
/// Movies whose detail page fails to fetch or parse are logged and
/// skipped, as are movies without a subtitle table; everything else lands
/// in the returned collection in discovery order, with matching subtitle
/// links carrying their extracted payloads.
pub async fn run<F: Fetch>(fetcher: &F, config: &AppConfig) -> Result<Vec<Movie>, Error> {
    let base_url = Url::parse(&config.base_uri)
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_uri, e)))?;

    let detail_pages = crawl_listing(fetcher, &base_url, config.page_range()).await;
    tracing::info!("discovered {} movie detail page(s)", detail_pages.len());

    let base_ref = &base_url;
    let parsed = stream::iter(detail_pages.iter().map(|url| async move {
        match fetch_movie(fetcher, url, base_ref).await {
            Ok(movie) => movie,
            Err(e) => {
                tracing::warn!("skipping movie page {}: {}", url, e);
                None
            }
        }
    }))
    .buffered(config.max_concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut movies: Vec<Movie> = parsed.into_iter().flatten().collect();
    tracing::info!("parsed {} movie(s) with subtitle data", movies.len());

    resolve_subtitles(fetcher, &mut movies, &config.languages, config.max_concurrency).await;

    Ok(movies)
}

/// Fetch and parse one movie detail page.
async fn fetch_movie<F: Fetch>(fetcher: &F, url: &str, base_url: &Url) -> Result<Option<Movie>, Error> {
    let html = fetcher.fetch_text(url).await?;
    let movie = parse_movie_page(&html, url, base_url)?;
    if movie.is_none() {
        tracing::debug!("no subtitle table on {}", url);
    }
    Ok(movie)
}
