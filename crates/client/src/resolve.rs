//! Subtitle link resolution.
//!
//! Each matching link is followed through its detail page to the packaged
//! archive, which is downloaded (cache-aware) and unpacked in place onto
//! the link. Links fan out with bounded concurrency; mutation is per-row,
//! so table order is untouched regardless of completion order.

use crate::archive::extract_subtitle_texts;
use crate::fetch::Fetch;
use crate::model::{Movie, SubtitleLink};
use crate::parse::extract_archive_url;
use futures_util::{StreamExt, stream};
use subgrab_core::Error;

/// Resolve matching subtitle links for every movie, in place.
///
/// Links whose language set does not intersect `languages` are skipped
/// without any network access. A failure on one link is logged and
/// isolated; sibling links and other movies continue. Nothing is retried.
pub async fn resolve_subtitles<F: Fetch>(
    fetcher: &F,
    movies: &mut [Movie],
    languages: &[String],
    max_concurrency: usize,
) {
    let tasks = movies
        .iter_mut()
        .flat_map(|movie| movie.subtitle_links.iter_mut())
        .filter(|link| link.url.is_some() && link.matches(languages))
        .map(|link| async move {
            let url = link.url.clone().unwrap_or_default();
            if let Err(e) = resolve_link(fetcher, link).await {
                tracing::warn!("failed to resolve {}: {}", url, e);
            }
        });

    stream::iter(tasks)
        .buffer_unordered(max_concurrency.max(1))
        .collect::<Vec<()>>()
        .await;
}

/// Follow one link: detail page, archive download, unpack.
async fn resolve_link<F: Fetch>(fetcher: &F, link: &mut SubtitleLink) -> Result<(), Error> {
    let Some(page_url) = link.url.clone() else { return Ok(()) };

    let page = fetcher.fetch_text(&page_url).await?;
    let archive_url = extract_archive_url(&page, &page_url)?;

    let archive = fetcher.fetch_bytes(&archive_url).await?;
    link.subtitles = extract_subtitle_texts(&archive)?;

    tracing::debug!("extracted {} subtitle file(s) from {}", link.subtitles.len(), archive_url);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::stub::StubFetcher;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    const DETAIL_URL: &str = "http://subs.example.com/subtitles/shawshank-english";
    const ARCHIVE_URL: &str = "http://subs.example.com/subtitle/shawshank.zip";

    fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        cursor.into_inner()
    }

    fn detail_page() -> String {
        format!(r#"<a class="download-subtitle" href="{}">download</a>"#, ARCHIVE_URL)
    }

    fn movie(links: Vec<SubtitleLink>) -> Movie {
        Movie { title: "The Shawshank Redemption".into(), genre: "Drama".into(), subtitle_links: links }
    }

    fn english() -> Vec<String> {
        vec!["English".to_string()]
    }

    #[tokio::test]
    async fn test_matching_link_gains_payloads() {
        let fetcher = StubFetcher::new()
            .respond(DETAIL_URL, detail_page())
            .respond(ARCHIVE_URL, archive(&[("a.srt", b"one"), ("b.srt", b"two")]));

        let mut movies = vec![movie(vec![SubtitleLink {
            languages: vec!["English".into()],
            url: Some(DETAIL_URL.into()),
            subtitles: Vec::new(),
        }])];

        resolve_subtitles(&fetcher, &mut movies, &english(), 4).await;

        let link = &movies[0].subtitle_links[0];
        assert_eq!(link.subtitles.len(), 2);
        assert_eq!(link.subtitles[0], b"one");
        assert_eq!(link.subtitles[1], b"two");
    }

    #[tokio::test]
    async fn test_non_matching_link_is_never_fetched() {
        let fetcher = StubFetcher::new();

        let mut movies = vec![movie(vec![SubtitleLink {
            languages: vec!["German".into()],
            url: Some(DETAIL_URL.into()),
            subtitles: Vec::new(),
        }])];

        resolve_subtitles(&fetcher, &mut movies, &english(), 4).await;

        assert!(fetcher.requests().is_empty());
        assert!(movies[0].subtitle_links[0].subtitles.is_empty());
    }

    #[tokio::test]
    async fn test_unlabeled_link_is_never_fetched() {
        let fetcher = StubFetcher::new();

        let mut movies = vec![movie(vec![SubtitleLink {
            languages: Vec::new(),
            url: Some(DETAIL_URL.into()),
            subtitles: Vec::new(),
        }])];

        resolve_subtitles(&fetcher, &mut movies, &english(), 4).await;

        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_link_failure_is_isolated_from_siblings() {
        let broken_url = "http://subs.example.com/subtitles/shawshank-broken";
        let fetcher = StubFetcher::new()
            // broken detail page: no download anchor
            .respond(broken_url, "<p>gone</p>")
            .respond(DETAIL_URL, detail_page())
            .respond(ARCHIVE_URL, archive(&[("a.srt", b"one")]));

        let mut movies = vec![movie(vec![
            SubtitleLink {
                languages: vec!["English".into()],
                url: Some(broken_url.into()),
                subtitles: Vec::new(),
            },
            SubtitleLink {
                languages: vec!["English".into()],
                url: Some(DETAIL_URL.into()),
                subtitles: Vec::new(),
            },
        ])];

        resolve_subtitles(&fetcher, &mut movies, &english(), 4).await;

        assert!(movies[0].subtitle_links[0].subtitles.is_empty());
        assert_eq!(movies[0].subtitle_links[1].subtitles.len(), 1);
    }

    #[tokio::test]
    async fn test_sequential_concurrency_still_resolves() {
        let fetcher = StubFetcher::new()
            .respond(DETAIL_URL, detail_page())
            .respond(ARCHIVE_URL, archive(&[("a.srt", b"one")]));

        let mut movies = vec![movie(vec![SubtitleLink {
            languages: vec!["English".into()],
            url: Some(DETAIL_URL.into()),
            subtitles: Vec::new(),
        }])];

        resolve_subtitles(&fetcher, &mut movies, &english(), 1).await;

        assert_eq!(movies[0].subtitle_links[0].subtitles.len(), 1);
    }
}
