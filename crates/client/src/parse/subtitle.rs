//! Subtitle detail-page parsing.

use scraper::{Html, Selector};
use subgrab_core::{Element, Error};
use url::Url;

/// Extract the packaged-archive download URL from a subtitle detail page.
///
/// The site marks the anchor with the `download-subtitle` class and its
/// hrefs are absolute; joining against the page URL also tolerates
/// relative ones. A missing anchor is a parse failure tagged with
/// `request_url`.
pub fn extract_archive_url(html: &str, request_url: &str) -> Result<String, Error> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.download-subtitle").expect("invalid selector");

    let href = document
        .select(&selector)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or_else(|| Error::MissingElement {
            url: request_url.to_string(),
            element: Element::DownloadAnchor,
        })?;

    let page_url =
        Url::parse(request_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", request_url, e)))?;
    let archive_url =
        page_url.join(href).map_err(|e| Error::InvalidUrl(format!("{}: {}", href, e)))?;

    Ok(archive_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://subs.example.com/subtitles/shawshank-english";

    #[test]
    fn test_absolute_href_passes_through() {
        let html = r#"<a class="download-subtitle" href="http://subs.example.com/subtitle/shawshank.zip">download</a>"#;
        let url = extract_archive_url(html, URL).unwrap();
        assert_eq!(url, "http://subs.example.com/subtitle/shawshank.zip");
    }

    #[test]
    fn test_relative_href_resolves_against_page() {
        let html = r#"<a class="download-subtitle" href="/subtitle/shawshank.zip">download</a>"#;
        let url = extract_archive_url(html, URL).unwrap();
        assert_eq!(url, "http://subs.example.com/subtitle/shawshank.zip");
    }

    #[test]
    fn test_missing_anchor_is_tagged() {
        let html = r#"<a class="other-link" href="/elsewhere">nope</a>"#;
        let result = extract_archive_url(html, URL);
        assert!(matches!(
            result,
            Err(Error::MissingElement { element: Element::DownloadAnchor, ref url }) if url == URL
        ));
    }
}
