//! Detail-page discovery on browse listing pages.

use scraper::{Html, Selector};
use url::Url;

/// Extract absolute movie detail-page URLs from one listing document.
///
/// Every `.media-list` container is walked in document order; within each,
/// every list item contributes the first anchor inside its `.media-body`.
/// Items without a media-body are skipped, as are anchors whose href does
/// not resolve against the base URL.
pub fn extract_detail_pages(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let list_selector = Selector::parse(".media-list").expect("invalid selector");
    let item_selector = Selector::parse("li").expect("invalid selector");
    let body_selector = Selector::parse(".media-body").expect("invalid selector");
    let anchor_selector = Selector::parse("a[href]").expect("invalid selector");

    let mut pages = Vec::new();
    for list in document.select(&list_selector) {
        for item in list.select(&item_selector) {
            let Some(body) = item.select(&body_selector).next() else { continue };
            let Some(anchor) = body.select(&anchor_selector).next() else { continue };
            let Some(href) = anchor.value().attr("href") else { continue };

            match base_url.join(href) {
                Ok(url) => pages.push(url.to_string()),
                Err(e) => tracing::warn!("unresolvable href {:?} on listing page: {}", href, e),
            }
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://subs.example.com").unwrap()
    }

    #[test]
    fn test_extracts_items_in_document_order() {
        let html = r#"
            <html><body>
                <ul class="media-list">
                    <li><div class="media-body"><a href="/movie-imdb/tt0111161">Shawshank</a></div></li>
                    <li><div class="media-body"><a href="/movie-imdb/tt0068646">Godfather</a></div></li>
                </ul>
                <ul class="media-list">
                    <li><div class="media-body"><a href="/movie-imdb/tt0071562">Godfather II</a></div></li>
                </ul>
            </body></html>
        "#;

        let pages = extract_detail_pages(html, &base());
        assert_eq!(
            pages,
            vec![
                "http://subs.example.com/movie-imdb/tt0111161",
                "http://subs.example.com/movie-imdb/tt0068646",
                "http://subs.example.com/movie-imdb/tt0071562",
            ]
        );
    }

    #[test]
    fn test_skips_items_without_media_body() {
        let html = r#"
            <ul class="media-list">
                <li><div class="media-left"><a href="/skipped">no body</a></div></li>
                <li><div class="media-body"><a href="/movie-imdb/tt0111161">kept</a></div></li>
            </ul>
        "#;

        let pages = extract_detail_pages(html, &base());
        assert_eq!(pages, vec!["http://subs.example.com/movie-imdb/tt0111161"]);
    }

    #[test]
    fn test_ignores_lists_without_marker_class() {
        let html = r#"
            <ul class="other-list">
                <li><div class="media-body"><a href="/movie-imdb/tt0111161">hidden</a></div></li>
            </ul>
        "#;

        let pages = extract_detail_pages(html, &base());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_empty_page_yields_no_pages() {
        let pages = extract_detail_pages("<html><body></body></html>", &base());
        assert!(pages.is_empty());
    }
}
