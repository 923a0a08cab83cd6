//! Movie detail-page parsing.

use crate::model::{Movie, SubtitleLink};
use scraper::{ElementRef, Html, Selector};
use subgrab_core::{Element, Error};
use url::Url;

/// Parse a fetched movie detail document.
///
/// Returns `None` when the page carries no subtitle table, a legitimate
/// no-subtitles outcome. A missing structural element (the schema.org
/// Movie root, title, or genre) is a parse failure tagged with the
/// offending element and `request_url`; the caller decides whether to
/// skip the movie or abort.
pub fn parse_movie_page(html: &str, request_url: &str, base_url: &Url) -> Result<Option<Movie>, Error> {
    let document = Html::parse_document(html);

    let root_selector =
        Selector::parse(r#"[itemtype="http://schema.org/Movie"]"#).expect("invalid selector");
    let root = document.select(&root_selector).next().ok_or_else(|| Error::MissingElement {
        url: request_url.to_string(),
        element: Element::MovieRoot,
    })?;

    let title = marked_text(root, ".movie-main-title").ok_or_else(|| Error::MissingElement {
        url: request_url.to_string(),
        element: Element::Title,
    })?;
    let genre = marked_text(root, ".movie-genre").ok_or_else(|| Error::MissingElement {
        url: request_url.to_string(),
        element: Element::Genre,
    })?;

    let table_selector = Selector::parse("table.table.other-subs").expect("invalid selector");
    let Some(table) = document.select(&table_selector).next() else {
        return Ok(None);
    };

    // the table body holds only data rows; the header sits in thead
    let row_selector = Selector::parse("tbody > tr").expect("invalid selector");
    let lang_selector = Selector::parse("span.sub-lang").expect("invalid selector");
    let link_selector = Selector::parse("a.subtitle-download").expect("invalid selector");

    let mut subtitle_links = Vec::new();
    for row in table.select(&row_selector) {
        let languages: Vec<String> = row
            .select(&lang_selector)
            .map(element_text)
            .filter(|label| !label.is_empty())
            .collect();

        let url = row
            .select(&link_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .and_then(|href| base_url.join(href).ok())
            .map(|joined| joined.to_string());

        subtitle_links.push(SubtitleLink { languages, url, subtitles: Vec::new() });
    }

    Ok(Some(Movie { title, genre, subtitle_links }))
}

/// Trimmed text of the first element matching `selector` under `scope`.
fn marked_text(scope: ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("invalid selector");
    scope.select(&selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}
