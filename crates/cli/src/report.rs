//! Text report for the final movie collection.

use std::fmt::Write;
use subgrab_client::{Movie, SubtitleLink};

/// Render a per-movie summary of the crawl.
pub fn render(movies: &[Movie]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} movie(s)", movies.len());

    for movie in movies {
        let _ = writeln!(out, "\n{} [{}]", movie.title, movie.genre);
        for link in &movie.subtitle_links {
            let _ = writeln!(out, "  {}", render_link(link));
        }
    }

    out
}

fn render_link(link: &SubtitleLink) -> String {
    let languages =
        if link.languages.is_empty() { "(no language)".to_string() } else { link.languages.join(", ") };

    match (&link.url, link.subtitles.len()) {
        (None, _) => format!("{}: no download link", languages),
        (Some(url), 0) => format!("{}: {}", languages, url),
        (Some(url), count) => {
            let bytes: usize = link.subtitles.iter().map(Vec::len).sum();
            format!("{}: {} subtitle file(s), {} bytes ({})", languages, count, bytes, url)
        }
    }
}
