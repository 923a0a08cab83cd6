//! Crawl output data model.

use serde::{Serialize, Serializer};

/// One row of a movie's subtitle table.
///
/// A row may carry any combination of language labels and download link;
/// rows with neither still appear, preserving row-for-row correspondence
/// with the source table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubtitleLink {
    /// Language labels as presented by the site (may be empty).
    pub languages: Vec<String>,

    /// Absolute subtitle detail-page URL, when the row carries one.
    pub url: Option<String>,

    /// Extracted subtitle payloads, populated by a successful resolve.
    #[serde(serialize_with = "serialize_payloads")]
    pub subtitles: Vec<Vec<u8>>,
}

impl SubtitleLink {
    /// Whether this link's language set intersects `filter`.
    ///
    /// Matching is case-sensitive and exact; an empty language set never
    /// matches.
    pub fn matches(&self, filter: &[String]) -> bool {
        self.languages.iter().any(|lang| filter.iter().any(|f| f == lang))
    }
}

/// One movie discovered on the listing, with its subtitle table rows.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub title: String,
    pub genre: String,
    /// Subtitle table rows in source order.
    pub subtitle_links: Vec<SubtitleLink>,
}

/// Subtitle payloads are text; render them lossy for JSON output.
fn serialize_payloads<S: Serializer>(payloads: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(payloads.iter().map(|p| String::from_utf8_lossy(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(languages: &[&str]) -> SubtitleLink {
        SubtitleLink { languages: languages.iter().map(|s| s.to_string()).collect(), ..Default::default() }
    }

    #[test]
    fn test_matches_intersection() {
        let filter = vec!["English".to_string(), "French".to_string()];
        assert!(link(&["English"]).matches(&filter));
        assert!(link(&["Dutch", "French"]).matches(&filter));
        assert!(!link(&["German"]).matches(&filter));
    }

    #[test]
    fn test_empty_language_set_never_matches() {
        let filter = vec!["English".to_string()];
        assert!(!link(&[]).matches(&filter));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = vec!["English".to_string()];
        assert!(!link(&["english"]).matches(&filter));
        assert!(!link(&["ENGLISH"]).matches(&filter));
    }
}
