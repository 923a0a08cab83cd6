//! Unified error types for subgrab.

use std::fmt;
use std::path::PathBuf;

/// Structural elements the parsers require on a fetched page.
///
/// Carried by [`Error::MissingElement`] so callers can tell which part of
/// the expected document structure was absent and recover per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// The schema.org Movie root on a movie detail page.
    MovieRoot,
    /// The movie title marker.
    Title,
    /// The movie genre marker.
    Genre,
    /// The archive download anchor on a subtitle detail page.
    DownloadAnchor,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::MovieRoot => "schema.org Movie root",
            Element::Title => "movie title",
            Element::Genre => "movie genre",
            Element::DownloadAnchor => "download-subtitle anchor",
        };
        f.write_str(name)
    }
}

/// Unified error types for the crawl pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network-level fetch failure.
    #[error("FETCH_FAILED: {0}")]
    Fetch(String),

    /// Non-success HTTP status.
    #[error("HTTP_STATUS: {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Cache directory or entry could not be created or written.
    #[error("CACHE_IO: {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Expected document structure absent.
    #[error("PARSE_FAILED: missing {element} in {url}")]
    MissingElement { url: String, element: Element },

    /// Malformed archive bytes.
    #[error("ARCHIVE_INVALID: {0}")]
    Archive(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Cache persistence failure at `path`.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Persistence { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HttpStatus { url: "http://example.com/a".to_string(), status: 503 };
        assert!(err.to_string().contains("HTTP_STATUS"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_missing_element_names_offender() {
        let err =
            Error::MissingElement { url: "http://example.com/movie".to_string(), element: Element::MovieRoot };
        assert!(err.to_string().contains("schema.org Movie root"));
        assert!(err.to_string().contains("http://example.com/movie"));
    }

    #[test]
    fn test_persistence_keeps_path() {
        let err = Error::persistence("/tmp/cache", std::io::Error::other("denied"));
        assert!(err.to_string().contains("CACHE_IO"));
        assert!(err.to_string().contains("/tmp/cache"));
    }
}
