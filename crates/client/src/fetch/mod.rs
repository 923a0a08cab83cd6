//! Cache-aware HTTP fetch pipeline.
//!
//! Raw-byte retrieval goes through the [`CacheStore`]: the network is only
//! touched on a cache miss or a stale entry, and every request carries the
//! configured identifying User-Agent. Redirects are handled by the
//! transport; a non-success status is an error here, never retried.
//!
//! HTML is parsed separately by the sync functions in [`crate::parse`],
//! which take fetched text and return owned data.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use subgrab_core::{CacheStore, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "subgrab/0.1")
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "subgrab/0.1".to_string(), timeout: Duration::from_millis(20_000) }
    }
}

/// Byte-level fetch seam.
///
/// The crawl, parse, and resolve layers depend on this trait rather than a
/// concrete HTTP client, so tests can substitute canned responses and
/// assert on call counts.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the raw response bytes for `url`.
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, Error>;

    /// Fetch `url` and decode the body as UTF-8 text (lossy), for HTML
    /// documents.
    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        let bytes = self.fetch_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// reqwest-backed fetcher with the filesystem cache in front.
pub struct HttpFetcher {
    http: reqwest::Client,
    store: CacheStore,
}

impl HttpFetcher {
    /// Create a new fetcher with the given configuration and cache store.
    pub fn new(config: FetchConfig, store: CacheStore) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Fetch(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, store })
    }

    /// Perform the actual GET for a cache miss.
    async fn get(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("network error for {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read response for {}: {}", url, e)))?;

        tracing::debug!("fetched {} ({} bytes)", url, bytes.len());

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, Error> {
        let bytes = self.store.get_or_fetch(url, || self.get(url)).await?;
        Ok(Bytes::from(bytes))
    }
}
