//! Cache store with time-bounded staleness.
//!
//! One file per distinct request URI, named by the URI's SHA-256 digest
//! with a fixed suffix. The file's modification time is the staleness
//! clock: entries younger than the configured threshold are served
//! without touching the network.

use super::key::compute_cache_key;
use crate::Error;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Suffix appended to every cache entry file.
const ENTRY_SUFFIX: &str = ".subgrab";

/// Handle to the on-disk response cache.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
    max_age: Duration,
}

impl CacheStore {
    /// Create a cache store rooted at `root`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self { root: root.into(), max_age }
    }

    /// On-disk path of the entry for `uri`.
    pub fn entry_path(&self, uri: &str) -> PathBuf {
        self.root.join(format!("{}{}", compute_cache_key(uri), ENTRY_SUFFIX))
    }

    /// Return cached bytes for `uri`, or run `fetch` and persist its result.
    ///
    /// A cached entry is served iff its age is below the staleness
    /// threshold. On a miss or a stale entry the `fetch` future runs and
    /// its bytes overwrite the entry atomically (write-to-temp, then
    /// rename): an interrupted fetch never leaves a partial entry, and
    /// concurrent writers for the same key settle last-writer-wins.
    ///
    /// Fetch errors propagate unchanged; nothing is retried or recovered
    /// here.
    pub async fn get_or_fetch<F, Fut>(&self, uri: &str, fetch: F) -> Result<Vec<u8>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, Error>>,
    {
        let path = self.entry_path(uri);

        if let Some(bytes) = self.read_fresh(&path).await? {
            tracing::debug!("cache hit for {} ({} bytes)", uri, bytes.len());
            return Ok(bytes);
        }

        let bytes = fetch().await?;
        self.persist(&path, &bytes).await?;
        tracing::debug!("cached {} ({} bytes)", uri, bytes.len());

        Ok(bytes)
    }

    /// Read the entry at `path` if it exists and is younger than the
    /// staleness threshold.
    async fn read_fresh(&self, path: &Path) -> Result<Option<Vec<u8>>, Error> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::persistence(path, e)),
        };

        let modified = metadata.modified().map_err(|e| Error::persistence(path, e))?;
        let age = SystemTime::now().duration_since(modified).unwrap_or_default();
        if age >= self.max_age {
            return Ok(None);
        }

        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            // entry removed between the stat and the read
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::persistence(path, e)),
        }
    }

    /// Atomically overwrite the entry at `path` with `bytes`.
    async fn persist(&self, path: &Path, bytes: &[u8]) -> Result<(), Error> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::persistence(&self.root, e))?;

        let root = self.root.clone();
        let path = path.to_path_buf();
        let bytes = bytes.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut tmp =
                tempfile::NamedTempFile::new_in(&root).map_err(|e| Error::persistence(&root, e))?;
            tmp.write_all(&bytes).map_err(|e| Error::persistence(tmp.path(), e))?;
            tmp.persist(&path).map_err(|e| Error::persistence(&path, e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| Error::persistence(&self.root, std::io::Error::other(e)))?
    }
}
