//! Content-addressed cache key generation.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request URI.
///
/// The key is the hex-encoded SHA-256 digest of the URI string: the same
/// URI always maps to the same entry, and distinct URIs never collide.
pub fn compute_cache_key(uri: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(uri.as_bytes());
    hex::encode(hasher.finalize())
}
