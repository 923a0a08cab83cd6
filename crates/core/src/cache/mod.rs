//! Filesystem-backed response cache.
//!
//! Persists raw response bytes, one file per distinct request URI,
//! content-addressed by SHA-256 and aged by file modification time.
//! It supports:
//!
//! - Content-addressed entry naming (hex digest + fixed suffix)
//! - Time-bounded staleness (default 3600 seconds)
//! - Atomic overwrite via write-to-temp-then-rename

pub mod key;
pub mod store;

pub use crate::Error;

pub use key::compute_cache_key;
pub use store::CacheStore;
