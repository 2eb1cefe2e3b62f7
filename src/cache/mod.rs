//! Persisted HTTP response cache
//!
//! Responses are stored in SQLite keyed by a hash of the request method and
//! URL, so a second run against the same pages does not hit the network.
//! The cache survives between runs until it is cleared explicitly.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteCache;
pub use traits::{CacheError, CacheResult, ResponseCache};

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Opens (creating if needed) the cache database at `path`
pub fn open_cache(path: &Path) -> CacheResult<SqliteCache> {
    SqliteCache::new(path)
}

/// A stored response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    /// Final URL the response was read from
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl CachedResponse {
    pub fn new(url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            status,
            body,
            created_at: Utc::now(),
        }
    }

    /// Whether the entry is older than `expire_after` at `now`
    ///
    /// Entries without an expiry never go stale.
    pub fn is_expired(&self, expire_after: Option<Duration>, now: DateTime<Utc>) -> bool {
        match expire_after {
            Some(ttl) => now - self.created_at > ttl,
            None => false,
        }
    }
}

/// Computes the cache key for a request
///
/// The key is the hex-encoded SHA-256 of `"<METHOD> <url>"`.
pub fn cache_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b" ");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
