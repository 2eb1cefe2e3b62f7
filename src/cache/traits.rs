//! Cache trait and error types

use crate::cache::CachedResponse;
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value store for HTTP responses
///
/// Keys are produced by [`crate::cache::cache_key`]. The store has no eviction
/// policy; staleness is decided by the caller from `created_at`.
pub trait ResponseCache {
    /// Looks up a stored response
    fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>>;

    /// Stores a response, replacing any previous entry under the same key
    fn put(&mut self, key: &str, response: &CachedResponse) -> CacheResult<()>;

    /// Removes every stored response
    fn clear(&mut self) -> CacheResult<()>;

    /// Number of stored responses
    fn len(&self) -> CacheResult<u64>;

    fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }
}
