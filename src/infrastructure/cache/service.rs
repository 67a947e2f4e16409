//! Resolution cache trait and error type.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short code → destination URL mappings.
///
/// The cache is a performance projection of the link store, never the source
/// of truth: presence means the mapping was valid at population time, and
/// absence means nothing at all.
///
/// Unlike a fail-open cache, `get` surfaces backend failures: on the
/// redirect path an unreachable cache is a hard error, while "key absent"
/// is an ordinary miss. Callers that populate the cache decide themselves
/// whether a `set` failure matters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the destination URL cached for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on a hit
    /// - `Ok(None)` when the key is absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot be reached or the
    /// operation fails, as opposed to a plain miss.
    async fn get(&self, code: &str) -> CacheResult<Option<String>>;

    /// Stores a code → URL mapping with the given time-to-live.
    ///
    /// Concurrent writers may race on the same key; last writer wins.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on backend failure.
    async fn set(&self, code: &str, url: &str, ttl: Duration) -> CacheResult<()>;
}
