//! Redis-backed resolution cache.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for code → destination lookups on the redirect hot path.
///
/// Uses `ConnectionManager` for connection reuse and reconnection. Errors
/// propagate to the caller; the resolver treats a GET failure as a hard
/// request failure rather than silently falling through to the store.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "short:".to_string(),
        })
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, code: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        let value: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| CacheError::Operation(format!("Redis GET failed for {}: {}", key, e)))?;

        match &value {
            Some(url) => debug!("Cache HIT: {} -> {}", code, url),
            None => debug!("Cache MISS: {}", code),
        }

        Ok(value)
    }

    async fn set(&self, code: &str, url: &str, ttl: Duration) -> CacheResult<()> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(&key, url, ttl.as_secs())
            .await
            .map_err(|e| CacheError::Operation(format!("Redis SET failed for {}: {}", key, e)))?;

        debug!("Cache SET: {} -> {} (TTL: {}s)", code, url, ttl.as_secs());
        Ok(())
    }
}
