//! Redis list implementation of the access event queue.

use super::service::{AccessEventQueue, QueueError, QueueResult};
use crate::domain::access_event::AccessEvent;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Default list key shared by producer and consumer processes.
pub const DEFAULT_QUEUE_KEY: &str = "access_logs";

/// Access event queue on a single Redis list.
///
/// `RPUSH` appends at the tail, `BLPOP` removes from the head, which gives
/// FIFO delivery per queue instance. The list is the serialization point for
/// any number of producers and consumers.
pub struct RedisQueue {
    client: ConnectionManager,
    queue_key: String,
}

impl RedisQueue {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Connection`] if the URL is invalid or the
    /// backend is unreachable.
    pub async fn connect(redis_url: &str, queue_key: impl Into<String>) -> QueueResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| QueueError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| QueueError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| QueueError::Connection(format!("Redis PING failed: {}", e)))?;

        let queue_key = queue_key.into();
        info!("Access event queue ready on list '{}'", queue_key);

        Ok(Self {
            client: manager,
            queue_key,
        })
    }
}

#[async_trait]
impl AccessEventQueue for RedisQueue {
    async fn push(&self, event: &AccessEvent) -> QueueResult<()> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.client.clone();

        conn.rpush::<_, _, ()>(&self.queue_key, &payload)
            .await
            .map_err(|e| {
                QueueError::Operation(format!("Redis RPUSH failed for {}: {}", self.queue_key, e))
            })?;

        debug!("Enqueued access event for {}", event.code);
        Ok(())
    }

    async fn blocking_pop(&self, timeout: Option<Duration>) -> QueueResult<Option<String>> {
        // BLPOP with a zero timeout blocks until an element arrives.
        let timeout_secs = timeout.map(|t| t.as_secs_f64()).unwrap_or(0.0);
        let mut conn = self.client.clone();

        let reply: Option<(String, String)> = conn
            .blpop(&self.queue_key, timeout_secs)
            .await
            .map_err(|e| {
                QueueError::Operation(format!("Redis BLPOP failed for {}: {}", self.queue_key, e))
            })?;

        Ok(reply.map(|(_key, payload)| payload))
    }
}
