//! Access event queue trait and error type.

use crate::domain::access_event::AccessEvent;
use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue connection error: {0}")]
    Connection(String),

    #[error("Queue operation error: {0}")]
    Operation(String),

    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Durable FIFO queue decoupling event emission from event persistence.
///
/// The queue lives outside process memory so the redirect server and the
/// worker can run as separate processes and a worker restart does not lose
/// queued events. Delivery is pop-removes-immediately: an event dequeued by
/// a consumer that dies before persisting it is gone; there is no
/// redelivery.
///
/// `blocking_pop` returns the raw serialized payload rather than a decoded
/// event, so malformed-payload handling stays with the consumer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessEventQueue: Send + Sync {
    /// Appends an event to the tail of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError`] on serialization or backend failure.
    async fn push(&self, event: &AccessEvent) -> QueueResult<()>;

    /// Removes and returns the payload at the head of the queue, blocking
    /// until one is available.
    ///
    /// A `None` timeout blocks indefinitely. `Ok(None)` is returned only
    /// when a finite timeout elapses with the queue still empty.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError`] on backend failure; the caller is expected to
    /// back off and retry rather than exit.
    async fn blocking_pop(&self, timeout: Option<Duration>) -> QueueResult<Option<String>>;
}
