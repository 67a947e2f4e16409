//! Durable access event queue backed by Redis.

pub mod redis_queue;
pub mod service;

pub use redis_queue::{DEFAULT_QUEUE_KEY, RedisQueue};
pub use service::{AccessEventQueue, QueueError, QueueResult};

#[cfg(test)]
pub use service::MockAccessEventQueue;
