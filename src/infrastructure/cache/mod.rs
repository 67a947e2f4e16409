//! Resolution cache backed by Redis.

pub mod redis_cache;
pub mod service;

pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
