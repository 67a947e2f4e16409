//! Redirect resolution service.
//!
//! The single per-request entry point of the hot path: cache-aside lookup,
//! store fallback on miss, expiry enforcement, lazy cache population, and
//! fire-and-forget emission of the access event.

use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::queue::AccessEventQueue;

/// Client metadata captured from the inbound request.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

/// Service resolving short codes to destination URLs.
///
/// Collaborators are injected as trait objects so tests can substitute
/// fakes for the link store, cache, and queue.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    queue: Arc<dyn AccessEventQueue>,
    cache_ttl: Duration,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        queue: Arc<dyn AccessEventQueue>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            links,
            cache,
            queue,
            cache_ttl,
        }
    }

    /// Resolves a short code to its destination URL.
    ///
    /// Cache-aside: the cache is consulted first and populated lazily from
    /// the store on a miss. Expired links resolve exactly like absent ones.
    /// A cache backend failure (distinct from "key absent") fails the
    /// request: correctness over availability when the cache is
    /// unreachable.
    ///
    /// Every successful resolution emits an [`AccessEvent`] from a detached
    /// task: enqueueing never delays the response, and an enqueue failure is
    /// logged, not surfaced.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty code (no cache or store access)
    /// - [`AppError::NotFound`] for absent, inactive, or expired links
    /// - [`AppError::Internal`] when the cache backend fails
    pub async fn resolve(&self, code: &str, client: ClientInfo) -> Result<String, AppError> {
        if code.is_empty() {
            return Err(AppError::bad_request("Short code must not be empty", json!({})));
        }

        let destination = match self.cache.get(code).await {
            Ok(Some(cached_url)) => {
                counter!("redirect_cache_hits_total").increment(1);
                cached_url
            }
            Ok(None) => {
                counter!("redirect_cache_misses_total").increment(1);

                let link = self
                    .links
                    .find_active_by_code(code)
                    .await?
                    .ok_or_else(|| not_found(code))?;

                if link.is_expired() {
                    return Err(not_found(code));
                }

                // Populate the cache from a detached task; a failed write
                // only costs the next request a store round trip.
                let cache = Arc::clone(&self.cache);
                let key = code.to_owned();
                let url = link.original_url.clone();
                let ttl = self.cache_ttl;
                tokio::spawn(async move {
                    if let Err(e) = cache.set(&key, &url, ttl).await {
                        warn!("Failed to cache {}: {}", key, e);
                    }
                });

                link.original_url
            }
            Err(e) => {
                warn!("Cache lookup failed for {}: {}", code, e);
                return Err(AppError::internal("Cache backend unavailable", json!({})));
            }
        };

        let event = AccessEvent::new(code, client.ip, client.user_agent);
        let queue = Arc::clone(&self.queue);
        tokio::spawn(async move {
            if let Err(e) = queue.push(&event).await {
                counter!("access_events_dropped_total").increment(1);
                warn!("Failed to enqueue access event for {}: {}", event.code, e);
            }
        });

        debug!("Resolved {} -> {}", code, destination);
        counter!("redirects_total").increment(1);
        Ok(destination)
    }
}

fn not_found(code: &str) -> AppError {
    // Absent, inactive, and expired links are indistinguishable to clients.
    AppError::not_found("Link not found or expired", json!({ "code": code }))
}
