//! Background consumer draining the access event queue.
//!
//! Runs as its own process (`src/bin/worker.rs`), independent of request
//! latency. Delivery is at-most-once on the consumer side: the queue's pop
//! removes the event immediately, so a crash between pop and persist loses
//! that event. Connectivity failures are retried with a fixed backoff;
//! data failures (malformed payload, vanished link) are logged and dropped,
//! since retrying them cannot succeed.

use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::domain::access_event::AccessEvent;
use crate::domain::entities::NewAccessLog;
use crate::domain::repositories::{AccessLogRepository, LinkRepository};
use crate::infrastructure::queue::AccessEventQueue;

/// Long-running consumer that enriches and persists access events.
///
/// Multiple consumers may drain the same queue; the queue is the
/// serialization point and duplicate access rows are acceptable.
pub struct LogConsumer {
    queue: Arc<dyn AccessEventQueue>,
    links: Arc<dyn LinkRepository>,
    access_logs: Arc<dyn AccessLogRepository>,
    retry_backoff: Duration,
}

impl LogConsumer {
    pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(5);

    /// Creates a new consumer over the given queue and store handles.
    pub fn new(
        queue: Arc<dyn AccessEventQueue>,
        links: Arc<dyn LinkRepository>,
        access_logs: Arc<dyn AccessLogRepository>,
    ) -> Self {
        Self {
            queue,
            links,
            access_logs,
            retry_backoff: Self::DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Overrides the backoff applied after a queue connectivity failure.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Drains the queue forever.
    ///
    /// The blocking pop is the only unbounded wait in the system and it is
    /// intentional: it replaces a polling loop. A queue transport failure
    /// never exits the loop; the consumer backs off and retries. There is
    /// no cancellation path beyond process termination.
    pub async fn run(&self) {
        info!("Log consumer started, waiting for access events");

        loop {
            let payload = match self.queue.blocking_pop(None).await {
                Ok(Some(payload)) => payload,
                Ok(None) => continue,
                Err(e) => {
                    error!(
                        "Queue unavailable: {}. Retrying in {}s",
                        e,
                        self.retry_backoff.as_secs()
                    );
                    sleep(self.retry_backoff).await;
                    continue;
                }
            };

            self.process_payload(&payload).await;
        }
    }

    /// Deserializes, enriches, and persists one queued payload.
    ///
    /// Never returns an error: each failure class is terminal for the event
    /// and must not take the loop down with it.
    pub async fn process_payload(&self, payload: &str) {
        let event: AccessEvent = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                counter!("access_events_malformed_total").increment(1);
                warn!("Dropping malformed access event payload: {}", e);
                return;
            }
        };

        // Enrichment happens here, not at emission time, so the redirect
        // path pays no second store round trip.
        let link_id = match self.links.find_active_id_by_code(&event.code).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                counter!("access_events_orphaned_total").increment(1);
                warn!(
                    "Dropping access event for {}: link no longer resolves",
                    event.code
                );
                return;
            }
            Err(e) => {
                warn!(
                    "Dropping access event for {}: link lookup failed: {}",
                    event.code, e
                );
                return;
            }
        };

        let record = NewAccessLog {
            link_id,
            short_code: event.code.clone(),
            ip_address: event.ip,
            user_agent: event.ua,
            visited_at: chrono::DateTime::from_timestamp(event.ts, 0)
                .unwrap_or_else(chrono::Utc::now),
        };

        match self.access_logs.save(record).await {
            Ok(()) => {
                counter!("access_events_persisted_total").increment(1);
                debug!("Persisted access record for {}", event.code);
            }
            Err(e) => {
                // Not retried or requeued: the event is lost once persistence
                // fails. Kept visible in the logs rather than silently masked.
                error!("Failed to persist access record for {}: {}", event.code, e);
            }
        }
    }
}
