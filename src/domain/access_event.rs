//! Access event model for asynchronous click logging.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A record of one successful resolution, queued for async persistence.
///
/// Created in the redirect path and pushed onto the durable access event
/// queue; the worker later enriches it with the owning link's identifier.
/// The short wire field names are the queue's JSON contract: producer and
/// consumer may run as different processes, so the names must not drift.
///
/// Only resolutions that produced a redirect emit an event; 404 and expired
/// outcomes do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessEvent {
    /// The short code that was resolved.
    pub code: String,
    /// Client IP address, empty when unknown.
    pub ip: String,
    /// Client User-Agent header, empty when absent.
    pub ua: String,
    /// Event timestamp in epoch seconds.
    pub ts: i64,
}

impl AccessEvent {
    /// Creates an event for the current instant.
    pub fn new(code: impl Into<String>, ip: impl Into<String>, ua: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ip: ip.into(),
            ua: ua.into(),
            ts: Utc::now().timestamp(),
        }
    }
}
