//! Access log entity persisted by the background worker.

use chrono::{DateTime, Utc};

/// Input data for recording one resolved redirect.
///
/// Built by the worker after enriching an [`AccessEvent`] with the owning
/// link's identifier; the resolver never constructs this directly.
///
/// [`AccessEvent`]: crate::domain::access_event::AccessEvent
#[derive(Debug, Clone)]
pub struct NewAccessLog {
    pub link_id: i64,
    pub short_code: String,
    pub ip_address: String,
    pub user_agent: String,
    pub visited_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_access_log_fields() {
        let log = NewAccessLog {
            link_id: 42,
            short_code: "21".to_string(),
            ip_address: "192.168.1.1".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            visited_at: Utc::now(),
        };

        assert_eq!(log.link_id, 42);
        assert_eq!(log.short_code, "21");
        assert_eq!(log.ip_address, "192.168.1.1");
    }
}
