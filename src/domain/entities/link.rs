//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shortened URL link with metadata.
///
/// The numeric `id` is the source of truth for code derivation: when no
/// custom code is supplied, `short_code` is derived from `id` with the
/// base-62 encoder and assigned only after the initial insert, so it is
/// empty for the brief window between insert and assignment.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub alias: Option<String>,
    pub user_id: Option<Uuid>,
    pub is_custom: bool,
    pub visit_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    ///
    /// An expired link must resolve exactly like a nonexistent one.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new link.
///
/// `short_code` is `None` for encoder-derived codes: the row is inserted
/// without a code and the code is assigned once the identifier exists.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: Option<String>,
    pub original_url: String,
    pub alias: Option<String>,
    pub user_id: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
}
