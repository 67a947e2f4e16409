//! Repository trait for persisting access records.

use crate::domain::entities::NewAccessLog;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only access log.
///
/// Duplicate rows are acceptable (an access log is a fact stream, not a
/// balance), which is what makes running multiple workers against the same
/// queue safe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Persists one enriched access record and bumps the owning link's
    /// visit counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, log: NewAccessLog) -> Result<(), AppError>;
}
