//! PostgreSQL implementation of the access log repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewAccessLog;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only access log.
pub struct PgAccessLogRepository {
    pool: Arc<PgPool>,
}

impl PgAccessLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLogRepository for PgAccessLogRepository {
    async fn save(&self, log: NewAccessLog) -> Result<(), AppError> {
        // One transaction: the access row and the visit counter move together.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO access_logs (link_id, short_code, ip_address, user_agent, visited_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(log.link_id)
        .bind(&log.short_code)
        .bind(&log.ip_address)
        .bind(&log.user_agent)
        .bind(log.visited_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE links SET visit_count = visit_count + 1 WHERE id = $1")
            .bind(log.link_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
