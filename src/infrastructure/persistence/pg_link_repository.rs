//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, short_code, original_url, alias, user_id, is_custom, \
                            visit_count, expires_at, is_active, created_at";

/// PostgreSQL repository for link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Row shape shared by all link queries.
///
/// `short_code` is nullable in storage: rows inserted without a custom code
/// carry NULL until the encoder-derived code is assigned.
#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_code: Option<String>,
    original_url: String,
    alias: Option<String>,
    user_id: Option<Uuid>,
    is_custom: bool,
    visit_count: i64,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            short_code: row.short_code.unwrap_or_default(),
            original_url: row.original_url,
            alias: row.alias,
            user_id: row.user_id,
            is_custom: row.is_custom,
            visit_count: row.visit_count,
            expires_at: row.expires_at,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let is_custom = new_link.short_code.is_some();

        let row: LinkRow = sqlx::query_as(&format!(
            "INSERT INTO links (short_code, original_url, alias, user_id, is_custom, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(&new_link.alias)
        .bind(new_link.user_id)
        .bind(is_custom)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn assign_code(&self, id: i64, code: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE links SET short_code = $2 WHERE id = $1")
            .bind(id)
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1 AND is_active = TRUE"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_active_id_by_code(&self, code: &str) -> Result<Option<i64>, AppError> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM links WHERE short_code = $1 AND is_active = TRUE")
                .bind(code)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> =
            sqlx::query_as(&format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Link::from))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE short_code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }
}
