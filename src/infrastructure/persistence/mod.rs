//! PostgreSQL persistence layer.

pub mod pg_access_log_repository;
pub mod pg_link_repository;

pub use pg_access_log_repository::PgAccessLogRepository;
pub use pg_link_repository::PgLinkRepository;

use crate::config::Config;
use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

/// Connects a PostgreSQL pool, retrying at a fixed interval.
///
/// Both binaries use this at startup so a database that comes up a few
/// seconds after the service does not kill the process.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let strategy = FixedInterval::from_millis(2_000).take(5);

    let pool = Retry::spawn(strategy, || {
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(&config.database_url)
    })
    .await?;

    tracing::info!("Connected to database");
    Ok(pool)
}
