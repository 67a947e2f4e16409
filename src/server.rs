//! HTTP server initialization and runtime setup.
//!
//! Wires the connection pool, cache, queue, and services together and runs
//! the Axum server. The worker binary has its own, smaller wiring in
//! `src/bin/worker.rs`.

use crate::application::services::{LinkService, RedirectService};
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::RedisCache;
use crate::infrastructure::persistence::{PgLinkRepository, connect_pool};
use crate::infrastructure::queue::RedisQueue;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with startup retry)
/// - Schema migrations
/// - Redis resolution cache and access event queue
/// - Axum HTTP server with connect-info for client IPs
///
/// # Errors
///
/// Returns an error if any backend connection, the bind, or the server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache = RedisCache::connect(&config.redis_url).await?;
    let queue = RedisQueue::connect(&config.redis_url, config.queue_key.clone()).await?;

    let pool = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));

    let redirect_service = Arc::new(RedirectService::new(
        link_repository.clone(),
        Arc::new(cache),
        Arc::new(queue),
        Duration::from_secs(config.cache_ttl_seconds),
    ));
    let link_service = Arc::new(LinkService::new(link_repository));

    let state = AppState {
        redirect_service,
        link_service,
        base_url: config.base_url.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Redirect server listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
