//! Access log worker entrypoint.
//!
//! Runs the log consumer as a standalone process so click persistence never
//! competes with redirect latency. Safe to run multiple instances against
//! the same queue.

use std::sync::Arc;
use std::time::Duration;

use shortlinkd::config;
use shortlinkd::domain::log_consumer::LogConsumer;
use shortlinkd::infrastructure::persistence::{
    PgAccessLogRepository, PgLinkRepository, connect_pool,
};
use shortlinkd::infrastructure::queue::RedisQueue;
use shortlinkd::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    logging::init(&config);
    config.print_summary();

    let pool = Arc::new(connect_pool(&config).await?);
    let queue = RedisQueue::connect(&config.redis_url, config.queue_key.clone()).await?;

    let consumer = LogConsumer::new(
        Arc::new(queue),
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgAccessLogRepository::new(pool)),
    )
    .with_retry_backoff(Duration::from_secs(config.worker_backoff_seconds));

    // Runs until the process is terminated.
    consumer.run().await;

    Ok(())
}
