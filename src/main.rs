use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use event_worker::{Config, EventConsumer, MemorySubscription, Publisher, WorkerPool};

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .json()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = Config::from_env()?;
  info!(
    workers = config.worker_count,
    queue_capacity = config.queue_capacity,
    project_id = %config.project_id,
    subscription = %config.subscription,
    "event worker starting"
  );

  let shutdown = CancellationToken::new();
  {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        info!("interrupt received, shutting down");
        shutdown.cancel();
      }
    });
  }

  let pool = Arc::new(WorkerPool::new(
    shutdown.clone(),
    config.worker_count,
    config.queue_capacity,
  ));

  // Local delivery mode: every line on stdin is one message payload. A real
  // broker client would plug in behind the same MessageSource seam.
  let (publisher, subscription, mut settlements) = MemorySubscription::create(&config.subscription);
  tokio::spawn(feed_from_stdin(publisher));
  tokio::spawn(async move {
    while let Some((message_id, settlement)) = settlements.recv().await {
      debug!(%message_id, ?settlement, "message settled");
    }
  });

  let consumer = EventConsumer::new(pool.clone(), shutdown.clone());
  consumer.run(subscription).await;
  pool.wait().await;

  info!("event worker stopped");
  Ok(())
}

// Dropping the publisher on EOF ends the subscription once it is drained.
async fn feed_from_stdin(publisher: Publisher) {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Ok(Some(line)) = lines.next_line().await {
    if line.trim().is_empty() {
      continue;
    }
    publisher.publish(line.into_bytes());
  }
}
