use crate::event::PaymentMethodCreated;
use crate::pool::WorkerPool;

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// One message handed over by a [`MessageSource`].
///
/// The implementation owns the broker-side bookkeeping: `ack` durably
/// removes the message, `nack` requests redelivery. Both take the delivery
/// by value, so each message is settled at most once.
#[async_trait]
pub trait Delivery: Send + 'static {
  /// Broker-assigned message id, used for log correlation only.
  fn id(&self) -> &str;

  /// Raw payload bytes as published.
  fn payload(&self) -> &[u8];

  async fn ack(self);

  async fn nack(self);
}

/// A subscription that yields deliveries one at a time until the broker side
/// ends it.
#[async_trait]
pub trait MessageSource: Send {
  type Delivery: Delivery;

  /// The next delivery, or `None` once the subscription has ended.
  async fn next(&mut self) -> Option<Self::Delivery>;
}

/// Bridges a message source to the worker pool: one task per delivery.
///
/// The task decodes the payload into a [`PaymentMethodCreated`] event and
/// settles the message itself: ack on success, nack on a decode failure. A
/// malformed payload is local to its own task and never disturbs the
/// executor that ran it.
pub struct EventConsumer {
  pool: Arc<WorkerPool>,
  shutdown: CancellationToken,
}

impl EventConsumer {
  pub fn new(pool: Arc<WorkerPool>, shutdown: CancellationToken) -> Self {
    Self { pool, shutdown }
  }

  /// Receives deliveries until the source ends or shutdown is signalled,
  /// submitting one task per message. Submission backpressure applies here:
  /// a full task queue suspends the receive loop. Returns once the loop has
  /// stopped; the caller is expected to `wait()` on the pool afterwards.
  pub async fn run<S: MessageSource>(&self, mut source: S) {
    loop {
      let delivery = tokio::select! {
        biased;

        _ = self.shutdown.cancelled() => {
          info!("shutdown signalled, consumer stopping");
          break;
        }

        delivery = source.next() => match delivery {
          Some(delivery) => delivery,
          None => {
            info!("message source ended, consumer stopping");
            break;
          }
        },
      };

      if self.pool.add_task(Box::pin(handle_delivery(delivery))).await.is_err() {
        warn!("task queue closed, consumer stopping");
        break;
      }
    }
  }
}

async fn handle_delivery<D: Delivery>(delivery: D) {
  match serde_json::from_slice::<PaymentMethodCreated>(delivery.payload()) {
    Ok(event) => {
      info!(
        message_id = %delivery.id(),
        event = ?event,
        "received payment method created event"
      );
      delivery.ack().await;
    }
    Err(err) => {
      error!(
        message_id = %delivery.id(),
        error = %err,
        "failed to decode event payload"
      );
      delivery.nack().await;
    }
  }
}
