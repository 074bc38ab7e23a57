use crate::consumer::{Delivery, MessageSource};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

/// How a [`MemoryDelivery`] was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
  Acked,
  Nacked,
}

/// In-process implementation of the message-source seam.
///
/// Real deployments put a broker client behind [`MessageSource`]; this
/// implementation backs the same seam with an in-memory channel and reports
/// every settlement on a side channel, which makes it suitable for tests and
/// for the binary's local stdin-fed mode. It implements none of the broker's
/// durability or redelivery semantics: a nack here is only recorded.
pub struct MemorySubscription {
  name: String,
  delivery_rx: mpsc::UnboundedReceiver<MemoryDelivery>,
}

impl MemorySubscription {
  /// Creates a subscription plus a clonable [`Publisher`] feeding it and a
  /// receiver reporting each message's settlement. The subscription ends
  /// once every publisher clone has been dropped and the buffered messages
  /// are consumed.
  pub fn create(
    name: &str,
  ) -> (
    Publisher,
    MemorySubscription,
    mpsc::UnboundedReceiver<(String, Settlement)>,
  ) {
    let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
    let (settlement_tx, settlement_rx) = mpsc::unbounded_channel();

    let publisher = Publisher {
      delivery_tx,
      settlement_tx,
      next_id: Arc::new(AtomicU64::new(0)),
    };
    let subscription = MemorySubscription {
      name: name.to_string(),
      delivery_rx,
    };

    (publisher, subscription, settlement_rx)
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

#[async_trait]
impl MessageSource for MemorySubscription {
  type Delivery = MemoryDelivery;

  async fn next(&mut self) -> Option<MemoryDelivery> {
    self.delivery_rx.recv().await
  }
}

/// Publishing half of a [`MemorySubscription`].
#[derive(Clone)]
pub struct Publisher {
  delivery_tx: mpsc::UnboundedSender<MemoryDelivery>,
  settlement_tx: mpsc::UnboundedSender<(String, Settlement)>,
  next_id: Arc<AtomicU64>,
}

impl Publisher {
  /// Publishes one message and returns its assigned id. Publishing after the
  /// subscription has been dropped is a no-op.
  pub fn publish(&self, payload: impl Into<Vec<u8>>) -> String {
    let id = format!("m{}", self.next_id.fetch_add(1, Ordering::Relaxed));
    let delivery = MemoryDelivery {
      id: id.clone(),
      payload: payload.into(),
      settlement_tx: self.settlement_tx.clone(),
    };
    let _ = self.delivery_tx.send(delivery);
    id
  }
}

/// A message in flight from a [`MemorySubscription`].
pub struct MemoryDelivery {
  id: String,
  payload: Vec<u8>,
  settlement_tx: mpsc::UnboundedSender<(String, Settlement)>,
}

impl MemoryDelivery {
  fn settle(self, settlement: Settlement) {
    debug!(message_id = %self.id, ?settlement, "delivery settled");
    let _ = self.settlement_tx.send((self.id, settlement));
  }
}

#[async_trait]
impl Delivery for MemoryDelivery {
  fn id(&self) -> &str {
    &self.id
  }

  fn payload(&self) -> &[u8] {
    &self.payload
  }

  async fn ack(self) {
    self.settle(Settlement::Acked);
  }

  async fn nack(self) {
    self.settle(Settlement::Nacked);
  }
}
