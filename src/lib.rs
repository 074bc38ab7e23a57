//! An event-consumer worker: messages arrive from a pub/sub subscription,
//! are decoded into typed events, and are fanned out over a bounded pool of
//! concurrent executors with backpressure and cooperative cancellation.

pub mod config;
mod consumer;
mod error;
mod event;
mod payment;
mod pool;
mod subscription;
mod task;
mod worker;

pub use config::Config;
pub use consumer::{Delivery, EventConsumer, MessageSource};
pub use error::{ConfigError, PoolError};
pub use event::{PaymentMethodCreated, PaymentMethodType};
pub use payment::PaymentId;
pub use pool::WorkerPool;
pub use subscription::{MemoryDelivery, MemorySubscription, Publisher, Settlement};
pub use task::Task;
