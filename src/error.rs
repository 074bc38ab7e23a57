use thiserror::Error;

/// Errors surfaced by the [`WorkerPool`](crate::WorkerPool).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PoolError {
  /// The task queue has been closed by `wait()`; submitting after shutdown
  /// has begun is a contract violation and fails fast rather than silently
  /// dropping the task.
  #[error("task queue is closed, pool is draining or shut down")]
  QueueClosed,
}

/// Errors produced while reading process configuration from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
  #[error("required environment variable {0} is not set")]
  MissingVariable(String),

  #[error("environment variable {key} has invalid value {value:?}: {reason}")]
  InvalidValue {
    key: String,
    value: String,
    reason: String,
  },
}
