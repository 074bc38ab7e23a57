//! Process configuration, read once at startup from environment variables.

use crate::error::ConfigError;

use std::env;
use std::str::FromStr;

const WORKER_COUNT: &str = "WORKER_COUNT";
const TASK_QUEUE_CAPACITY: &str = "TASK_QUEUE_CAPACITY";
const PUBSUB_PROJECT_ID: &str = "PUBSUB_PROJECT_ID";
const PUBSUB_SUBSCRIPTION: &str = "PUBSUB_SUBSCRIPTION";

const DEFAULT_WORKER_COUNT: usize = 1000;
const DEFAULT_QUEUE_CAPACITY: usize = 1_000_000;
const DEFAULT_PROJECT_ID: &str = "local-project";
const DEFAULT_SUBSCRIPTION: &str = "payment-method-created-subscription";

/// Everything the worker process needs to start. The pool parameters are
/// passed on to [`WorkerPool::new`](crate::WorkerPool::new) as plain values;
/// the subscription parameters go to whatever message source is wired in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub worker_count: usize,
  pub queue_capacity: usize,
  pub project_id: String,
  pub subscription: String,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    let config = Self {
      worker_count: parsed_or(WORKER_COUNT, DEFAULT_WORKER_COUNT)?,
      queue_capacity: parsed_or(TASK_QUEUE_CAPACITY, DEFAULT_QUEUE_CAPACITY)?,
      project_id: string_or(PUBSUB_PROJECT_ID, DEFAULT_PROJECT_ID),
      subscription: string_or(PUBSUB_SUBSCRIPTION, DEFAULT_SUBSCRIPTION),
    };

    if config.worker_count == 0 {
      return Err(invalid(WORKER_COUNT, "0", "must be at least 1"));
    }
    if config.queue_capacity == 0 {
      return Err(invalid(TASK_QUEUE_CAPACITY, "0", "must be at least 1"));
    }

    Ok(config)
  }
}

/// Returns the variable's value, or `default` when it is not set.
pub fn string_or(key: &str, default: &str) -> String {
  env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Returns the variable's value, or an error when it is not set.
pub fn required(key: &str) -> Result<String, ConfigError> {
  env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

/// Interprets the variable as a boolean. `true`, `1`, `yes` and `y` count as
/// true regardless of case; anything else is false. Unset yields `default`.
pub fn bool_or(key: &str, default: bool) -> bool {
  match env::var(key) {
    Ok(value) => matches!(
      value.to_ascii_lowercase().as_str(),
      "true" | "1" | "yes" | "y"
    ),
    Err(_) => default,
  }
}

/// Parses the variable into `T`. Unset yields `default`; a set-but-malformed
/// value is a fatal configuration error rather than a silent fallback.
pub fn parsed_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(key) {
    Ok(value) => value
      .parse()
      .map_err(|err: T::Err| invalid(key, &value, &err.to_string())),
    Err(_) => Ok(default),
  }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
  ConfigError::InvalidValue {
    key: key.to_string(),
    value: value.to_string(),
    reason: reason.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Each test uses its own variable names so tests can run in parallel.

  #[test]
  fn string_or_prefers_set_value() {
    env::set_var("EW_TEST_STRING_SET", "from-env");
    assert_eq!(string_or("EW_TEST_STRING_SET", "fallback"), "from-env");
    assert_eq!(string_or("EW_TEST_STRING_UNSET", "fallback"), "fallback");
  }

  #[test]
  fn required_errors_when_unset() {
    env::set_var("EW_TEST_REQUIRED_SET", "present");
    assert_eq!(required("EW_TEST_REQUIRED_SET").unwrap(), "present");
    assert_eq!(
      required("EW_TEST_REQUIRED_UNSET"),
      Err(ConfigError::MissingVariable("EW_TEST_REQUIRED_UNSET".to_string()))
    );
  }

  #[test]
  fn bool_or_accepts_truthy_spellings() {
    for (value, want) in [
      ("true", true),
      ("TRUE", true),
      ("1", true),
      ("yes", true),
      ("Y", true),
      ("false", false),
      ("0", false),
      ("anything", false),
    ] {
      env::set_var("EW_TEST_BOOL", value);
      assert_eq!(bool_or("EW_TEST_BOOL", false), want, "value {value:?}");
    }
    assert!(bool_or("EW_TEST_BOOL_UNSET", true));
  }

  #[test]
  fn parsed_or_parses_integers() {
    env::set_var("EW_TEST_INT_SET", "42");
    assert_eq!(parsed_or("EW_TEST_INT_SET", 7usize).unwrap(), 42);
    assert_eq!(parsed_or("EW_TEST_INT_UNSET", 7usize).unwrap(), 7);
  }

  #[test]
  fn parsed_or_rejects_malformed_values() {
    env::set_var("EW_TEST_INT_BAD", "not-a-number");
    let err = parsed_or("EW_TEST_INT_BAD", 7usize).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "EW_TEST_INT_BAD"));
  }

  #[test]
  fn from_env_uses_defaults_when_nothing_is_set() {
    // None of the worker variables are set in the test environment.
    let config = Config::from_env().unwrap();
    assert_eq!(config.worker_count, DEFAULT_WORKER_COUNT);
    assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(config.project_id, DEFAULT_PROJECT_ID);
    assert_eq!(config.subscription, DEFAULT_SUBSCRIPTION);
  }
}
