use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Identifier for a payment. New ids are UUID v7, so they sort by creation
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentId(Uuid);

impl PaymentId {
  pub fn new() -> Self {
    Self(Uuid::now_v7())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for PaymentId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for PaymentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for PaymentId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(Self)
  }
}
