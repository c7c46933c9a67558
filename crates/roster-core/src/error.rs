//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  #[error("unknown gender value: {0:?}")]
  UnknownGender(String),

  #[error("salary must be non-negative")]
  NegativeSalary,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
