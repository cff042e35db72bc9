//! Error types for `pitstop-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown vehicle kind discriminant: {0:?}")]
  UnknownVehicleKind(String),

  #[error("unknown customer kind discriminant: {0:?}")]
  UnknownCustomerKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
