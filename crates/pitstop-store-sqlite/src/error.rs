//! Error type for `pitstop-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] pitstop_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A VIN that is already present in the registry.
  #[error("vehicle with VIN {0:?} already exists")]
  DuplicateVin(String),

  #[error("customer number {0:?} already exists")]
  DuplicateCustomerNumber(String),

  #[error("username {0:?} already exists")]
  DuplicateUsername(String),
}

impl pitstop_core::store::StoreError for Error {
  fn is_conflict(&self) -> bool {
    matches!(
      self,
      Self::DuplicateVin(_)
        | Self::DuplicateCustomerNumber(_)
        | Self::DuplicateUsername(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
