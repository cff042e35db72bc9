//! Error type for `pitstop-client`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The request never produced a response (connect failure, timeout, ...).
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The upstream answered with an unexpected status (404 is not an error
  /// for lookups; it decodes to `None`).
  #[error("upstream returned {status} for {url}")]
  Status {
    status: reqwest::StatusCode,
    url:    String,
  },

  /// The response body did not have the expected shape.
  #[error("could not decode upstream response: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
