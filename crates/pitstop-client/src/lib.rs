//! HTTP clients for the pitstop platform.
//!
//! Two kinds of client live here:
//!
//! - [`PeopleClient`] and [`CatalogClient`] — read-only lookups against
//!   sibling pitstop services. A missing record (`404`) is `Ok(None)`; any
//!   transport failure or other non-2xx status is an [`Error`], so callers
//!   can tell "absent" apart from "unreachable".
//! - [`NhtsaClient`] — fetches reference taxonomy rows from the public NHTSA
//!   vPIC API for the refresh path.
//!
//! Every request carries an explicit timeout, set once on the underlying
//! [`reqwest::Client`].

mod error;
mod nhtsa;
mod sibling;

pub use error::{Error, Result};
pub use nhtsa::{DEFAULT_BASE_URL as NHTSA_DEFAULT_BASE_URL, NhtsaClient};
pub use sibling::{CatalogClient, PeopleClient};

use std::time::Duration;

/// Timeout applied to every outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn http_client() -> Result<reqwest::Client> {
  Ok(
    reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()?,
  )
}
