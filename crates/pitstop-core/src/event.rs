//! Emitted operational events.
//!
//! Callers may only emit events whose id appears in the preregistration
//! table; anything else is rejected before a row is written.

use serde::{Deserialize, Serialize};

/// A stored emission of a preregistered event id.
///
/// `timestamp` is the caller-submitted emission time in milliseconds since
/// the Unix epoch; it is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedEvent {
  pub event_id:  i64,
  pub id:        String,
  pub timestamp: i64,
}
