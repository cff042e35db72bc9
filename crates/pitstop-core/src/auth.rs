//! Users, roles, and issued auth tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed role names seeded at process start.
pub const SEED_ROLES: [&str; 4] =
  ["ADMIN", "GENERAL_MANAGER", "MANAGER", "CUSTOMER"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
  pub id:   i64,
  pub name: String,
}

/// A login account. The password is stored only as an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id:       i64,
  pub username: String,
  /// Never serialized into responses; defaults to empty when absent on
  /// deserialization.
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  pub roles:    Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub password_hash: String,
  pub roles:         Vec<String>,
}

/// An opaque bearer token issued at login and persisted until deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
  pub id:         i64,
  pub token:      String,
  /// The username the token was issued to.
  pub subject:    String,
  pub issued_at:  DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl AuthToken {
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    self.expires_at < now
  }
}
