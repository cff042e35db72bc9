//! Person records from the people directory.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub primary_email:   String,
  pub secondary_email: Option<String>,
  pub phone_numbers:   Vec<String>,
  /// Optional login name; validated by the security module, not here.
  pub username:        Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
  pub first_name:      String,
  pub last_name:       String,
  pub primary_email:   String,
  pub secondary_email: Option<String>,
  #[serde(default)]
  pub phone_numbers:   Vec<String>,
  pub username:        Option<String>,
}
