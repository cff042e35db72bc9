//! Physical business locations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub id:                    i64,
  pub name:                  String,
  pub address_line1:         String,
  pub address_line2:         Option<String>,
  pub city:                  String,
  pub state:                 String,
  pub postal_code:           String,
  pub country:               String,
  pub mailing_address:       Option<String>,
  /// Numeric reference into the people module; not resolved here.
  pub responsible_person_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
  pub name:                  String,
  pub address_line1:         String,
  pub address_line2:         Option<String>,
  pub city:                  String,
  pub state:                 String,
  pub postal_code:           String,
  pub country:               String,
  pub mailing_address:       Option<String>,
  pub responsible_person_id: Option<i64>,
}
