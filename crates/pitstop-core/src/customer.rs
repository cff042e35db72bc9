//! Customer records.

use serde::{Deserialize, Serialize};

/// The closed set of customer classifications, stored as a discriminator
/// column. A tag only; no fields or behavior differ by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerKind {
  Private,
  Commercial,
  Government,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  pub id:              i64,
  pub kind:            CustomerKind,
  /// Human-facing account number, unique across the store (e.g. "CUST-1001").
  pub customer_number: String,
  pub first_name:      String,
  pub last_name:       String,
  pub phone_number:    Option<String>,
  pub email:           Option<String>,
  /// VINs of vehicles associated with this customer.
  pub vehicle_vins:    Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
  pub kind:            CustomerKind,
  pub customer_number: String,
  pub first_name:      String,
  pub last_name:       String,
  pub phone_number:    Option<String>,
  pub email:           Option<String>,
  #[serde(default)]
  pub vehicle_vins:    Vec<String>,
}
