//! Shops and their technicians.
//!
//! A technician is a staffing record, not a person: the person details live
//! in the people module and are referenced by numeric id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
  pub id:      i64,
  pub name:    String,
  pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShop {
  pub name:    String,
  pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
  pub id:        i64,
  pub shop_id:   i64,
  pub person_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTechnician {
  pub person_id: i64,
}
