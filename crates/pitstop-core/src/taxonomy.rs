//! Vehicle reference taxonomy — manufacturer → make → model / vehicle type,
//! plus the named variable/value dimensions that qualify fitments.
//!
//! Manufacturers, makes, models, and variables carry the numeric identifiers
//! assigned by the upstream reference source (NHTSA vPIC), so a refresh can
//! replace rows without renumbering anything a fitment points at. Vehicle
//! types and variable values have no stable upstream numeric id and are keyed
//! locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vehicle manufacturer (e.g. "Ford Motor Company").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
  pub id:           i64,
  pub name:         String,
  /// When this row was last fetched from the upstream source.
  pub refreshed_at: DateTime<Utc>,
}

/// A make owned by a manufacturer (e.g. "Ford", "Lincoln").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Make {
  pub id:              i64,
  pub manufacturer_id: i64,
  pub name:            String,
  /// Identifier for the same make in a secondary reference source, where
  /// known.
  pub external_code:   Option<String>,
  pub refreshed_at:    DateTime<Utc>,
}

/// A model owned by a make (e.g. "F-150").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
  pub id:           i64,
  pub make_id:      i64,
  pub name:         String,
  pub refreshed_at: DateTime<Utc>,
}

/// A body classification a make produces (e.g. "Car", "Truck", "SUV").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
  pub id:            i64,
  pub make_id:       i64,
  pub name:          String,
  /// The upstream type identifier, kept as opaque text.
  pub external_code: String,
  pub refreshed_at:  DateTime<Utc>,
}

/// Input row for [`crate::store::ReferenceStore::replace_vehicle_types`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicleType {
  pub name:          String,
  pub external_code: String,
}

/// A named qualifying dimension (e.g. "Drive Type", "Fuel Type Primary").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleVariable {
  pub id:           i64,
  pub name:         String,
  pub description:  Option<String>,
  pub refreshed_at: DateTime<Utc>,
}

/// One enumerated value of a [`VehicleVariable`] (e.g. "4WD/4-Wheel Drive").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleVariableValue {
  pub id:            i64,
  pub variable_id:   i64,
  pub value:         String,
  pub external_code: Option<String>,
  pub refreshed_at:  DateTime<Utc>,
}

/// Input row for [`crate::store::ReferenceStore::replace_variable_values`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVariableValue {
  pub value:         String,
  pub external_code: Option<String>,
}
