//! Concrete vehicle records held in the registry.

use serde::{Deserialize, Serialize};

/// The closed set of vehicle classifications the registry accepts.
///
/// The kind is a tag fixed at creation; no behavior differs by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
  PassengerTruck,
  Van,
  CommercialTruck,
}

/// A vehicle in the registry, identified by row id and (optionally) VIN.
///
/// The VIN is unique across the registry where present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
  pub id:    i64,
  pub kind:  VehicleKind,
  pub make:  String,
  pub model: String,
  pub year:  i32,
  pub vin:   Option<String>,
}

/// Input to [`crate::store::VehicleStore::add_vehicle`]. The id is assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
  pub kind:  VehicleKind,
  pub make:  String,
  pub model: String,
  pub year:  i32,
  pub vin:   Option<String>,
}
