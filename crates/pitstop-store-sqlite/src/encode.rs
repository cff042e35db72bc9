//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, discriminants as snake_case
//! text, and list-valued fields (phone numbers, customer VINs, role names) as
//! compact JSON arrays.

use chrono::{DateTime, Utc};
use pitstop_core::{
  auth::{AuthToken, User},
  customer::{Customer, CustomerKind},
  person::Person,
  taxonomy::{
    Make, Manufacturer, Model, VehicleType, VehicleVariable,
    VehicleVariableValue,
  },
  vehicle::{Vehicle, VehicleKind},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── VehicleKind ─────────────────────────────────────────────────────────────

pub fn encode_vehicle_kind(k: VehicleKind) -> &'static str {
  match k {
    VehicleKind::PassengerTruck => "passenger_truck",
    VehicleKind::Van => "van",
    VehicleKind::CommercialTruck => "commercial_truck",
  }
}

pub fn decode_vehicle_kind(s: &str) -> Result<VehicleKind> {
  match s {
    "passenger_truck" => Ok(VehicleKind::PassengerTruck),
    "van" => Ok(VehicleKind::Van),
    "commercial_truck" => Ok(VehicleKind::CommercialTruck),
    other => {
      Err(pitstop_core::Error::UnknownVehicleKind(other.to_owned()).into())
    }
  }
}

// ─── CustomerKind ────────────────────────────────────────────────────────────

pub fn encode_customer_kind(k: CustomerKind) -> &'static str {
  match k {
    CustomerKind::Private => "private",
    CustomerKind::Commercial => "commercial",
    CustomerKind::Government => "government",
  }
}

pub fn decode_customer_kind(s: &str) -> Result<CustomerKind> {
  match s {
    "private" => Ok(CustomerKind::Private),
    "commercial" => Ok(CustomerKind::Commercial),
    "government" => Ok(CustomerKind::Government),
    other => {
      Err(pitstop_core::Error::UnknownCustomerKind(other.to_owned()).into())
    }
  }
}

// ─── String lists ────────────────────────────────────────────────────────────

pub fn encode_string_list(items: &[String]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_string_list(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Raw strings read directly from a row; `into_*` performs the typed decode.

pub struct RawManufacturer {
  pub id:           i64,
  pub name:         String,
  pub refreshed_at: String,
}

impl RawManufacturer {
  pub fn into_manufacturer(self) -> Result<Manufacturer> {
    Ok(Manufacturer {
      id:           self.id,
      name:         self.name,
      refreshed_at: decode_dt(&self.refreshed_at)?,
    })
  }
}

pub struct RawMake {
  pub id:              i64,
  pub manufacturer_id: i64,
  pub name:            String,
  pub external_code:   Option<String>,
  pub refreshed_at:    String,
}

impl RawMake {
  pub fn into_make(self) -> Result<Make> {
    Ok(Make {
      id:              self.id,
      manufacturer_id: self.manufacturer_id,
      name:            self.name,
      external_code:   self.external_code,
      refreshed_at:    decode_dt(&self.refreshed_at)?,
    })
  }
}

pub struct RawModel {
  pub id:           i64,
  pub make_id:      i64,
  pub name:         String,
  pub refreshed_at: String,
}

impl RawModel {
  pub fn into_model(self) -> Result<Model> {
    Ok(Model {
      id:           self.id,
      make_id:      self.make_id,
      name:         self.name,
      refreshed_at: decode_dt(&self.refreshed_at)?,
    })
  }
}

pub struct RawVehicleType {
  pub id:            i64,
  pub make_id:       i64,
  pub name:          String,
  pub external_code: String,
  pub refreshed_at:  String,
}

impl RawVehicleType {
  pub fn into_vehicle_type(self) -> Result<VehicleType> {
    Ok(VehicleType {
      id:            self.id,
      make_id:       self.make_id,
      name:          self.name,
      external_code: self.external_code,
      refreshed_at:  decode_dt(&self.refreshed_at)?,
    })
  }
}

pub struct RawVariable {
  pub id:           i64,
  pub name:         String,
  pub description:  Option<String>,
  pub refreshed_at: String,
}

impl RawVariable {
  pub fn into_variable(self) -> Result<VehicleVariable> {
    Ok(VehicleVariable {
      id:           self.id,
      name:         self.name,
      description:  self.description,
      refreshed_at: decode_dt(&self.refreshed_at)?,
    })
  }
}

pub struct RawVariableValue {
  pub id:            i64,
  pub variable_id:   i64,
  pub value:         String,
  pub external_code: Option<String>,
  pub refreshed_at:  String,
}

impl RawVariableValue {
  pub fn into_variable_value(self) -> Result<VehicleVariableValue> {
    Ok(VehicleVariableValue {
      id:            self.id,
      variable_id:   self.variable_id,
      value:         self.value,
      external_code: self.external_code,
      refreshed_at:  decode_dt(&self.refreshed_at)?,
    })
  }
}

pub struct RawVehicle {
  pub id:    i64,
  pub kind:  String,
  pub make:  String,
  pub model: String,
  pub year:  i32,
  pub vin:   Option<String>,
}

impl RawVehicle {
  pub fn into_vehicle(self) -> Result<Vehicle> {
    Ok(Vehicle {
      id:    self.id,
      kind:  decode_vehicle_kind(&self.kind)?,
      make:  self.make,
      model: self.model,
      year:  self.year,
      vin:   self.vin,
    })
  }
}

pub struct RawPerson {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub primary_email:   String,
  pub secondary_email: Option<String>,
  pub phone_numbers:   String,
  pub username:        Option<String>,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:              self.id,
      first_name:      self.first_name,
      last_name:       self.last_name,
      primary_email:   self.primary_email,
      secondary_email: self.secondary_email,
      phone_numbers:   decode_string_list(&self.phone_numbers)?,
      username:        self.username,
    })
  }
}

pub struct RawCustomer {
  pub id:              i64,
  pub kind:            String,
  pub customer_number: String,
  pub first_name:      String,
  pub last_name:       String,
  pub phone_number:    Option<String>,
  pub email:           Option<String>,
  pub vehicle_vins:    String,
}

impl RawCustomer {
  pub fn into_customer(self) -> Result<Customer> {
    Ok(Customer {
      id:              self.id,
      kind:            decode_customer_kind(&self.kind)?,
      customer_number: self.customer_number,
      first_name:      self.first_name,
      last_name:       self.last_name,
      phone_number:    self.phone_number,
      email:           self.email,
      vehicle_vins:    decode_string_list(&self.vehicle_vins)?,
    })
  }
}

pub struct RawUser {
  pub id:            i64,
  pub username:      String,
  pub password_hash: String,
  pub roles:         String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:            self.id,
      username:      self.username,
      password_hash: self.password_hash,
      roles:         decode_string_list(&self.roles)?,
    })
  }
}

pub struct RawAuthToken {
  pub id:         i64,
  pub token:      String,
  pub subject:    String,
  pub issued_at:  String,
  pub expires_at: String,
}

impl RawAuthToken {
  pub fn into_token(self) -> Result<AuthToken> {
    Ok(AuthToken {
      id:         self.id,
      token:      self.token,
      subject:    self.subject,
      issued_at:  decode_dt(&self.issued_at)?,
      expires_at: decode_dt(&self.expires_at)?,
    })
  }
}
