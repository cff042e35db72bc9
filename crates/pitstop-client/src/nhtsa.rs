//! Client for the public NHTSA vPIC vehicle API.
//!
//! All endpoints return an envelope whose `Results` array carries the rows;
//! numeric codes arrive as numbers or strings depending on the endpoint, so
//! code fields are decoded leniently. Rows are converted straight into the
//! taxonomy types the reference store replaces.

use chrono::Utc;
use pitstop_core::taxonomy::{
  Make, Manufacturer, Model, NewVariableValue, NewVehicleType,
  VehicleVariable,
};
use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result, http_client};

pub const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

/// Async client for the NHTSA vPIC API.
#[derive(Clone)]
pub struct NhtsaClient {
  client:   Client,
  base_url: String,
}

// ─── Field helpers ───────────────────────────────────────────────────────────

fn field_i64(row: &Value, key: &str) -> Option<i64> {
  match row.get(key)? {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.parse().ok(),
    _ => None,
  }
}

fn field_str(row: &Value, key: &str) -> Option<String> {
  match row.get(key)? {
    Value::String(s) if !s.is_empty() => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

impl NhtsaClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    Ok(Self {
      client:   http_client()?,
      base_url: base_url.into().trim_end_matches('/').to_owned(),
    })
  }

  /// Fetch one endpoint and return its `Results` rows.
  async fn results(&self, path: &str) -> Result<Vec<Value>> {
    let url = format!("{}{path}?format=json", self.base_url);
    let resp = self.client.get(&url).send().await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status { status, url });
    }

    let root: Value = resp.json().await?;
    root
      .get("Results")
      .and_then(Value::as_array)
      .cloned()
      .ok_or_else(|| Error::Decode(format!("no Results array in {url}")))
  }

  /// `GET /getallmanufacturers`
  pub async fn all_manufacturers(&self) -> Result<Vec<Manufacturer>> {
    let now = Utc::now();
    let rows = self.results("/getallmanufacturers").await?;
    Ok(
      rows
        .iter()
        .filter_map(|row| {
          Some(Manufacturer {
            id:           field_i64(row, "Mfr_ID")?,
            name:         field_str(row, "Mfr_CommonName")
              .or_else(|| field_str(row, "Mfr_Name"))?,
            refreshed_at: now,
          })
        })
        .collect(),
    )
  }

  /// `GET /GetMakeForManufacturer/{manufacturer_id}`
  pub async fn makes_for_manufacturer(
    &self,
    manufacturer_id: i64,
  ) -> Result<Vec<Make>> {
    let now = Utc::now();
    let rows = self
      .results(&format!("/GetMakeForManufacturer/{manufacturer_id}"))
      .await?;
    Ok(
      rows
        .iter()
        .filter_map(|row| {
          Some(Make {
            id:              field_i64(row, "Make_ID")?,
            manufacturer_id,
            name:            field_str(row, "Make_Name")?,
            external_code:   None,
            refreshed_at:    now,
          })
        })
        .collect(),
    )
  }

  /// `GET /GetModelsForMakeId/{make_id}`
  pub async fn models_for_make(&self, make_id: i64) -> Result<Vec<Model>> {
    let now = Utc::now();
    let rows = self
      .results(&format!("/GetModelsForMakeId/{make_id}"))
      .await?;
    Ok(
      rows
        .iter()
        .filter_map(|row| {
          Some(Model {
            id:           field_i64(row, "Model_ID")?,
            make_id,
            name:         field_str(row, "Model_Name")?,
            refreshed_at: now,
          })
        })
        .collect(),
    )
  }

  /// `GET /GetVehicleTypesForMakeId/{make_id}`
  pub async fn vehicle_types_for_make(
    &self,
    make_id: i64,
  ) -> Result<Vec<NewVehicleType>> {
    let rows = self
      .results(&format!("/GetVehicleTypesForMakeId/{make_id}"))
      .await?;
    Ok(
      rows
        .iter()
        .filter_map(|row| {
          Some(NewVehicleType {
            name:          field_str(row, "VehicleTypeName")?,
            external_code: field_str(row, "VehicleTypeId")?,
          })
        })
        .collect(),
    )
  }

  /// `GET /GetVehicleVariableList`
  pub async fn variables(&self) -> Result<Vec<VehicleVariable>> {
    let now = Utc::now();
    let rows = self.results("/GetVehicleVariableList").await?;
    Ok(
      rows
        .iter()
        .filter_map(|row| {
          Some(VehicleVariable {
            id:           field_i64(row, "ID")?,
            name:         field_str(row, "Name")?,
            description:  field_str(row, "Description"),
            refreshed_at: now,
          })
        })
        .collect(),
    )
  }

  /// `GET /GetVehicleVariableValuesList/{variable_id}`
  pub async fn variable_values(
    &self,
    variable_id: i64,
  ) -> Result<Vec<NewVariableValue>> {
    let rows = self
      .results(&format!("/GetVehicleVariableValuesList/{variable_id}"))
      .await?;
    Ok(
      rows
        .iter()
        .filter_map(|row| {
          Some(NewVariableValue {
            value:         field_str(row, "Value")?,
            external_code: field_str(row, "ValueId"),
          })
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn lenient_code_fields() {
    let row = json!({ "VehicleTypeId": 2, "VehicleTypeName": "Truck" });
    assert_eq!(field_str(&row, "VehicleTypeId").as_deref(), Some("2"));
    assert_eq!(field_str(&row, "VehicleTypeName").as_deref(), Some("Truck"));

    let row = json!({ "ValueId": "7", "Value": "4WD/4-Wheel Drive" });
    assert_eq!(field_str(&row, "ValueId").as_deref(), Some("7"));
    assert_eq!(field_i64(&row, "ValueId"), Some(7));
  }

  #[test]
  fn empty_strings_decode_to_none() {
    let row = json!({ "Mfr_CommonName": "", "Mfr_Name": "Ford Motor Co" });
    assert_eq!(field_str(&row, "Mfr_CommonName"), None);
    assert_eq!(field_str(&row, "Mfr_Name").as_deref(), Some("Ford Motor Co"));
  }
}
