//! [`ReferenceStore`] impl — taxonomy lookups and bulk replacement.

use chrono::Utc;
use pitstop_core::{
  store::ReferenceStore,
  taxonomy::{
    Make, Manufacturer, Model, NewVariableValue, NewVehicleType, VehicleType,
    VehicleVariable, VehicleVariableValue,
  },
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    RawMake, RawManufacturer, RawModel, RawVariable, RawVariableValue,
    RawVehicleType, encode_dt,
  },
  store::SqliteStore,
};

fn make_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMake> {
  Ok(RawMake {
    id:              row.get(0)?,
    manufacturer_id: row.get(1)?,
    name:            row.get(2)?,
    external_code:   row.get(3)?,
    refreshed_at:    row.get(4)?,
  })
}

const MAKE_COLS: &str =
  "make_id, manufacturer_id, name, external_code, refreshed_at";

impl ReferenceStore for SqliteStore {
  type Error = Error;

  async fn get_manufacturer(&self, id: i64) -> Result<Option<Manufacturer>> {
    let raw: Option<RawManufacturer> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT manufacturer_id, name, refreshed_at
               FROM manufacturers WHERE manufacturer_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawManufacturer {
                  id:           row.get(0)?,
                  name:         row.get(1)?,
                  refreshed_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawManufacturer::into_manufacturer).transpose()
  }

  async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>> {
    let raws: Vec<RawManufacturer> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT manufacturer_id, name, refreshed_at FROM manufacturers
           ORDER BY manufacturer_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawManufacturer {
              id:           row.get(0)?,
              name:         row.get(1)?,
              refreshed_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawManufacturer::into_manufacturer)
      .collect()
  }

  async fn get_make(&self, id: i64) -> Result<Option<Make>> {
    let raw: Option<RawMake> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MAKE_COLS} FROM makes WHERE make_id = ?1"),
              rusqlite::params![id],
              make_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMake::into_make).transpose()
  }

  async fn list_makes(&self, manufacturer_id: i64) -> Result<Vec<Make>> {
    let raws: Vec<RawMake> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MAKE_COLS} FROM makes WHERE manufacturer_id = ?1
           ORDER BY make_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![manufacturer_id], make_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMake::into_make).collect()
  }

  async fn get_make_by_external_code(
    &self,
    code: &str,
  ) -> Result<Option<Make>> {
    let code = code.to_owned();
    let raw: Option<RawMake> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {MAKE_COLS} FROM makes WHERE external_code = ?1"
              ),
              rusqlite::params![code],
              make_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMake::into_make).transpose()
  }

  async fn get_make_by_name(&self, name: &str) -> Result<Option<Make>> {
    let name = name.to_owned();
    let raw: Option<RawMake> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MAKE_COLS} FROM makes WHERE name = ?1"),
              rusqlite::params![name],
              make_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMake::into_make).transpose()
  }

  async fn list_models(&self, make_id: i64) -> Result<Vec<Model>> {
    let raws: Vec<RawModel> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT model_id, make_id, name, refreshed_at FROM models
           WHERE make_id = ?1 ORDER BY model_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![make_id], |row| {
            Ok(RawModel {
              id:           row.get(0)?,
              make_id:      row.get(1)?,
              name:         row.get(2)?,
              refreshed_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawModel::into_model).collect()
  }

  async fn list_vehicle_types(&self, make_id: i64) -> Result<Vec<VehicleType>> {
    let raws: Vec<RawVehicleType> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT vehicle_type_id, make_id, name, external_code, refreshed_at
           FROM vehicle_types WHERE make_id = ?1 ORDER BY vehicle_type_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![make_id], |row| {
            Ok(RawVehicleType {
              id:            row.get(0)?,
              make_id:       row.get(1)?,
              name:          row.get(2)?,
              external_code: row.get(3)?,
              refreshed_at:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawVehicleType::into_vehicle_type)
      .collect()
  }

  async fn list_variables(&self) -> Result<Vec<VehicleVariable>> {
    let raws: Vec<RawVariable> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT variable_id, name, description, refreshed_at
           FROM vehicle_variables ORDER BY variable_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawVariable {
              id:           row.get(0)?,
              name:         row.get(1)?,
              description:  row.get(2)?,
              refreshed_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVariable::into_variable).collect()
  }

  async fn list_variable_values(
    &self,
    variable_id: i64,
  ) -> Result<Vec<VehicleVariableValue>> {
    let raws: Vec<RawVariableValue> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT value_id, variable_id, value, external_code, refreshed_at
           FROM vehicle_variable_values WHERE variable_id = ?1
           ORDER BY value_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![variable_id], |row| {
            Ok(RawVariableValue {
              id:            row.get(0)?,
              variable_id:   row.get(1)?,
              value:         row.get(2)?,
              external_code: row.get(3)?,
              refreshed_at:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawVariableValue::into_variable_value)
      .collect()
  }

  // ── Bulk replacement ──────────────────────────────────────────────────────

  async fn replace_manufacturers(&self, rows: Vec<Manufacturer>) -> Result<()> {
    self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM manufacturers", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO manufacturers (manufacturer_id, name, refreshed_at)
             VALUES (?1, ?2, ?3)",
          )?;
          for m in &rows {
            stmt.execute(rusqlite::params![
              m.id,
              m.name,
              encode_dt(m.refreshed_at)
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_makes(
    &self,
    manufacturer_id: i64,
    rows: Vec<Make>,
  ) -> Result<()> {
    self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM makes WHERE manufacturer_id = ?1",
          rusqlite::params![manufacturer_id],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO makes
               (make_id, manufacturer_id, name, external_code, refreshed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for m in &rows {
            stmt.execute(rusqlite::params![
              m.id,
              manufacturer_id,
              m.name,
              m.external_code,
              encode_dt(m.refreshed_at)
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_models(&self, make_id: i64, rows: Vec<Model>) -> Result<()> {
    self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM models WHERE make_id = ?1",
          rusqlite::params![make_id],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO models (model_id, make_id, name, refreshed_at)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for m in &rows {
            stmt.execute(rusqlite::params![
              m.id,
              make_id,
              m.name,
              encode_dt(m.refreshed_at)
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_vehicle_types(
    &self,
    make_id: i64,
    rows: Vec<NewVehicleType>,
  ) -> Result<Vec<VehicleType>> {
    let now = encode_dt(Utc::now());
    self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM vehicle_types WHERE make_id = ?1",
          rusqlite::params![make_id],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO vehicle_types
               (make_id, name, external_code, refreshed_at)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for vt in &rows {
            stmt.execute(rusqlite::params![
              make_id,
              vt.name,
              vt.external_code,
              now
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    self.list_vehicle_types(make_id).await
  }

  async fn replace_variables(&self, rows: Vec<VehicleVariable>) -> Result<()> {
    self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM vehicle_variables", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO vehicle_variables
               (variable_id, name, description, refreshed_at)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for v in &rows {
            stmt.execute(rusqlite::params![
              v.id,
              v.name,
              v.description,
              encode_dt(v.refreshed_at)
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_variable_values(
    &self,
    variable_id: i64,
    rows: Vec<NewVariableValue>,
  ) -> Result<Vec<VehicleVariableValue>> {
    let now = encode_dt(Utc::now());
    self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM vehicle_variable_values WHERE variable_id = ?1",
          rusqlite::params![variable_id],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO vehicle_variable_values
               (variable_id, value, external_code, refreshed_at)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for v in &rows {
            stmt.execute(rusqlite::params![
              variable_id,
              v.value,
              v.external_code,
              now
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    self.list_variable_values(variable_id).await
  }
}
