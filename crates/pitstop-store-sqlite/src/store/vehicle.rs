//! [`VehicleStore`] impl — the vehicle registry.

use pitstop_core::{
  store::VehicleStore,
  vehicle::{NewVehicle, Vehicle},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawVehicle, encode_vehicle_kind},
  store::SqliteStore,
};

const VEHICLE_COLS: &str = "vehicle_id, kind, make, model, year, vin";

fn vehicle_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawVehicle> {
  Ok(RawVehicle {
    id:    row.get(0)?,
    kind:  row.get(1)?,
    make:  row.get(2)?,
    model: row.get(3)?,
    year:  row.get(4)?,
    vin:   row.get(5)?,
  })
}

impl SqliteStore {
  /// Whether a VIN is already taken, ignoring the vehicle `except` (used so
  /// an update addressed by VIN does not conflict with itself).
  async fn vin_taken(&self, vin: String, except: Option<i64>) -> Result<bool> {
    let taken: bool = self
      .conn()
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT vehicle_id FROM vehicles WHERE vin = ?1",
            rusqlite::params![vin],
            |row| row.get::<_, i64>(0),
          )
          .optional()?
          .is_some_and(|id| Some(id) != except);
        Ok(taken)
      })
      .await?;
    Ok(taken)
  }
}

impl VehicleStore for SqliteStore {
  type Error = Error;

  async fn add_vehicle(&self, new: NewVehicle) -> Result<Vehicle> {
    if let Some(vin) = &new.vin
      && self.vin_taken(vin.clone(), None).await?
    {
      return Err(Error::DuplicateVin(vin.clone()));
    }

    let kind_str = encode_vehicle_kind(new.kind).to_owned();
    let make     = new.make.clone();
    let model    = new.model.clone();
    let year     = new.year;
    let vin      = new.vin.clone();

    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO vehicles (kind, make, model, year, vin)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![kind_str, make, model, year, vin],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Vehicle {
      id,
      kind: new.kind,
      make: new.make,
      model: new.model,
      year: new.year,
      vin: new.vin,
    })
  }

  async fn get_vehicle(&self, id: i64) -> Result<Option<Vehicle>> {
    let raw: Option<RawVehicle> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {VEHICLE_COLS} FROM vehicles WHERE vehicle_id = ?1"
              ),
              rusqlite::params![id],
              vehicle_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVehicle::into_vehicle).transpose()
  }

  async fn get_vehicle_by_vin(&self, vin: &str) -> Result<Option<Vehicle>> {
    let vin = vin.to_owned();
    let raw: Option<RawVehicle> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {VEHICLE_COLS} FROM vehicles WHERE vin = ?1"),
              rusqlite::params![vin],
              vehicle_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVehicle::into_vehicle).transpose()
  }

  async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
    let raws: Vec<RawVehicle> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VEHICLE_COLS} FROM vehicles ORDER BY vehicle_id"
        ))?;
        let rows = stmt
          .query_map([], vehicle_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVehicle::into_vehicle).collect()
  }

  async fn update_vehicle(
    &self,
    id: i64,
    new: NewVehicle,
  ) -> Result<Option<Vehicle>> {
    if let Some(vin) = &new.vin
      && self.vin_taken(vin.clone(), Some(id)).await?
    {
      return Err(Error::DuplicateVin(vin.clone()));
    }

    let NewVehicle { kind: _, make, model, year, vin } = new;

    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE vehicles SET make = ?1, model = ?2, year = ?3, vin = ?4
           WHERE vehicle_id = ?5",
          rusqlite::params![make, model, year, vin, id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_vehicle(id).await
  }

  async fn update_vehicle_by_vin(
    &self,
    vin: &str,
    new: NewVehicle,
  ) -> Result<Option<Vehicle>> {
    let existing = match self.get_vehicle_by_vin(vin).await? {
      Some(v) => v,
      None => return Ok(None),
    };

    // The addressed VIN wins over whatever the body carries.
    let replacement = NewVehicle { vin: Some(vin.to_owned()), ..new };
    self.update_vehicle(existing.id, replacement).await
  }

  async fn delete_vehicle(&self, id: i64) -> Result<bool> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM vehicles WHERE vehicle_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn delete_vehicle_by_vin(&self, vin: &str) -> Result<bool> {
    let vin = vin.to_owned();
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM vehicles WHERE vin = ?1",
          rusqlite::params![vin],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}
