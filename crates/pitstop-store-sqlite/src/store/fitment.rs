//! [`FitmentStore`] impl — part fitment records and their variable-value
//! qualifiers.
//!
//! The qualifier set lives in a join table and is rewritten wholesale on
//! update, inside the same transaction as the parent row.

use pitstop_core::{
  fitment::{NewPartFitment, PartFitment},
  store::FitmentStore,
};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, store::SqliteStore};

const FITMENT_COLS: &str = "fitment_id, part_number_id, manufacturer_id, \
   make_id, model_id, vehicle_type_id, year, engine_type, submodel, notes";

/// A fitment row without its qualifier set.
struct FitmentRow {
  id:              i64,
  part_number_id:  i64,
  manufacturer_id: Option<i64>,
  make_id:         Option<i64>,
  model_id:        Option<i64>,
  vehicle_type_id: Option<i64>,
  year:            Option<String>,
  engine_type:     Option<String>,
  submodel:        Option<String>,
  notes:           Option<String>,
}

impl FitmentRow {
  fn into_fitment(self, variable_value_ids: Vec<i64>) -> PartFitment {
    PartFitment {
      id:              self.id,
      part_number_id:  self.part_number_id,
      manufacturer_id: self.manufacturer_id,
      make_id:         self.make_id,
      model_id:        self.model_id,
      vehicle_type_id: self.vehicle_type_id,
      year:            self.year,
      engine_type:     self.engine_type,
      submodel:        self.submodel,
      variable_value_ids,
      notes:           self.notes,
    }
  }
}

fn fitment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FitmentRow> {
  Ok(FitmentRow {
    id:              row.get(0)?,
    part_number_id:  row.get(1)?,
    manufacturer_id: row.get(2)?,
    make_id:         row.get(3)?,
    model_id:        row.get(4)?,
    vehicle_type_id: row.get(5)?,
    year:            row.get(6)?,
    engine_type:     row.get(7)?,
    submodel:        row.get(8)?,
    notes:           row.get(9)?,
  })
}

fn value_ids_for(
  conn: &rusqlite::Connection,
  fitment_id: i64,
) -> rusqlite::Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    "SELECT value_id FROM fitment_variable_values
     WHERE fitment_id = ?1 ORDER BY value_id",
  )?;
  stmt
    .query_map(rusqlite::params![fitment_id], |row| row.get(0))?
    .collect()
}

fn write_value_ids(
  tx: &rusqlite::Transaction<'_>,
  fitment_id: i64,
  value_ids: &[i64],
) -> rusqlite::Result<()> {
  tx.execute(
    "DELETE FROM fitment_variable_values WHERE fitment_id = ?1",
    rusqlite::params![fitment_id],
  )?;
  let mut stmt = tx.prepare(
    "INSERT OR IGNORE INTO fitment_variable_values (fitment_id, value_id)
     VALUES (?1, ?2)",
  )?;
  for vid in value_ids {
    stmt.execute(rusqlite::params![fitment_id, vid])?;
  }
  Ok(())
}

impl FitmentStore for SqliteStore {
  type Error = Error;

  async fn add_fitment(&self, new: NewPartFitment) -> Result<PartFitment> {
    let input = new.clone();
    let id: i64 = self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO part_fitments
             (part_number_id, manufacturer_id, make_id, model_id,
              vehicle_type_id, year, engine_type, submodel, notes)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            input.part_number_id,
            input.manufacturer_id,
            input.make_id,
            input.model_id,
            input.vehicle_type_id,
            input.year,
            input.engine_type,
            input.submodel,
            input.notes,
          ],
        )?;
        let id = tx.last_insert_rowid();
        write_value_ids(&tx, id, &input.variable_value_ids)?;
        tx.commit()?;
        Ok(id)
      })
      .await?;

    let mut value_ids = new.variable_value_ids.clone();
    value_ids.sort_unstable();
    value_ids.dedup();

    Ok(PartFitment {
      id,
      part_number_id:  new.part_number_id,
      manufacturer_id: new.manufacturer_id,
      make_id:         new.make_id,
      model_id:        new.model_id,
      vehicle_type_id: new.vehicle_type_id,
      year:            new.year,
      engine_type:     new.engine_type,
      submodel:        new.submodel,
      variable_value_ids: value_ids,
      notes:           new.notes,
    })
  }

  async fn get_fitment(&self, id: i64) -> Result<Option<PartFitment>> {
    let found: Option<PartFitment> = self
      .conn()
      .call(move |conn| {
        let row = conn
          .query_row(
            &format!(
              "SELECT {FITMENT_COLS} FROM part_fitments WHERE fitment_id = ?1"
            ),
            rusqlite::params![id],
            fitment_from_row,
          )
          .optional()?;

        match row {
          Some(row) => {
            let value_ids = value_ids_for(conn, row.id)?;
            Ok(Some(row.into_fitment(value_ids)))
          }
          None => Ok(None),
        }
      })
      .await?;
    Ok(found)
  }

  async fn list_fitments_for_part(
    &self,
    part_number_id: i64,
  ) -> Result<Vec<PartFitment>> {
    let fitments: Vec<PartFitment> = self
      .conn()
      .call(move |conn| {
        let rows = {
          let mut stmt = conn.prepare(&format!(
            "SELECT {FITMENT_COLS} FROM part_fitments
             WHERE part_number_id = ?1 ORDER BY fitment_id"
          ))?;
          stmt
            .query_map(rusqlite::params![part_number_id], fitment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
          let value_ids = value_ids_for(conn, row.id)?;
          out.push(row.into_fitment(value_ids));
        }
        Ok(out)
      })
      .await?;
    Ok(fitments)
  }

  async fn update_fitment(
    &self,
    id: i64,
    new: NewPartFitment,
  ) -> Result<Option<PartFitment>> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE part_fitments SET
             part_number_id = ?1, manufacturer_id = ?2, make_id = ?3,
             model_id = ?4, vehicle_type_id = ?5, year = ?6,
             engine_type = ?7, submodel = ?8, notes = ?9
           WHERE fitment_id = ?10",
          rusqlite::params![
            new.part_number_id,
            new.manufacturer_id,
            new.make_id,
            new.model_id,
            new.vehicle_type_id,
            new.year,
            new.engine_type,
            new.submodel,
            new.notes,
            id,
          ],
        )?;
        if changed > 0 {
          write_value_ids(&tx, id, &new.variable_value_ids)?;
        }
        tx.commit()?;
        Ok(changed)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_fitment(id).await
  }

  async fn delete_fitment(&self, id: i64) -> Result<bool> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM part_fitments WHERE fitment_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}
