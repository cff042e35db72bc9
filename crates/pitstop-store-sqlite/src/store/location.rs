//! [`LocationStore`] impl.

use pitstop_core::{
  location::{Location, NewLocation},
  store::LocationStore,
};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, store::SqliteStore};

const LOCATION_COLS: &str = "location_id, name, address_line1, address_line2, \
   city, state, postal_code, country, mailing_address, responsible_person_id";

fn location_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Location> {
  Ok(Location {
    id:                    row.get(0)?,
    name:                  row.get(1)?,
    address_line1:         row.get(2)?,
    address_line2:         row.get(3)?,
    city:                  row.get(4)?,
    state:                 row.get(5)?,
    postal_code:           row.get(6)?,
    country:               row.get(7)?,
    mailing_address:       row.get(8)?,
    responsible_person_id: row.get(9)?,
  })
}

impl LocationStore for SqliteStore {
  type Error = Error;

  async fn add_location(&self, new: NewLocation) -> Result<Location> {
    let input = new.clone();
    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO locations
             (name, address_line1, address_line2, city, state, postal_code,
              country, mailing_address, responsible_person_id)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            input.name,
            input.address_line1,
            input.address_line2,
            input.city,
            input.state,
            input.postal_code,
            input.country,
            input.mailing_address,
            input.responsible_person_id,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Location {
      id,
      name:                  new.name,
      address_line1:         new.address_line1,
      address_line2:         new.address_line2,
      city:                  new.city,
      state:                 new.state,
      postal_code:           new.postal_code,
      country:               new.country,
      mailing_address:       new.mailing_address,
      responsible_person_id: new.responsible_person_id,
    })
  }

  async fn get_location(&self, id: i64) -> Result<Option<Location>> {
    let found: Option<Location> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {LOCATION_COLS} FROM locations WHERE location_id = ?1"
              ),
              rusqlite::params![id],
              location_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(found)
  }

  async fn list_locations(&self) -> Result<Vec<Location>> {
    let found: Vec<Location> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LOCATION_COLS} FROM locations ORDER BY location_id"
        ))?;
        let rows = stmt
          .query_map([], location_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(found)
  }

  async fn update_location(
    &self,
    id: i64,
    new: NewLocation,
  ) -> Result<Option<Location>> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE locations SET
             name = ?1, address_line1 = ?2, address_line2 = ?3, city = ?4,
             state = ?5, postal_code = ?6, country = ?7, mailing_address = ?8,
             responsible_person_id = ?9
           WHERE location_id = ?10",
          rusqlite::params![
            new.name,
            new.address_line1,
            new.address_line2,
            new.city,
            new.state,
            new.postal_code,
            new.country,
            new.mailing_address,
            new.responsible_person_id,
            id,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_location(id).await
  }

  async fn delete_location(&self, id: i64) -> Result<bool> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM locations WHERE location_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}
