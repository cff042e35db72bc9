//! [`PeopleStore`] impl.

use pitstop_core::{
  person::{NewPerson, Person},
  store::PeopleStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawPerson, encode_string_list},
  store::SqliteStore,
};

const PERSON_COLS: &str = "person_id, first_name, last_name, primary_email, \
   secondary_email, phone_numbers, username";

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    id:              row.get(0)?,
    first_name:      row.get(1)?,
    last_name:       row.get(2)?,
    primary_email:   row.get(3)?,
    secondary_email: row.get(4)?,
    phone_numbers:   row.get(5)?,
    username:        row.get(6)?,
  })
}

impl PeopleStore for SqliteStore {
  type Error = Error;

  async fn add_person(&self, new: NewPerson) -> Result<Person> {
    let phones_str = encode_string_list(&new.phone_numbers)?;
    let input = new.clone();

    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people
             (first_name, last_name, primary_email, secondary_email,
              phone_numbers, username)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            input.first_name,
            input.last_name,
            input.primary_email,
            input.secondary_email,
            phones_str,
            input.username,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Person {
      id,
      first_name:      new.first_name,
      last_name:       new.last_name,
      primary_email:   new.primary_email,
      secondary_email: new.secondary_email,
      phone_numbers:   new.phone_numbers,
      username:        new.username,
    })
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLS} FROM people WHERE person_id = ?1"),
              rusqlite::params![id],
              person_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_people(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLS} FROM people ORDER BY person_id"
        ))?;
        let rows = stmt
          .query_map([], person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn update_person(
    &self,
    id: i64,
    new: NewPerson,
  ) -> Result<Option<Person>> {
    let phones_str = encode_string_list(&new.phone_numbers)?;

    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE people SET
             first_name = ?1, last_name = ?2, primary_email = ?3,
             secondary_email = ?4, phone_numbers = ?5, username = ?6
           WHERE person_id = ?7",
          rusqlite::params![
            new.first_name,
            new.last_name,
            new.primary_email,
            new.secondary_email,
            phones_str,
            new.username,
            id,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_person(id).await
  }

  async fn delete_person(&self, id: i64) -> Result<bool> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM people WHERE person_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}
