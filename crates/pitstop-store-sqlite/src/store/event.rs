//! [`EventStore`] impl — the preregistration allow-list and the emitted log.

use pitstop_core::{event::EmittedEvent, store::EventStore};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, store::SqliteStore};

impl EventStore for SqliteStore {
  type Error = Error;

  async fn is_preregistered(&self, id: &str) -> Result<bool> {
    let id = id.to_owned();
    let found: bool = self
      .conn()
      .call(move |conn| {
        let found = conn
          .query_row(
            "SELECT 1 FROM preregistered_events WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(found)
      })
      .await?;
    Ok(found)
  }

  async fn preregister(&self, id: &str) -> Result<()> {
    let id = id.to_owned();
    self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO preregistered_events (id) VALUES (?1)",
          rusqlite::params![id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn record_event(&self, id: &str, timestamp: i64) -> Result<EmittedEvent> {
    let id_owned = id.to_owned();
    let event_id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO emitted_events (id, timestamp) VALUES (?1, ?2)",
          rusqlite::params![id_owned, timestamp],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(EmittedEvent { event_id, id: id.to_owned(), timestamp })
  }

  async fn list_events_for_id(&self, id: &str) -> Result<Vec<EmittedEvent>> {
    let id = id.to_owned();
    let events: Vec<EmittedEvent> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, id, timestamp FROM emitted_events
           WHERE id = ?1 ORDER BY event_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |row| {
            Ok(EmittedEvent {
              event_id:  row.get(0)?,
              id:        row.get(1)?,
              timestamp: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(events)
  }
}
