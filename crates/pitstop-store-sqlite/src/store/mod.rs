//! [`SqliteStore`] — the SQLite implementation of every pitstop store trait.
//!
//! The trait impls live in one submodule per former service boundary; this
//! module owns the connection and schema initialisation.

mod auth;
mod catalog;
mod customer;
mod event;
mod fitment;
mod location;
mod person;
mod reference;
mod shop;
mod vehicle;

use std::path::Path;

use crate::{Result, schema::SCHEMA};

/// A pitstop store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub(crate) fn conn(&self) -> &tokio_rusqlite::Connection { &self.conn }
}
