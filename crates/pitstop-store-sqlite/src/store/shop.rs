//! [`ShopStore`] impl.

use pitstop_core::{
  shop::{NewShop, NewTechnician, Shop, Technician},
  store::ShopStore,
};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, store::SqliteStore};

impl ShopStore for SqliteStore {
  type Error = Error;

  async fn add_shop(&self, new: NewShop) -> Result<Shop> {
    let name    = new.name.clone();
    let address = new.address.clone();

    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO shops (name, address) VALUES (?1, ?2)",
          rusqlite::params![name, address],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Shop { id, name: new.name, address: new.address })
  }

  async fn get_shop(&self, id: i64) -> Result<Option<Shop>> {
    let found: Option<Shop> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT shop_id, name, address FROM shops WHERE shop_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Shop {
                  id:      row.get(0)?,
                  name:    row.get(1)?,
                  address: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(found)
  }

  async fn add_technician(
    &self,
    shop_id: i64,
    new: NewTechnician,
  ) -> Result<Option<Technician>> {
    if self.get_shop(shop_id).await?.is_none() {
      return Ok(None);
    }

    let person_id = new.person_id;
    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO technicians (shop_id, person_id) VALUES (?1, ?2)",
          rusqlite::params![shop_id, person_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Some(Technician { id, shop_id, person_id }))
  }

  async fn get_technician(&self, id: i64) -> Result<Option<Technician>> {
    let found: Option<Technician> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT technician_id, shop_id, person_id FROM technicians
               WHERE technician_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Technician {
                  id:        row.get(0)?,
                  shop_id:   row.get(1)?,
                  person_id: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(found)
  }

  async fn list_technicians(&self, shop_id: i64) -> Result<Vec<Technician>> {
    let found: Vec<Technician> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT technician_id, shop_id, person_id FROM technicians
           WHERE shop_id = ?1 ORDER BY technician_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![shop_id], |row| {
            Ok(Technician {
              id:        row.get(0)?,
              shop_id:   row.get(1)?,
              person_id: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(found)
  }
}
