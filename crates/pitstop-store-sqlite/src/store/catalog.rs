//! [`CatalogStore`] impl — products, service items, and non-inventory
//! products.
//!
//! The three item families are near-identical CRUD; the simple two are
//! generated over a shared helper, while products carry their full column
//! set inline.

use pitstop_core::{
  catalog::{
    NewNonInventoryProduct, NewProduct, NewServiceItem, NonInventoryProduct,
    Product, ServiceItem,
  },
  store::CatalogStore,
};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, store::SqliteStore};

const PRODUCT_COLS: &str = "product_id, name, short_description, \
   long_description, sku, manufacturer_part_number, manufacturer_name, \
   brand, country_of_origin, material, color, warranty";

fn product_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
  Ok(Product {
    id:                       row.get(0)?,
    name:                     row.get(1)?,
    short_description:        row.get(2)?,
    long_description:         row.get(3)?,
    sku:                      row.get(4)?,
    manufacturer_part_number: row.get(5)?,
    manufacturer_name:        row.get(6)?,
    brand:                    row.get(7)?,
    country_of_origin:        row.get(8)?,
    material:                 row.get(9)?,
    color:                    row.get(10)?,
    warranty:                 row.get(11)?,
  })
}

/// Simple three-column item row (service items, non-inventory products).
type SimpleRow = (i64, String, Option<String>, Option<String>);

fn simple_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SimpleRow> {
  Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

impl SqliteStore {
  async fn add_simple_item(
    &self,
    table: &'static str,
    name: String,
    short_description: Option<String>,
    long_description: Option<String>,
  ) -> Result<i64> {
    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO {table} (name, short_description, long_description)
             VALUES (?1, ?2, ?3)"
          ),
          rusqlite::params![name, short_description, long_description],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn get_simple_item(
    &self,
    table: &'static str,
    id_col: &'static str,
    id: i64,
  ) -> Result<Option<SimpleRow>> {
    let row: Option<SimpleRow> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {id_col}, name, short_description, long_description
                 FROM {table} WHERE {id_col} = ?1"
              ),
              rusqlite::params![id],
              simple_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn find_simple_items_by_name(
    &self,
    table: &'static str,
    id_col: &'static str,
    name: String,
  ) -> Result<Vec<SimpleRow>> {
    let rows: Vec<SimpleRow> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {id_col}, name, short_description, long_description
           FROM {table} WHERE name = ?1 ORDER BY {id_col}"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![name], simple_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn delete_simple_item(
    &self,
    table: &'static str,
    id_col: &'static str,
    id: i64,
  ) -> Result<bool> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM {table} WHERE {id_col} = ?1"),
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Products ──────────────────────────────────────────────────────────────

  async fn add_product(&self, new: NewProduct) -> Result<Product> {
    let input = new.clone();
    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO products
             (name, short_description, long_description, sku,
              manufacturer_part_number, manufacturer_name, brand,
              country_of_origin, material, color, warranty)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            input.name,
            input.short_description,
            input.long_description,
            input.sku,
            input.manufacturer_part_number,
            input.manufacturer_name,
            input.brand,
            input.country_of_origin,
            input.material,
            input.color,
            input.warranty,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Product {
      id,
      name:                     new.name,
      short_description:        new.short_description,
      long_description:         new.long_description,
      sku:                      new.sku,
      manufacturer_part_number: new.manufacturer_part_number,
      manufacturer_name:        new.manufacturer_name,
      brand:                    new.brand,
      country_of_origin:        new.country_of_origin,
      material:                 new.material,
      color:                    new.color,
      warranty:                 new.warranty,
    })
  }

  async fn get_product(&self, id: i64) -> Result<Option<Product>> {
    let found: Option<Product> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PRODUCT_COLS} FROM products WHERE product_id = ?1"
              ),
              rusqlite::params![id],
              product_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(found)
  }

  async fn find_products_by_name(&self, name: &str) -> Result<Vec<Product>> {
    let name = name.to_owned();
    let found: Vec<Product> = self
      .conn()
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PRODUCT_COLS} FROM products WHERE name = ?1
           ORDER BY product_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![name], product_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(found)
  }

  async fn delete_product(&self, id: i64) -> Result<bool> {
    self.delete_simple_item("products", "product_id", id).await
  }

  // ── Service items ─────────────────────────────────────────────────────────

  async fn add_service_item(&self, new: NewServiceItem) -> Result<ServiceItem> {
    let id = self
      .add_simple_item(
        "service_items",
        new.name.clone(),
        new.short_description.clone(),
        new.long_description.clone(),
      )
      .await?;
    Ok(ServiceItem {
      id,
      name:              new.name,
      short_description: new.short_description,
      long_description:  new.long_description,
    })
  }

  async fn get_service_item(&self, id: i64) -> Result<Option<ServiceItem>> {
    Ok(
      self
        .get_simple_item("service_items", "service_id", id)
        .await?
        .map(|(id, name, short_description, long_description)| ServiceItem {
          id,
          name,
          short_description,
          long_description,
        }),
    )
  }

  async fn find_service_items_by_name(
    &self,
    name: &str,
  ) -> Result<Vec<ServiceItem>> {
    Ok(
      self
        .find_simple_items_by_name(
          "service_items",
          "service_id",
          name.to_owned(),
        )
        .await?
        .into_iter()
        .map(|(id, name, short_description, long_description)| ServiceItem {
          id,
          name,
          short_description,
          long_description,
        })
        .collect(),
    )
  }

  async fn delete_service_item(&self, id: i64) -> Result<bool> {
    self
      .delete_simple_item("service_items", "service_id", id)
      .await
  }

  // ── Non-inventory products ────────────────────────────────────────────────

  async fn add_non_inventory_product(
    &self,
    new: NewNonInventoryProduct,
  ) -> Result<NonInventoryProduct> {
    let id = self
      .add_simple_item(
        "non_inventory_products",
        new.name.clone(),
        new.short_description.clone(),
        new.long_description.clone(),
      )
      .await?;
    Ok(NonInventoryProduct {
      id,
      name:              new.name,
      short_description: new.short_description,
      long_description:  new.long_description,
    })
  }

  async fn get_non_inventory_product(
    &self,
    id: i64,
  ) -> Result<Option<NonInventoryProduct>> {
    Ok(
      self
        .get_simple_item("non_inventory_products", "product_id", id)
        .await?
        .map(|(id, name, short_description, long_description)| {
          NonInventoryProduct {
            id,
            name,
            short_description,
            long_description,
          }
        }),
    )
  }

  async fn find_non_inventory_products_by_name(
    &self,
    name: &str,
  ) -> Result<Vec<NonInventoryProduct>> {
    Ok(
      self
        .find_simple_items_by_name(
          "non_inventory_products",
          "product_id",
          name.to_owned(),
        )
        .await?
        .into_iter()
        .map(|(id, name, short_description, long_description)| {
          NonInventoryProduct {
            id,
            name,
            short_description,
            long_description,
          }
        })
        .collect(),
    )
  }

  async fn delete_non_inventory_product(&self, id: i64) -> Result<bool> {
    self
      .delete_simple_item("non_inventory_products", "product_id", id)
      .await
  }
}
