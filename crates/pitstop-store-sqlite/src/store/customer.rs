//! [`CustomerStore`] impl.

use pitstop_core::{
  customer::{Customer, NewCustomer},
  store::CustomerStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawCustomer, encode_customer_kind, encode_string_list},
  store::SqliteStore,
};

const CUSTOMER_COLS: &str = "customer_id, kind, customer_number, first_name, \
   last_name, phone_number, email, vehicle_vins";

fn customer_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCustomer> {
  Ok(RawCustomer {
    id:              row.get(0)?,
    kind:            row.get(1)?,
    customer_number: row.get(2)?,
    first_name:      row.get(3)?,
    last_name:       row.get(4)?,
    phone_number:    row.get(5)?,
    email:           row.get(6)?,
    vehicle_vins:    row.get(7)?,
  })
}

impl CustomerStore for SqliteStore {
  type Error = Error;

  async fn add_customer(&self, new: NewCustomer) -> Result<Customer> {
    if self
      .get_customer_by_number(&new.customer_number)
      .await?
      .is_some()
    {
      return Err(Error::DuplicateCustomerNumber(new.customer_number));
    }

    let kind_str = encode_customer_kind(new.kind).to_owned();
    let vins_str = encode_string_list(&new.vehicle_vins)?;
    let input    = new.clone();

    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO customers
             (kind, customer_number, first_name, last_name, phone_number,
              email, vehicle_vins)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            kind_str,
            input.customer_number,
            input.first_name,
            input.last_name,
            input.phone_number,
            input.email,
            vins_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Customer {
      id,
      kind:            new.kind,
      customer_number: new.customer_number,
      first_name:      new.first_name,
      last_name:       new.last_name,
      phone_number:    new.phone_number,
      email:           new.email,
      vehicle_vins:    new.vehicle_vins,
    })
  }

  async fn get_customer(&self, id: i64) -> Result<Option<Customer>> {
    let raw: Option<RawCustomer> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CUSTOMER_COLS} FROM customers WHERE customer_id = ?1"
              ),
              rusqlite::params![id],
              customer_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCustomer::into_customer).transpose()
  }

  async fn get_customer_by_number(
    &self,
    number: &str,
  ) -> Result<Option<Customer>> {
    let number = number.to_owned();
    let raw: Option<RawCustomer> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CUSTOMER_COLS} FROM customers
                 WHERE customer_number = ?1"
              ),
              rusqlite::params![number],
              customer_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCustomer::into_customer).transpose()
  }

  async fn list_customers(&self) -> Result<Vec<Customer>> {
    let raws: Vec<RawCustomer> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CUSTOMER_COLS} FROM customers ORDER BY customer_id"
        ))?;
        let rows = stmt
          .query_map([], customer_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCustomer::into_customer).collect()
  }

  async fn delete_customer(&self, id: i64) -> Result<bool> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM customers WHERE customer_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}
