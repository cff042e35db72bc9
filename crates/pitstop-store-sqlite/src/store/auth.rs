//! [`AuthStore`] impl — roles, users, and issued tokens.

use pitstop_core::{
  auth::{AuthToken, NewUser, Role, User},
  store::AuthStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawAuthToken, RawUser, encode_dt, encode_string_list},
  store::SqliteStore,
};

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    id:            row.get(0)?,
    username:      row.get(1)?,
    password_hash: row.get(2)?,
    roles:         row.get(3)?,
  })
}

impl AuthStore for SqliteStore {
  type Error = Error;

  async fn seed_roles(&self, names: &[&str]) -> Result<()> {
    let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    self
      .conn()
      .call(move |conn| {
        let mut stmt = conn
          .prepare("INSERT OR IGNORE INTO roles (name) VALUES (?1)")?;
        for name in &names {
          stmt.execute(rusqlite::params![name])?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_roles(&self) -> Result<Vec<Role>> {
    let roles: Vec<Role> = self
      .conn()
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT role_id, name FROM roles ORDER BY role_id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Role { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(roles)
  }

  async fn add_user(&self, new: NewUser) -> Result<User> {
    if self.get_user_by_username(&new.username).await?.is_some() {
      return Err(Error::DuplicateUsername(new.username));
    }

    let roles_str = encode_string_list(&new.roles)?;
    let input = new.clone();

    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (username, password_hash, roles)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![input.username, input.password_hash, roles_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User {
      id,
      username:      new.username,
      password_hash: new.password_hash,
      roles:         new.roles,
    })
  }

  async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
    let username = username.to_owned();
    let raw: Option<RawUser> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username, password_hash, roles FROM users
               WHERE username = ?1",
              rusqlite::params![username],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn()
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT user_id, username, password_hash, roles FROM users
           ORDER BY user_id",
        )?;
        let rows = stmt
          .query_map([], user_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn delete_user(&self, id: i64) -> Result<bool> {
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM users WHERE user_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn insert_token(&self, token: AuthToken) -> Result<AuthToken> {
    let token_str   = token.token.clone();
    let subject     = token.subject.clone();
    let issued_str  = encode_dt(token.issued_at);
    let expires_str = encode_dt(token.expires_at);

    let id: i64 = self
      .conn()
      .call(move |conn| {
        conn.execute(
          "INSERT INTO auth_tokens (token, subject, issued_at, expires_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![token_str, subject, issued_str, expires_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(AuthToken { id, ..token })
  }

  async fn get_token(&self, token: &str) -> Result<Option<AuthToken>> {
    let token = token.to_owned();
    let raw: Option<RawAuthToken> = self
      .conn()
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT token_id, token, subject, issued_at, expires_at
               FROM auth_tokens WHERE token = ?1",
              rusqlite::params![token],
              |row| {
                Ok(RawAuthToken {
                  id:         row.get(0)?,
                  token:      row.get(1)?,
                  subject:    row.get(2)?,
                  issued_at:  row.get(3)?,
                  expires_at: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAuthToken::into_token).transpose()
  }

  async fn delete_token(&self, token: &str) -> Result<bool> {
    let token = token.to_owned();
    let changed: usize = self
      .conn()
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM auth_tokens WHERE token = ?1",
          rusqlite::params![token],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}
