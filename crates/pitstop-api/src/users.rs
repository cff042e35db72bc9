//! Handlers for `/users` — accounts, login, and token lifecycle.
//!
//! Passwords are hashed with argon2 and never stored or returned in clear.
//! Login verifies the hash and issues an opaque bearer token persisted with
//! its issue and expiry instants; token introspection answers 404 for
//! unknown *or expired* tokens.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use pitstop_core::{
  auth::{AuthToken, NewUser, User},
  store::AuthStore,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, PosStore, error::ApiError};

// ─── Accounts ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
  pub username: String,
  pub password: String,
  #[serde(default)]
  pub roles:    Vec<String>,
}

/// `POST /users` — 409 when the username is taken.
pub async fn create<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateUserBody>,
) -> Result<impl IntoResponse, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  let password_hash = Argon2::default()
    .hash_password(body.password.as_bytes(), &salt)
    .map_err(|e| ApiError::BadRequest(format!("unusable password: {e}")))?
    .to_string();

  let user = state
    .store
    .add_user(NewUser {
      username: body.username,
      password_hash,
      roles: body.roles,
    })
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(username = %user.username, "created user");
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users`
pub async fn list<S: PosStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<User>>, ApiError> {
  let users = state
    .store
    .list_users()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(users))
}

/// `GET /users/:username`
pub async fn get_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
  let user = state
    .store
    .get_user_by_username(&username)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("user {username:?} not found"))
    })?;
  Ok(Json(user))
}

/// `DELETE /users/id/:id`
pub async fn delete_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_user(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!("user {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Login & tokens ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token:      String,
  pub expires_at: chrono::DateTime<Utc>,
}

/// `POST /users/login` — verify credentials and issue a stored token.
///
/// Unknown username and wrong password produce the same 401 body, so the
/// response does not reveal which accounts exist.
pub async fn login<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
  const INVALID: &str = "Invalid credentials";

  let user = state
    .store
    .get_user_by_username(&body.username)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::Unauthorized(INVALID.into()))?;

  let parsed = PasswordHash::new(&user.password_hash)
    .map_err(|e| ApiError::Internal(format!("stored hash unusable: {e}")))?;
  Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed)
    .map_err(|_| ApiError::Unauthorized(INVALID.into()))?;

  let now = Utc::now();
  let token = state
    .store
    .insert_token(AuthToken {
      id:         0,
      token:      Uuid::new_v4().simple().to_string(),
      subject:    user.username.clone(),
      issued_at:  now,
      expires_at: now + state.token_ttl,
    })
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(username = %user.username, "issued token");
  Ok(Json(LoginResponse {
    token:      token.token,
    expires_at: token.expires_at,
  }))
}

/// `GET /users/tokens/:token` — introspection; expired tokens are 404.
pub async fn get_token<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(token): Path<String>,
) -> Result<Json<AuthToken>, ApiError> {
  let stored = state
    .store
    .get_token(&token)
    .await
    .map_err(ApiError::from_store)?
    .filter(|t| !t.is_expired(Utc::now()))
    .ok_or_else(|| ApiError::NotFound("token not found".into()))?;
  Ok(Json(stored))
}

/// `DELETE /users/tokens/:token` — revoke (logout).
pub async fn delete_token<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  if !state
    .store
    .delete_token(&token)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound("token not found".into()));
  }
  Ok((StatusCode::OK, Json(json!({ "revoked": true }))))
}
