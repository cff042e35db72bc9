//! Handlers for `/events` — the event receiver.
//!
//! `POST /events` accepts `{"id": "...", "timestamp": <millis>}` and stores
//! the emission only when the id has been preregistered. The response bodies
//! are plain text, matching the receiver's established contract: 200
//! `Event stored`, 400 `ID not preregistered`.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use pitstop_core::store::EventStore;
use serde::Deserialize;

use crate::{AppState, PosStore, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct EmitEventRequest {
  pub id:        String,
  /// Emission time in milliseconds since the Unix epoch, caller-supplied.
  pub timestamp: i64,
}

/// `POST /events`
pub async fn emit<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<EmitEventRequest>,
) -> Result<Response, ApiError> {
  if !state
    .store
    .is_preregistered(&body.id)
    .await
    .map_err(ApiError::from_store)?
  {
    tracing::warn!(id = %body.id, "rejected event with unregistered id");
    return Ok(
      (StatusCode::BAD_REQUEST, "ID not preregistered").into_response(),
    );
  }

  state
    .store
    .record_event(&body.id, body.timestamp)
    .await
    .map_err(ApiError::from_store)?;

  Ok((StatusCode::OK, "Event stored").into_response())
}

/// `POST /events/preregister/:id` — add an id to the allow-list. Idempotent.
pub async fn preregister<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  state
    .store
    .preregister(&id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
