//! Handlers for `/locations` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pitstop_core::{
  location::{Location, NewLocation},
  store::LocationStore,
};

use crate::{AppState, PosStore, error::ApiError};

/// `POST /locations`
pub async fn create<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewLocation>,
) -> Result<impl IntoResponse, ApiError> {
  let location = state
    .store
    .add_location(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(location)))
}

/// `GET /locations`
pub async fn list<S: PosStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Location>>, ApiError> {
  let locations = state
    .store
    .list_locations()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(locations))
}

/// `GET /locations/:id`
pub async fn get_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Location>, ApiError> {
  let location = state
    .store
    .get_location(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("location {id} not found")))?;
  Ok(Json(location))
}

/// `PUT /locations/:id`
pub async fn update<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewLocation>,
) -> Result<Json<Location>, ApiError> {
  let location = state
    .store
    .update_location(id, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("location {id} not found")))?;
  Ok(Json(location))
}

/// `DELETE /locations/:id`
pub async fn delete_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_location(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!("location {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
