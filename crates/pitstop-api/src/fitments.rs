//! Handlers for `/fitments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/fitments` | Body: [`NewPartFitment`]; 201 |
//! | `GET`  | `/fitments/:id` | 404 if not found |
//! | `GET`  | `/fitments/part/:part_id` | All fitments for a part |
//! | `PUT`  | `/fitments/:id` | Full field replacement |
//! | `DELETE` | `/fitments/:id` | 204 or 404 |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pitstop_core::{
  fitment::{NewPartFitment, PartFitment},
  store::FitmentStore,
};

use crate::{AppState, PosStore, error::ApiError};

/// `POST /fitments`
pub async fn create<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewPartFitment>,
) -> Result<impl IntoResponse, ApiError> {
  let fitment = state
    .store
    .add_fitment(body)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id = fitment.id, part = fitment.part_number_id, "created fitment");
  Ok((StatusCode::CREATED, Json(fitment)))
}

/// `GET /fitments/:id`
pub async fn get_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<PartFitment>, ApiError> {
  let fitment = state
    .store
    .get_fitment(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("fitment {id} not found")))?;
  Ok(Json(fitment))
}

/// `GET /fitments/part/:part_id`
pub async fn list_for_part<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(part_id): Path<i64>,
) -> Result<Json<Vec<PartFitment>>, ApiError> {
  let fitments = state
    .store
    .list_fitments_for_part(part_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(fitments))
}

/// `PUT /fitments/:id`
pub async fn update<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewPartFitment>,
) -> Result<Json<PartFitment>, ApiError> {
  let fitment = state
    .store
    .update_fitment(id, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("fitment {id} not found")))?;
  Ok(Json(fitment))
}

/// `DELETE /fitments/:id`
pub async fn delete_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_fitment(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!("fitment {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
