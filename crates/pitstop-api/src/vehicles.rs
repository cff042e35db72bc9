//! Handlers for `/vehicles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/vehicles` | All registered vehicles |
//! | `POST` | `/vehicles` | Body: [`NewVehicle`]; 201, 409 on duplicate VIN |
//! | `GET`/`PUT`/`DELETE` | `/vehicles/:id` | 404 if not found |
//! | `GET`/`PUT`/`DELETE` | `/vehicles/vin/:vin` | 404 if not found |
//!
//! The vehicle kind is fixed at creation; `PUT` replaces the other fields.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pitstop_core::{
  store::VehicleStore,
  vehicle::{NewVehicle, Vehicle},
};

use crate::{AppState, PosStore, error::ApiError};

/// `POST /vehicles`
pub async fn create<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewVehicle>,
) -> Result<impl IntoResponse, ApiError> {
  let vehicle = state
    .store
    .add_vehicle(body)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id = vehicle.id, "created vehicle");
  Ok((StatusCode::CREATED, Json(vehicle)))
}

/// `GET /vehicles`
pub async fn list<S: PosStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
  let vehicles = state
    .store
    .list_vehicles()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(vehicles))
}

/// `GET /vehicles/:id`
pub async fn get_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vehicle>, ApiError> {
  let vehicle = state
    .store
    .get_vehicle(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("vehicle {id} not found")))?;
  Ok(Json(vehicle))
}

/// `GET /vehicles/vin/:vin`
pub async fn get_by_vin<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(vin): Path<String>,
) -> Result<Json<Vehicle>, ApiError> {
  let vehicle = state
    .store
    .get_vehicle_by_vin(&vin)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("vehicle with VIN {vin} not found"))
    })?;
  Ok(Json(vehicle))
}

/// `PUT /vehicles/:id`
pub async fn update<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewVehicle>,
) -> Result<Json<Vehicle>, ApiError> {
  let vehicle = state
    .store
    .update_vehicle(id, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("vehicle {id} not found")))?;
  tracing::info!(id, "updated vehicle");
  Ok(Json(vehicle))
}

/// `PUT /vehicles/vin/:vin`
pub async fn update_by_vin<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(vin): Path<String>,
  Json(body): Json<NewVehicle>,
) -> Result<Json<Vehicle>, ApiError> {
  let vehicle = state
    .store
    .update_vehicle_by_vin(&vin, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("vehicle with VIN {vin} not found"))
    })?;
  tracing::info!(vin, "updated vehicle");
  Ok(Json(vehicle))
}

/// `DELETE /vehicles/:id`
pub async fn delete_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  let deleted = state
    .store
    .delete_vehicle(id)
    .await
    .map_err(ApiError::from_store)?;
  if !deleted {
    return Err(ApiError::NotFound(format!("vehicle {id} not found")));
  }
  tracing::info!(id, "deleted vehicle");
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /vehicles/vin/:vin`
pub async fn delete_by_vin<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(vin): Path<String>,
) -> Result<StatusCode, ApiError> {
  let deleted = state
    .store
    .delete_vehicle_by_vin(&vin)
    .await
    .map_err(ApiError::from_store)?;
  if !deleted {
    return Err(ApiError::NotFound(format!(
      "vehicle with VIN {vin} not found"
    )));
  }
  tracing::info!(vin, "deleted vehicle");
  Ok(StatusCode::NO_CONTENT)
}
