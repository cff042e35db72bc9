//! Handlers for `/reference` endpoints — the vehicle taxonomy.
//!
//! Reads are pure lookups against the persisted taxonomy; not-found is a
//! normal outcome (404 for single records, an empty list for collections).
//!
//! The `POST .../refresh` endpoints pull fresh rows from the NHTSA upstream
//! and swap the scoped set. A refresh is skipped while the newest scoped row
//! is younger than the configured maximum age, unless `?force=true`; an
//! unreachable upstream answers 502 and leaves the stored rows untouched.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use pitstop_core::{
  store::ReferenceStore,
  taxonomy::{
    Make, Manufacturer, Model, VehicleType, VehicleVariable,
    VehicleVariableValue,
  },
};
use serde::{Deserialize, Serialize};

use crate::{AppState, PosStore, error::ApiError};

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// `GET /reference/manufacturers`
pub async fn list_manufacturers<S: PosStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Manufacturer>>, ApiError> {
  let rows = state
    .store
    .list_manufacturers()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

/// `GET /reference/manufacturers/:id`
pub async fn get_manufacturer<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Manufacturer>, ApiError> {
  let row = state
    .store
    .get_manufacturer(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("manufacturer {id} not found"))
    })?;
  Ok(Json(row))
}

/// `GET /reference/makes/:manufacturer_id`
pub async fn list_makes<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(manufacturer_id): Path<i64>,
) -> Result<Json<Vec<Make>>, ApiError> {
  let rows = state
    .store
    .list_makes(manufacturer_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

/// `GET /reference/makes/code/:code`
pub async fn get_make_by_code<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Make>, ApiError> {
  let row = state
    .store
    .get_make_by_external_code(&code)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("make with code {code:?} not found"))
    })?;
  Ok(Json(row))
}

/// `GET /reference/makes/name/:name`
pub async fn get_make_by_name<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<Make>, ApiError> {
  let row = state
    .store
    .get_make_by_name(&name)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("make named {name:?} not found"))
    })?;
  Ok(Json(row))
}

/// `GET /reference/models/:make_id`
pub async fn list_models<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(make_id): Path<i64>,
) -> Result<Json<Vec<Model>>, ApiError> {
  let rows = state
    .store
    .list_models(make_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

/// `GET /reference/vehicle-types/:make_id`
pub async fn list_vehicle_types<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(make_id): Path<i64>,
) -> Result<Json<Vec<VehicleType>>, ApiError> {
  let rows = state
    .store
    .list_vehicle_types(make_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

/// `GET /reference/variables`
pub async fn list_variables<S: PosStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<VehicleVariable>>, ApiError> {
  let rows = state
    .store
    .list_variables()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

/// `GET /reference/variables/:id/values`
pub async fn list_variable_values<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<VehicleVariableValue>>, ApiError> {
  let rows = state
    .store
    .list_variable_values(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

// ─── Refresh ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
  /// Refetch even if the stored rows are still fresh.
  #[serde(default)]
  pub force: bool,
}

/// Outcome of a refresh request.
#[derive(Debug, Serialize)]
pub struct RefreshOutcome {
  /// Whether the upstream was consulted, or the cached rows were still
  /// fresh.
  pub refreshed: bool,
  /// Number of rows now stored in the refreshed scope.
  pub count:     usize,
}

/// Whether a scoped row set is still fresh enough to skip the upstream call.
fn still_fresh(
  newest: Option<DateTime<Utc>>,
  max_age: chrono::Duration,
) -> bool {
  match newest {
    Some(at) => Utc::now() - at < max_age,
    None => false,
  }
}

fn upstream_err(e: pitstop_client::Error) -> ApiError {
  ApiError::Upstream(e.to_string())
}

/// `POST /reference/manufacturers/refresh[?force=true]`
pub async fn refresh_manufacturers<S: PosStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshOutcome>, ApiError> {
  let current = state
    .store
    .list_manufacturers()
    .await
    .map_err(ApiError::from_store)?;

  let newest = current.iter().map(|m| m.refreshed_at).max();
  if !params.force && still_fresh(newest, state.refresh_max_age) {
    return Ok(Json(RefreshOutcome { refreshed: false, count: current.len() }));
  }

  let rows = state.nhtsa.all_manufacturers().await.map_err(upstream_err)?;
  let count = rows.len();
  state
    .store
    .replace_manufacturers(rows)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(count, "refreshed manufacturers from upstream");
  Ok(Json(RefreshOutcome { refreshed: true, count }))
}

/// `POST /reference/makes/:manufacturer_id/refresh[?force=true]`
pub async fn refresh_makes<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(manufacturer_id): Path<i64>,
  Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshOutcome>, ApiError> {
  state
    .store
    .get_manufacturer(manufacturer_id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("manufacturer {manufacturer_id} not found"))
    })?;

  let current = state
    .store
    .list_makes(manufacturer_id)
    .await
    .map_err(ApiError::from_store)?;

  let newest = current.iter().map(|m| m.refreshed_at).max();
  if !params.force && still_fresh(newest, state.refresh_max_age) {
    return Ok(Json(RefreshOutcome { refreshed: false, count: current.len() }));
  }

  let rows = state
    .nhtsa
    .makes_for_manufacturer(manufacturer_id)
    .await
    .map_err(upstream_err)?;
  let count = rows.len();
  state
    .store
    .replace_makes(manufacturer_id, rows)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(manufacturer_id, count, "refreshed makes from upstream");
  Ok(Json(RefreshOutcome { refreshed: true, count }))
}

/// `POST /reference/models/:make_id/refresh[?force=true]`
pub async fn refresh_models<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(make_id): Path<i64>,
  Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshOutcome>, ApiError> {
  state
    .store
    .get_make(make_id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("make {make_id} not found")))?;

  let current = state
    .store
    .list_models(make_id)
    .await
    .map_err(ApiError::from_store)?;

  let newest = current.iter().map(|m| m.refreshed_at).max();
  if !params.force && still_fresh(newest, state.refresh_max_age) {
    return Ok(Json(RefreshOutcome { refreshed: false, count: current.len() }));
  }

  let rows = state
    .nhtsa
    .models_for_make(make_id)
    .await
    .map_err(upstream_err)?;
  let count = rows.len();
  state
    .store
    .replace_models(make_id, rows)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(make_id, count, "refreshed models from upstream");
  Ok(Json(RefreshOutcome { refreshed: true, count }))
}

/// `POST /reference/vehicle-types/:make_id/refresh[?force=true]`
pub async fn refresh_vehicle_types<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(make_id): Path<i64>,
  Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshOutcome>, ApiError> {
  state
    .store
    .get_make(make_id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("make {make_id} not found")))?;

  let current = state
    .store
    .list_vehicle_types(make_id)
    .await
    .map_err(ApiError::from_store)?;

  let newest = current.iter().map(|vt| vt.refreshed_at).max();
  if !params.force && still_fresh(newest, state.refresh_max_age) {
    return Ok(Json(RefreshOutcome { refreshed: false, count: current.len() }));
  }

  let rows = state
    .nhtsa
    .vehicle_types_for_make(make_id)
    .await
    .map_err(upstream_err)?;
  let stored = state
    .store
    .replace_vehicle_types(make_id, rows)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(make_id, count = stored.len(), "refreshed vehicle types");
  Ok(Json(RefreshOutcome { refreshed: true, count: stored.len() }))
}

/// `POST /reference/variables/refresh[?force=true]`
pub async fn refresh_variables<S: PosStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshOutcome>, ApiError> {
  let current = state
    .store
    .list_variables()
    .await
    .map_err(ApiError::from_store)?;

  let newest = current.iter().map(|v| v.refreshed_at).max();
  if !params.force && still_fresh(newest, state.refresh_max_age) {
    return Ok(Json(RefreshOutcome { refreshed: false, count: current.len() }));
  }

  let rows = state.nhtsa.variables().await.map_err(upstream_err)?;
  let count = rows.len();
  state
    .store
    .replace_variables(rows)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(count, "refreshed vehicle variables from upstream");
  Ok(Json(RefreshOutcome { refreshed: true, count }))
}

/// `POST /reference/variables/:id/values/refresh[?force=true]`
pub async fn refresh_variable_values<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshOutcome>, ApiError> {
  let current = state
    .store
    .list_variable_values(id)
    .await
    .map_err(ApiError::from_store)?;

  let newest = current.iter().map(|v| v.refreshed_at).max();
  if !params.force && still_fresh(newest, state.refresh_max_age) {
    return Ok(Json(RefreshOutcome { refreshed: false, count: current.len() }));
  }

  let rows = state.nhtsa.variable_values(id).await.map_err(upstream_err)?;
  let stored = state
    .store
    .replace_variable_values(id, rows)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(variable = id, count = stored.len(), "refreshed variable values");
  Ok(Json(RefreshOutcome { refreshed: true, count: stored.len() }))
}
