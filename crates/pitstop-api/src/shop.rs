//! Handlers for `/shops` and the root-level proxy endpoints.
//!
//! The proxies resolve a local record first (technician, shop service), then
//! fetch the related record from a sibling service. A missing record on
//! either side is 404; an unreachable sibling is 502 — the two outcomes are
//! deliberately not conflated.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pitstop_core::{
  catalog::ServiceItem,
  person::Person,
  shop::{NewShop, NewTechnician, Shop, Technician},
  store::ShopStore,
};

use crate::{AppState, PosStore, error::ApiError};

// ─── Shop CRUD ───────────────────────────────────────────────────────────────

/// `POST /shops`
pub async fn create_shop<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewShop>,
) -> Result<impl IntoResponse, ApiError> {
  let shop = state
    .store
    .add_shop(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(shop)))
}

/// `GET /shops/:id`
pub async fn get_shop<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Shop>, ApiError> {
  let shop = state
    .store
    .get_shop(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("shop {id} not found")))?;
  Ok(Json(shop))
}

/// `POST /shops/:id/technicians` — 404 when the shop does not exist.
pub async fn add_technician<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewTechnician>,
) -> Result<impl IntoResponse, ApiError> {
  let technician = state
    .store
    .add_technician(id, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("shop {id} not found")))?;
  Ok((StatusCode::CREATED, Json(technician)))
}

/// `GET /shops/:id/technicians`
pub async fn list_technicians<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Technician>>, ApiError> {
  let technicians = state
    .store
    .list_technicians(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(technicians))
}

// ─── Proxies ─────────────────────────────────────────────────────────────────

/// `GET /technicians/:id/person` — resolve the technician, then fetch their
/// person record from the people service.
pub async fn technician_person<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Person>, ApiError> {
  let technician = state
    .store
    .get_technician(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("technician {id} not found")))?;

  let person = state
    .people
    .get_person(technician.person_id)
    .await
    .map_err(|e| ApiError::Upstream(e.to_string()))?
    .ok_or_else(|| {
      ApiError::NotFound(format!(
        "person {} not found",
        technician.person_id
      ))
    })?;

  Ok(Json(person))
}

/// `GET /services/:id/details` — fetch a service item from the catalog
/// service.
pub async fn service_details<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<ServiceItem>, ApiError> {
  let item = state
    .catalog
    .get_service_item(id)
    .await
    .map_err(|e| ApiError::Upstream(e.to_string()))?
    .ok_or_else(|| ApiError::NotFound(format!("service {id} not found")))?;

  Ok(Json(item))
}
