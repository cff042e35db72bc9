//! Handlers for `/catalog` endpoints.
//!
//! Each item family (product, service, non-inventory product) exposes the
//! same shape: create, lookup by id (404 when absent), lookup by exact name
//! (200 with a possibly empty list), and delete.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pitstop_core::{
  catalog::{
    NewNonInventoryProduct, NewProduct, NewServiceItem, NonInventoryProduct,
    Product, ServiceItem,
  },
  store::CatalogStore,
};

use crate::{AppState, PosStore, error::ApiError};

// ─── Products ────────────────────────────────────────────────────────────────

/// `POST /catalog/product`
pub async fn create_product<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError> {
  let product = state
    .store
    .add_product(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /catalog/product/id/:id`
pub async fn get_product<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
  let product = state
    .store
    .get_product(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;
  Ok(Json(product))
}

/// `GET /catalog/product/name/:name`
pub async fn find_products<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let products = state
    .store
    .find_products_by_name(&name)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(products))
}

/// `DELETE /catalog/product/:id`
pub async fn delete_product<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_product(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!("product {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Service items ───────────────────────────────────────────────────────────

/// `POST /catalog/service`
pub async fn create_service<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewServiceItem>,
) -> Result<impl IntoResponse, ApiError> {
  let item = state
    .store
    .add_service_item(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /catalog/service/id/:id`
pub async fn get_service<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<ServiceItem>, ApiError> {
  let item = state
    .store
    .get_service_item(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("service {id} not found")))?;
  Ok(Json(item))
}

/// `GET /catalog/service/name/:name`
pub async fn find_services<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<ServiceItem>>, ApiError> {
  let items = state
    .store
    .find_service_items_by_name(&name)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(items))
}

/// `DELETE /catalog/service/:id`
pub async fn delete_service<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_service_item(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!("service {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Non-inventory products ──────────────────────────────────────────────────

/// `POST /catalog/noninventory`
pub async fn create_non_inventory<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewNonInventoryProduct>,
) -> Result<impl IntoResponse, ApiError> {
  let item = state
    .store
    .add_non_inventory_product(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /catalog/noninventory/id/:id`
pub async fn get_non_inventory<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<NonInventoryProduct>, ApiError> {
  let item = state
    .store
    .get_non_inventory_product(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("non-inventory product {id} not found"))
    })?;
  Ok(Json(item))
}

/// `GET /catalog/noninventory/name/:name`
pub async fn find_non_inventory<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<NonInventoryProduct>>, ApiError> {
  let items = state
    .store
    .find_non_inventory_products_by_name(&name)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(items))
}

/// `DELETE /catalog/noninventory/:id`
pub async fn delete_non_inventory<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_non_inventory_product(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!(
      "non-inventory product {id} not found"
    )));
  }
  Ok(StatusCode::NO_CONTENT)
}
