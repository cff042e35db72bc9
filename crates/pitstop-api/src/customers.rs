//! Handlers for `/customers` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pitstop_core::{
  customer::{Customer, NewCustomer},
  store::CustomerStore,
};

use crate::{AppState, PosStore, error::ApiError};

/// `POST /customers` — 409 when the customer number is taken.
pub async fn create<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewCustomer>,
) -> Result<impl IntoResponse, ApiError> {
  let customer = state
    .store
    .add_customer(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(customer)))
}

/// `GET /customers`
pub async fn list<S: PosStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
  let customers = state
    .store
    .list_customers()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(customers))
}

/// `GET /customers/:id`
pub async fn get_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Customer>, ApiError> {
  let customer = state
    .store
    .get_customer(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("customer {id} not found")))?;
  Ok(Json(customer))
}

/// `GET /customers/number/:number`
pub async fn get_by_number<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(number): Path<String>,
) -> Result<Json<Customer>, ApiError> {
  let customer = state
    .store
    .get_customer_by_number(&number)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("customer {number:?} not found"))
    })?;
  Ok(Json(customer))
}

/// `DELETE /customers/:id`
pub async fn delete_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_customer(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!("customer {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
