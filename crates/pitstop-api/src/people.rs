//! Handlers for `/people` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pitstop_core::{
  person::{NewPerson, Person},
  store::PeopleStore,
};

use crate::{AppState, PosStore, error::ApiError};

/// `POST /people`
pub async fn create<S: PosStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewPerson>,
) -> Result<impl IntoResponse, ApiError> {
  let person = state
    .store
    .add_person(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

/// `GET /people`
pub async fn list<S: PosStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Person>>, ApiError> {
  let people = state
    .store
    .list_people()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(people))
}

/// `GET /people/:id`
pub async fn get_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Person>, ApiError> {
  let person = state
    .store
    .get_person(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}

/// `PUT /people/:id`
pub async fn update<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewPerson>,
) -> Result<Json<Person>, ApiError> {
  let person = state
    .store
    .update_person(id, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}

/// `DELETE /people/:id`
pub async fn delete_one<S: PosStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !state
    .store
    .delete_person(id)
    .await
    .map_err(ApiError::from_store)?
  {
    return Err(ApiError::NotFound(format!("person {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
