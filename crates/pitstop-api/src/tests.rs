//! Integration tests driving the routers with `tower::ServiceExt::oneshot`
//! against an in-memory store.

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use pitstop_client::{CatalogClient, NhtsaClient, PeopleClient};
use pitstop_core::{
  person::NewPerson,
  shop::{NewShop, NewTechnician},
  store::{EventStore, PeopleStore, ShopStore},
};
use pitstop_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AppState, api_router, proxy_router};

/// A port nothing listens on; connecting fails fast.
const DEAD_UPSTREAM: &str = "http://127.0.0.1:1";

async fn make_state() -> AppState<SqliteStore> {
  make_state_with(DEAD_UPSTREAM, DEAD_UPSTREAM).await
}

async fn make_state_with(
  people_url: &str,
  catalog_url: &str,
) -> AppState<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  AppState::new(
    store,
    NhtsaClient::new(DEAD_UPSTREAM).unwrap(),
    PeopleClient::new(people_url).unwrap(),
    CatalogClient::new(catalog_url).unwrap(),
  )
}

async fn send(
  router: Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = router.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = serde_json::from_slice(&bytes)
    .unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)));
  (status, value)
}

async fn api(
  state: &AppState<SqliteStore>,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  send(api_router(state.clone()), method, uri, body).await
}

// ─── Vehicles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn vehicle_create_get_delete_cycle() {
  let state = make_state().await;

  let (status, created) = api(
    &state,
    "POST",
    "/vehicles",
    Some(json!({
      "kind": "passenger_truck",
      "make": "Ford",
      "model": "F-150",
      "year": 2021,
      "vin": "1FTEW1EP5MKE00001"
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_i64().unwrap();

  let (status, fetched) =
    api(&state, "GET", &format!("/vehicles/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, created);

  let (status, by_vin) =
    api(&state, "GET", "/vehicles/vin/1FTEW1EP5MKE00001", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(by_vin["id"], created["id"]);

  let (status, _) =
    api(&state, "DELETE", &format!("/vehicles/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, _) = api(&state, "GET", &format!("/vehicles/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_vin_returns_409() {
  let state = make_state().await;
  let body = json!({
    "kind": "van", "make": "RAM", "model": "ProMaster",
    "year": 2022, "vin": "DUPVIN001"
  });

  let (status, _) = api(&state, "POST", "/vehicles", Some(body.clone())).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, err) = api(&state, "POST", "/vehicles", Some(body)).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(err["error"].as_str().unwrap().contains("DUPVIN001"));
}

#[tokio::test]
async fn vehicle_kind_outside_closed_set_is_rejected() {
  let state = make_state().await;
  let (status, _) = api(
    &state,
    "POST",
    "/vehicles",
    Some(json!({
      "kind": "sedan", "make": "Honda", "model": "Civic", "year": 2020
    })),
  )
  .await;
  // Serde refuses the unknown discriminant before any handler runs.
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn event_without_preregistration_is_rejected() {
  let state = make_state().await;

  let (status, body) = api(
    &state,
    "POST",
    "/events",
    Some(json!({ "id": "Catalog-000001-0000000001", "timestamp": 1700000000000i64 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body, json!("ID not preregistered"));

  // Nothing was stored.
  let events = state
    .store
    .list_events_for_id("Catalog-000001-0000000001")
    .await
    .unwrap();
  assert!(events.is_empty());
}

#[tokio::test]
async fn preregistered_event_is_stored_with_submitted_timestamp() {
  let state = make_state().await;

  let (status, _) = api(
    &state,
    "POST",
    "/events/preregister/Catalog-000001-0000000001",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, body) = api(
    &state,
    "POST",
    "/events",
    Some(json!({ "id": "Catalog-000001-0000000001", "timestamp": 1700000000123i64 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!("Event stored"));

  let events = state
    .store
    .list_events_for_id("Catalog-000001-0000000001")
    .await
    .unwrap();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].timestamp, 1_700_000_000_123);
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn product_lookup_by_id_and_name() {
  let state = make_state().await;

  let (status, created) = api(
    &state,
    "POST",
    "/catalog/product",
    Some(json!({ "name": "Oil Filter", "sku": "SKU-1" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_i64().unwrap();

  let (status, _) =
    api(&state, "GET", &format!("/catalog/product/id/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);

  let (status, list) =
    api(&state, "GET", "/catalog/product/name/Oil%20Filter", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list.as_array().unwrap().len(), 1);

  // Unknown name: 200 with an empty list, not 404.
  let (status, list) =
    api(&state, "GET", "/catalog/product/name/Nothing", None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(list.as_array().unwrap().is_empty());

  let (status, _) =
    api(&state, "GET", "/catalog/product/id/999", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Fitments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fitment_lifecycle_over_http() {
  let state = make_state().await;

  let (status, created) = api(
    &state,
    "POST",
    "/fitments",
    Some(json!({
      "part_number_id": 77,
      "make_id": 460,
      "year": "2015-2020",
      "engine_type": "3.5L V6",
      "notes": "Except with Off-Road Package"
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_i64().unwrap();
  assert_eq!(created["variable_value_ids"], json!([]));

  let (status, list) = api(&state, "GET", "/fitments/part/77", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list.as_array().unwrap().len(), 1);

  // Update notes only; everything else is resubmitted unchanged.
  let (status, updated) = api(
    &state,
    "PUT",
    &format!("/fitments/{id}"),
    Some(json!({
      "part_number_id": 77,
      "make_id": 460,
      "year": "2015-2020",
      "engine_type": "3.5L V6",
      "notes": "Requires Modification"
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["notes"], json!("Requires Modification"));
  assert_eq!(updated["engine_type"], created["engine_type"]);

  let (status, _) =
    api(&state, "DELETE", &format!("/fitments/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = api(&state, "GET", &format!("/fitments/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Reference ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn reference_lookups_answer_empty_not_error() {
  let state = make_state().await;

  let (status, list) = api(&state, "GET", "/reference/manufacturers", None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(list.as_array().unwrap().is_empty());

  let (status, _) =
    api(&state, "GET", "/reference/manufacturers/12", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, list) = api(&state, "GET", "/reference/makes/12", None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn refresh_with_dead_upstream_is_502_and_keeps_rows() {
  let state = make_state().await;

  let (status, err) = api(
    &state,
    "POST",
    "/reference/manufacturers/refresh?force=true",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert!(err["error"].as_str().unwrap().contains("transport"));
}

#[tokio::test]
async fn refresh_of_unknown_make_is_404() {
  let state = make_state().await;
  let (status, _) =
    api(&state, "POST", "/reference/models/460/refresh", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_happy_path_and_wrong_password() {
  let state = make_state().await;

  let (status, user) = api(
    &state,
    "POST",
    "/users",
    Some(json!({
      "username": "worker",
      "password": "hunter2",
      "roles": ["MANAGER"]
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  // The hash never leaves the server.
  assert!(user.get("password_hash").is_none());

  let (status, resp) = api(
    &state,
    "POST",
    "/users/login",
    Some(json!({ "username": "worker", "password": "hunter2" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let token = resp["token"].as_str().unwrap().to_owned();

  // The token is introspectable, then revocable.
  let (status, _) =
    api(&state, "GET", &format!("/users/tokens/{token}"), None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, _) =
    api(&state, "DELETE", &format!("/users/tokens/{token}"), None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, _) =
    api(&state, "GET", &format!("/users/tokens/{token}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  // Wrong password: 401, and no new token row.
  let (status, err) = api(
    &state,
    "POST",
    "/users/login",
    Some(json!({ "username": "worker", "password": "wrong" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(err["error"], json!("Invalid credentials"));
}

// ─── Proxies ─────────────────────────────────────────────────────────────────

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_server(router: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, router).await.unwrap();
  });
  format!("http://{addr}")
}

#[tokio::test]
async fn technician_person_proxy_roundtrip() {
  // The "people service": a full API router over its own store.
  let people_state = make_state().await;
  let person = people_state
    .store
    .add_person(NewPerson {
      first_name:      "Ada".into(),
      last_name:       "Lovelace".into(),
      primary_email:   "ada@example.com".into(),
      secondary_email: None,
      phone_numbers:   vec![],
      username:        None,
    })
    .await
    .unwrap();
  let people_url = spawn_server(
    Router::new().nest("/api", api_router(people_state.clone())),
  )
  .await;

  // The "shop manager": its own store, pointing its client at the people
  // service.
  let shop_state = make_state_with(&people_url, DEAD_UPSTREAM).await;
  let shop = shop_state
    .store
    .add_shop(NewShop { name: "Main St".into(), address: "1 Main St".into() })
    .await
    .unwrap();
  let tech = shop_state
    .store
    .add_technician(shop.id, NewTechnician { person_id: person.id })
    .await
    .unwrap()
    .unwrap();

  let (status, body) = send(
    proxy_router(shop_state.clone()),
    "GET",
    &format!("/technicians/{}/person", tech.id),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["first_name"], json!("Ada"));

  // A technician whose person id has no record upstream: 404, not 502.
  let ghost = shop_state
    .store
    .add_technician(shop.id, NewTechnician { person_id: 9999 })
    .await
    .unwrap()
    .unwrap();
  let (status, _) = send(
    proxy_router(shop_state.clone()),
    "GET",
    &format!("/technicians/{}/person", ghost.id),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dead_upstream_is_502_not_404() {
  let state = make_state().await;
  let shop = state
    .store
    .add_shop(NewShop { name: "Main St".into(), address: "1 Main St".into() })
    .await
    .unwrap();
  let tech = state
    .store
    .add_technician(shop.id, NewTechnician { person_id: 1 })
    .await
    .unwrap()
    .unwrap();

  let (status, _) = send(
    proxy_router(state.clone()),
    "GET",
    &format!("/technicians/{}/person", tech.id),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);

  let (status, _) =
    send(proxy_router(state.clone()), "GET", "/services/1/details", None).await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);

  // An unknown technician is still a plain 404 — the local lookup decides
  // before any network call happens.
  let (status, _) = send(
    proxy_router(state),
    "GET",
    "/technicians/999/person",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn service_details_proxy_roundtrip() {
  let catalog_state = make_state().await;
  let (_, created) = api(
    &catalog_state,
    "POST",
    "/catalog/service",
    Some(json!({ "name": "Tire Rotation", "short_description": "Rotate all four" })),
  )
  .await;
  let service_id = created["id"].as_i64().unwrap();
  let catalog_url = spawn_server(
    Router::new().nest("/api", api_router(catalog_state.clone())),
  )
  .await;

  let shop_state = make_state_with(DEAD_UPSTREAM, &catalog_url).await;
  let (status, body) = send(
    proxy_router(shop_state),
    "GET",
    &format!("/services/{service_id}/details"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], json!("Tire Rotation"));
}
