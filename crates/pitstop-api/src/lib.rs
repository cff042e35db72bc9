//! JSON REST API for the pitstop platform.
//!
//! Exposes axum [`Router`]s backed by any store implementing the
//! `pitstop_core::store` traits. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new()
//!   .nest("/api", pitstop_api::api_router(state.clone()))
//!   .merge(pitstop_api::proxy_router(state))
//! ```

pub mod catalog;
pub mod customers;
pub mod error;
pub mod events;
pub mod fitments;
pub mod locations;
pub mod people;
pub mod reference;
pub mod shop;
pub mod users;
pub mod vehicles;

use axum::{
  Router,
  routing::{delete, get, post},
};
use pitstop_client::{CatalogClient, NhtsaClient, PeopleClient};
use pitstop_core::store::{
  AuthStore, CatalogStore, CustomerStore, EventStore, FitmentStore,
  LocationStore, PeopleStore, ReferenceStore, ShopStore, VehicleStore,
};

pub use error::ApiError;

// ─── Store alias ─────────────────────────────────────────────────────────────

/// A backend implementing every pitstop store trait.
pub trait PosStore:
  ReferenceStore
  + VehicleStore
  + FitmentStore
  + CatalogStore
  + PeopleStore
  + LocationStore
  + CustomerStore
  + EventStore
  + AuthStore
  + ShopStore
  + Clone
  + Send
  + Sync
  + 'static
{
}

impl<T> PosStore for T where
  T: ReferenceStore
    + VehicleStore
    + FitmentStore
    + CatalogStore
    + PeopleStore
    + LocationStore
    + CustomerStore
    + EventStore
    + AuthStore
    + ShopStore
    + Clone
    + Send
    + Sync
    + 'static
{
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: PosStore> {
  pub store:   S,
  /// Upstream reference source for the taxonomy refresh path.
  pub nhtsa:   NhtsaClient,
  /// Sibling-service clients for the shop proxy endpoints.
  pub people:  PeopleClient,
  pub catalog: CatalogClient,
  /// Taxonomy rows older than this are refetched on refresh.
  pub refresh_max_age: chrono::Duration,
  /// Lifetime of tokens issued at login.
  pub token_ttl:       chrono::Duration,
}

// ─── Routers ─────────────────────────────────────────────────────────────────

/// Build the `/api` router: catalog, vehicles, fitments, reference taxonomy,
/// events, people, locations, customers, users, and shops.
pub fn api_router<S: PosStore>(state: AppState<S>) -> Router<()> {
  Router::new()
    // Catalog
    .route("/catalog/product", post(catalog::create_product::<S>))
    .route("/catalog/product/id/{id}", get(catalog::get_product::<S>))
    .route("/catalog/product/name/{name}", get(catalog::find_products::<S>))
    .route("/catalog/product/{id}", delete(catalog::delete_product::<S>))
    .route("/catalog/service", post(catalog::create_service::<S>))
    .route("/catalog/service/id/{id}", get(catalog::get_service::<S>))
    .route("/catalog/service/name/{name}", get(catalog::find_services::<S>))
    .route("/catalog/service/{id}", delete(catalog::delete_service::<S>))
    .route("/catalog/noninventory", post(catalog::create_non_inventory::<S>))
    .route(
      "/catalog/noninventory/id/{id}",
      get(catalog::get_non_inventory::<S>),
    )
    .route(
      "/catalog/noninventory/name/{name}",
      get(catalog::find_non_inventory::<S>),
    )
    .route(
      "/catalog/noninventory/{id}",
      delete(catalog::delete_non_inventory::<S>),
    )
    // Vehicles
    .route(
      "/vehicles",
      get(vehicles::list::<S>).post(vehicles::create::<S>),
    )
    .route(
      "/vehicles/{id}",
      get(vehicles::get_one::<S>)
        .put(vehicles::update::<S>)
        .delete(vehicles::delete_one::<S>),
    )
    .route(
      "/vehicles/vin/{vin}",
      get(vehicles::get_by_vin::<S>)
        .put(vehicles::update_by_vin::<S>)
        .delete(vehicles::delete_by_vin::<S>),
    )
    // Fitments
    .route("/fitments", post(fitments::create::<S>))
    .route(
      "/fitments/{id}",
      get(fitments::get_one::<S>)
        .put(fitments::update::<S>)
        .delete(fitments::delete_one::<S>),
    )
    .route("/fitments/part/{part_id}", get(fitments::list_for_part::<S>))
    // Reference taxonomy
    .route("/reference/manufacturers", get(reference::list_manufacturers::<S>))
    .route(
      "/reference/manufacturers/{id}",
      get(reference::get_manufacturer::<S>),
    )
    .route(
      "/reference/manufacturers/refresh",
      post(reference::refresh_manufacturers::<S>),
    )
    .route("/reference/makes/{manufacturer_id}", get(reference::list_makes::<S>))
    .route(
      "/reference/makes/{manufacturer_id}/refresh",
      post(reference::refresh_makes::<S>),
    )
    .route("/reference/makes/code/{code}", get(reference::get_make_by_code::<S>))
    .route("/reference/makes/name/{name}", get(reference::get_make_by_name::<S>))
    .route("/reference/models/{make_id}", get(reference::list_models::<S>))
    .route(
      "/reference/models/{make_id}/refresh",
      post(reference::refresh_models::<S>),
    )
    .route(
      "/reference/vehicle-types/{make_id}",
      get(reference::list_vehicle_types::<S>),
    )
    .route(
      "/reference/vehicle-types/{make_id}/refresh",
      post(reference::refresh_vehicle_types::<S>),
    )
    .route("/reference/variables", get(reference::list_variables::<S>))
    .route(
      "/reference/variables/refresh",
      post(reference::refresh_variables::<S>),
    )
    .route(
      "/reference/variables/{id}/values",
      get(reference::list_variable_values::<S>),
    )
    .route(
      "/reference/variables/{id}/values/refresh",
      post(reference::refresh_variable_values::<S>),
    )
    // Events
    .route("/events", post(events::emit::<S>))
    .route("/events/preregister/{id}", post(events::preregister::<S>))
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete_one::<S>),
    )
    // Locations
    .route(
      "/locations",
      get(locations::list::<S>).post(locations::create::<S>),
    )
    .route(
      "/locations/{id}",
      get(locations::get_one::<S>)
        .put(locations::update::<S>)
        .delete(locations::delete_one::<S>),
    )
    // Customers
    .route(
      "/customers",
      get(customers::list::<S>).post(customers::create::<S>),
    )
    .route(
      "/customers/{id}",
      get(customers::get_one::<S>).delete(customers::delete_one::<S>),
    )
    .route(
      "/customers/number/{number}",
      get(customers::get_by_number::<S>),
    )
    // Users & tokens
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    .route("/users/login", post(users::login::<S>))
    .route("/users/{username}", get(users::get_one::<S>))
    .route("/users/id/{id}", delete(users::delete_one::<S>))
    .route(
      "/users/tokens/{token}",
      get(users::get_token::<S>).delete(users::delete_token::<S>),
    )
    // Shops
    .route("/shops", post(shop::create_shop::<S>))
    .route("/shops/{id}", get(shop::get_shop::<S>))
    .route(
      "/shops/{id}/technicians",
      get(shop::list_technicians::<S>).post(shop::add_technician::<S>),
    )
    .with_state(state)
}

/// Build the root-level proxy router: technician-person and service-detail
/// lookups that fan out to sibling services.
pub fn proxy_router<S: PosStore>(state: AppState<S>) -> Router<()> {
  Router::new()
    .route("/technicians/{id}/person", get(shop::technician_person::<S>))
    .route("/services/{id}/details", get(shop::service_details::<S>))
    .with_state(state)
}

impl<S: PosStore> AppState<S> {
  /// State with the default refresh and token policies.
  pub fn new(
    store: S,
    nhtsa: NhtsaClient,
    people: PeopleClient,
    catalog: CatalogClient,
  ) -> Self {
    Self {
      store,
      nhtsa,
      people,
      catalog,
      refresh_max_age: chrono::Duration::hours(24),
      token_ttl:       chrono::Duration::hours(1),
    }
  }
}

#[cfg(test)]
mod tests;
