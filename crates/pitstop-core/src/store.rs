//! Store traits implemented by storage backends (e.g. `pitstop-store-sqlite`).
//!
//! One trait per former service boundary, mirroring the platform's module
//! split. Higher layers (`pitstop-api`, `pitstop-server`) depend on these
//! abstractions, never on a concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (tokio with `axum`). Not-found is a normal
//! outcome and comes back as `None` or an empty `Vec`; only genuine storage
//! failures surface through `Self::Error`.

use std::future::Future;

use crate::{
  auth::{AuthToken, NewUser, Role, User},
  catalog::{
    NewNonInventoryProduct, NewProduct, NewServiceItem, NonInventoryProduct,
    Product, ServiceItem,
  },
  customer::{Customer, NewCustomer},
  event::EmittedEvent,
  fitment::{NewPartFitment, PartFitment},
  location::{Location, NewLocation},
  person::{NewPerson, Person},
  shop::{NewShop, NewTechnician, Shop, Technician},
  taxonomy::{
    Make, Manufacturer, Model, NewVariableValue, NewVehicleType, VehicleType,
    VehicleVariable, VehicleVariableValue,
  },
  vehicle::{NewVehicle, Vehicle},
};

// ─── Backend error classification ────────────────────────────────────────────

/// Bound for backend error types, with a classification hook so the HTTP
/// layer can answer 409 for uniqueness conflicts (VIN, customer number,
/// username) without knowing the concrete backend error.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// Whether this error is a uniqueness conflict rather than a storage
  /// failure.
  fn is_conflict(&self) -> bool { false }
}

// ─── Reference taxonomy ──────────────────────────────────────────────────────

/// The reference taxonomy store: manufacturers, makes, models, vehicle types,
/// and variable/value pairs.
///
/// Reads are pure lookups. The `replace_*` operations exist for the upstream
/// refresh path: each swaps the scoped rows for a freshly fetched set in one
/// transaction, so readers never observe a half-replaced collection.
pub trait ReferenceStore: Send + Sync {
  type Error: StoreError;

  fn get_manufacturer(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Manufacturer>, Self::Error>> + Send + '_;

  fn list_manufacturers(
    &self,
  ) -> impl Future<Output = Result<Vec<Manufacturer>, Self::Error>> + Send + '_;

  fn get_make(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Make>, Self::Error>> + Send + '_;

  /// All makes owned by a manufacturer. Unknown manufacturer yields an empty
  /// list.
  fn list_makes(
    &self,
    manufacturer_id: i64,
  ) -> impl Future<Output = Result<Vec<Make>, Self::Error>> + Send + '_;

  fn get_make_by_external_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Make>, Self::Error>> + Send + 'a;

  fn get_make_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Make>, Self::Error>> + Send + 'a;

  fn list_models(
    &self,
    make_id: i64,
  ) -> impl Future<Output = Result<Vec<Model>, Self::Error>> + Send + '_;

  fn list_vehicle_types(
    &self,
    make_id: i64,
  ) -> impl Future<Output = Result<Vec<VehicleType>, Self::Error>> + Send + '_;

  fn list_variables(
    &self,
  ) -> impl Future<Output = Result<Vec<VehicleVariable>, Self::Error>> + Send + '_;

  fn list_variable_values(
    &self,
    variable_id: i64,
  ) -> impl Future<Output = Result<Vec<VehicleVariableValue>, Self::Error>> + Send + '_;

  // ── Bulk replacement (upstream refresh) ───────────────────────────────

  /// Replace the full manufacturer set. Row ids are upstream-assigned.
  fn replace_manufacturers(
    &self,
    rows: Vec<Manufacturer>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace all makes under one manufacturer. Row ids are upstream-assigned.
  fn replace_makes(
    &self,
    manufacturer_id: i64,
    rows: Vec<Make>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace all models under one make. Row ids are upstream-assigned.
  fn replace_models(
    &self,
    make_id: i64,
    rows: Vec<Model>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace all vehicle types under one make; ids are store-assigned.
  fn replace_vehicle_types(
    &self,
    make_id: i64,
    rows: Vec<NewVehicleType>,
  ) -> impl Future<Output = Result<Vec<VehicleType>, Self::Error>> + Send + '_;

  /// Replace the full variable set. Row ids are upstream-assigned.
  fn replace_variables(
    &self,
    rows: Vec<VehicleVariable>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace all values under one variable; ids are store-assigned.
  fn replace_variable_values(
    &self,
    variable_id: i64,
    rows: Vec<NewVariableValue>,
  ) -> impl Future<Output = Result<Vec<VehicleVariableValue>, Self::Error>> + Send + '_;
}

// ─── Vehicle registry ────────────────────────────────────────────────────────

/// The concrete vehicle registry, addressable by row id or VIN.
pub trait VehicleStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new vehicle and return it with its assigned id.
  ///
  /// A VIN already present in the registry is a conflict, surfaced through
  /// `Self::Error`.
  fn add_vehicle(
    &self,
    new: NewVehicle,
  ) -> impl Future<Output = Result<Vehicle, Self::Error>> + Send + '_;

  fn get_vehicle(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Vehicle>, Self::Error>> + Send + '_;

  fn get_vehicle_by_vin<'a>(
    &'a self,
    vin: &'a str,
  ) -> impl Future<Output = Result<Option<Vehicle>, Self::Error>> + Send + 'a;

  fn list_vehicles(
    &self,
  ) -> impl Future<Output = Result<Vec<Vehicle>, Self::Error>> + Send + '_;

  /// Replace the mutable fields of a vehicle. The kind is fixed at creation
  /// and is not touched. Returns `None` if the id has no record.
  fn update_vehicle(
    &self,
    id: i64,
    new: NewVehicle,
  ) -> impl Future<Output = Result<Option<Vehicle>, Self::Error>> + Send + '_;

  /// As [`Self::update_vehicle`], addressed by VIN. The VIN itself is kept.
  fn update_vehicle_by_vin<'a>(
    &'a self,
    vin: &'a str,
    new: NewVehicle,
  ) -> impl Future<Output = Result<Option<Vehicle>, Self::Error>> + Send + 'a;

  /// Returns `false` if the id had no record.
  fn delete_vehicle(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_vehicle_by_vin<'a>(
    &'a self,
    vin: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

// ─── Part fitment ────────────────────────────────────────────────────────────

/// The fitment association store. Fitments are independent of the vehicle
/// registry; they reference taxonomy rows and a catalog part by id only.
pub trait FitmentStore: Send + Sync {
  type Error: StoreError;

  fn add_fitment(
    &self,
    new: NewPartFitment,
  ) -> impl Future<Output = Result<PartFitment, Self::Error>> + Send + '_;

  fn get_fitment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<PartFitment>, Self::Error>> + Send + '_;

  fn list_fitments_for_part(
    &self,
    part_number_id: i64,
  ) -> impl Future<Output = Result<Vec<PartFitment>, Self::Error>> + Send + '_;

  /// Full replacement of all mutable fields, including the variable-value
  /// set. Returns `None` if the id has no record.
  fn update_fitment(
    &self,
    id: i64,
    new: NewPartFitment,
  ) -> impl Future<Output = Result<Option<PartFitment>, Self::Error>> + Send + '_;

  fn delete_fitment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// The catalog store: products, service items, and non-inventory products.
///
/// Name lookups are exact-equality and may return several rows.
pub trait CatalogStore: Send + Sync {
  type Error: StoreError;

  fn add_product(
    &self,
    new: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  fn get_product(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  fn find_products_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + 'a;

  fn delete_product(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn add_service_item(
    &self,
    new: NewServiceItem,
  ) -> impl Future<Output = Result<ServiceItem, Self::Error>> + Send + '_;

  fn get_service_item(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<ServiceItem>, Self::Error>> + Send + '_;

  fn find_service_items_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<ServiceItem>, Self::Error>> + Send + 'a;

  fn delete_service_item(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn add_non_inventory_product(
    &self,
    new: NewNonInventoryProduct,
  ) -> impl Future<Output = Result<NonInventoryProduct, Self::Error>> + Send + '_;

  fn get_non_inventory_product(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<NonInventoryProduct>, Self::Error>> + Send + '_;

  fn find_non_inventory_products_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<NonInventoryProduct>, Self::Error>> + Send + 'a;

  fn delete_non_inventory_product(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── People ──────────────────────────────────────────────────────────────────

pub trait PeopleStore: Send + Sync {
  type Error: StoreError;

  fn add_person(
    &self,
    new: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Replace all mutable fields. Returns `None` if the id has no record.
  fn update_person(
    &self,
    id: i64,
    new: NewPerson,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Locations ───────────────────────────────────────────────────────────────

pub trait LocationStore: Send + Sync {
  type Error: StoreError;

  fn add_location(
    &self,
    new: NewLocation,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + '_;

  fn get_location(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Location>, Self::Error>> + Send + '_;

  fn list_locations(
    &self,
  ) -> impl Future<Output = Result<Vec<Location>, Self::Error>> + Send + '_;

  fn update_location(
    &self,
    id: i64,
    new: NewLocation,
  ) -> impl Future<Output = Result<Option<Location>, Self::Error>> + Send + '_;

  fn delete_location(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Customers ───────────────────────────────────────────────────────────────

pub trait CustomerStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new customer. A duplicate customer number is a conflict,
  /// surfaced through `Self::Error`.
  fn add_customer(
    &self,
    new: NewCustomer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  fn get_customer(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + '_;

  fn get_customer_by_number<'a>(
    &'a self,
    number: &'a str,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + 'a;

  fn list_customers(
    &self,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + '_;

  fn delete_customer(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// The event receiver's tables: the preregistration allow-list and the
/// emitted-event log.
pub trait EventStore: Send + Sync {
  type Error: StoreError;

  fn is_preregistered<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Add an id to the allow-list. Idempotent.
  fn preregister<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Append an emitted-event row. The caller is responsible for checking
  /// preregistration first; the store does not re-check.
  fn record_event<'a>(
    &'a self,
    id: &'a str,
    timestamp: i64,
  ) -> impl Future<Output = Result<EmittedEvent, Self::Error>> + Send + 'a;

  fn list_events_for_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Vec<EmittedEvent>, Self::Error>> + Send + 'a;
}

// ─── Auth ────────────────────────────────────────────────────────────────────

/// Users, roles, and issued tokens.
pub trait AuthStore: Send + Sync {
  type Error: StoreError;

  /// Insert any of `names` not already present. Idempotent; safe to run on
  /// every process start.
  fn seed_roles<'a>(
    &'a self,
    names: &'a [&'a str],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn list_roles(
    &self,
  ) -> impl Future<Output = Result<Vec<Role>, Self::Error>> + Send + '_;

  /// Persist a new user. A duplicate username is a conflict, surfaced
  /// through `Self::Error`.
  fn add_user(
    &self,
    new: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  fn delete_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn insert_token(
    &self,
    token: AuthToken,
  ) -> impl Future<Output = Result<AuthToken, Self::Error>> + Send + '_;

  fn get_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<AuthToken>, Self::Error>> + Send + 'a;

  fn delete_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

// ─── Shops ───────────────────────────────────────────────────────────────────

pub trait ShopStore: Send + Sync {
  type Error: StoreError;

  fn add_shop(
    &self,
    new: NewShop,
  ) -> impl Future<Output = Result<Shop, Self::Error>> + Send + '_;

  fn get_shop(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Shop>, Self::Error>> + Send + '_;

  /// Attach a technician to a shop. Returns `None` if the shop does not
  /// exist.
  fn add_technician(
    &self,
    shop_id: i64,
    new: NewTechnician,
  ) -> impl Future<Output = Result<Option<Technician>, Self::Error>> + Send + '_;

  fn get_technician(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Technician>, Self::Error>> + Send + '_;

  fn list_technicians(
    &self,
    shop_id: i64,
  ) -> impl Future<Output = Result<Vec<Technician>, Self::Error>> + Send + '_;
}
