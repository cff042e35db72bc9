//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use pitstop_core::{
  auth::{AuthToken, NewUser},
  customer::{CustomerKind, NewCustomer},
  fitment::NewPartFitment,
  person::NewPerson,
  shop::{NewShop, NewTechnician},
  store::{
    AuthStore, CatalogStore, CustomerStore, EventStore, FitmentStore,
    PeopleStore, ReferenceStore, ShopStore, VehicleStore,
  },
  taxonomy::{Make, Manufacturer, Model, NewVariableValue, VehicleVariable},
  vehicle::{NewVehicle, VehicleKind},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn truck(vin: Option<&str>) -> NewVehicle {
  NewVehicle {
    kind:  VehicleKind::PassengerTruck,
    make:  "Ford".into(),
    model: "F-150".into(),
    year:  2021,
    vin:   vin.map(str::to_owned),
  }
}

// ─── Vehicles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_vehicle_roundtrip() {
  let s = store().await;

  let created = s.add_vehicle(truck(Some("1FTEW1EP5MKE00001"))).await.unwrap();
  assert!(created.id > 0);

  let fetched = s.get_vehicle(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_vehicle_missing_returns_none() {
  let s = store().await;
  assert!(s.get_vehicle(999).await.unwrap().is_none());
}

#[tokio::test]
async fn vins_address_distinct_records() {
  let s = store().await;
  let a = s.add_vehicle(truck(Some("VINAAA111"))).await.unwrap();
  let b = s.add_vehicle(truck(Some("VINBBB222"))).await.unwrap();

  let got_a = s.get_vehicle_by_vin("VINAAA111").await.unwrap().unwrap();
  let got_b = s.get_vehicle_by_vin("VINBBB222").await.unwrap().unwrap();
  assert_eq!(got_a.id, a.id);
  assert_eq!(got_b.id, b.id);

  // Deleting by one VIN leaves the other retrievable.
  assert!(s.delete_vehicle_by_vin("VINAAA111").await.unwrap());
  assert!(s.get_vehicle_by_vin("VINAAA111").await.unwrap().is_none());
  assert!(s.get_vehicle_by_vin("VINBBB222").await.unwrap().is_some());
}

#[tokio::test]
async fn duplicate_vin_is_a_conflict() {
  let s = store().await;
  s.add_vehicle(truck(Some("SAMEVIN01"))).await.unwrap();

  let err = s.add_vehicle(truck(Some("SAMEVIN01"))).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateVin(_)), "got: {err}");
}

#[tokio::test]
async fn vehicles_without_vin_do_not_conflict() {
  let s = store().await;
  s.add_vehicle(truck(None)).await.unwrap();
  s.add_vehicle(truck(None)).await.unwrap();
  assert_eq!(s.list_vehicles().await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_then_get_yields_not_found() {
  let s = store().await;
  let v = s.add_vehicle(truck(None)).await.unwrap();

  assert!(s.delete_vehicle(v.id).await.unwrap());
  assert!(s.get_vehicle(v.id).await.unwrap().is_none());
  // Second delete reports not-found.
  assert!(!s.delete_vehicle(v.id).await.unwrap());
}

#[tokio::test]
async fn update_vehicle_replaces_fields_but_not_kind() {
  let s = store().await;
  let v = s.add_vehicle(truck(Some("UPDVIN001"))).await.unwrap();

  let updated = s
    .update_vehicle(v.id, NewVehicle {
      kind:  VehicleKind::Van,
      make:  "RAM".into(),
      model: "ProMaster".into(),
      year:  2023,
      vin:   Some("UPDVIN001".into()),
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.make, "RAM");
  assert_eq!(updated.year, 2023);
  // The kind is fixed at creation.
  assert_eq!(updated.kind, VehicleKind::PassengerTruck);
}

#[tokio::test]
async fn update_by_vin_keeps_the_addressed_vin() {
  let s = store().await;
  s.add_vehicle(truck(Some("KEEPVIN01"))).await.unwrap();

  let updated = s
    .update_vehicle_by_vin("KEEPVIN01", NewVehicle {
      vin: Some("SHOULD-BE-IGNORED".into()),
      ..truck(None)
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.vin.as_deref(), Some("KEEPVIN01"));
}

// ─── Reference taxonomy ──────────────────────────────────────────────────────

fn manufacturer(id: i64, name: &str) -> Manufacturer {
  Manufacturer { id, name: name.into(), refreshed_at: Utc::now() }
}

#[tokio::test]
async fn taxonomy_scoped_listing() {
  let s = store().await;
  let now = Utc::now();

  s.replace_manufacturers(vec![
    manufacturer(1, "Ford Motor Company"),
    manufacturer(2, "General Motors"),
  ])
  .await
  .unwrap();

  s.replace_makes(1, vec![
    Make {
      id: 460,
      manufacturer_id: 1,
      name: "Ford".into(),
      external_code: Some("ford".into()),
      refreshed_at: now,
    },
    Make {
      id: 461,
      manufacturer_id: 1,
      name: "Lincoln".into(),
      external_code: None,
      refreshed_at: now,
    },
  ])
  .await
  .unwrap();

  s.replace_makes(2, vec![Make {
    id: 467,
    manufacturer_id: 2,
    name: "Chevrolet".into(),
    external_code: None,
    refreshed_at: now,
  }])
  .await
  .unwrap();

  // Scoped listing returns only rows whose parent key matches.
  let ford_makes = s.list_makes(1).await.unwrap();
  assert_eq!(ford_makes.len(), 2);
  assert!(ford_makes.iter().all(|m| m.manufacturer_id == 1));

  assert_eq!(s.list_makes(2).await.unwrap().len(), 1);
  assert!(s.list_makes(99).await.unwrap().is_empty());
}

#[tokio::test]
async fn make_lookup_by_name_and_code() {
  let s = store().await;
  let now = Utc::now();

  s.replace_manufacturers(vec![manufacturer(1, "Ford Motor Company")])
    .await
    .unwrap();
  s.replace_makes(1, vec![Make {
    id: 460,
    manufacturer_id: 1,
    name: "Ford".into(),
    external_code: Some("ford".into()),
    refreshed_at: now,
  }])
  .await
  .unwrap();

  assert_eq!(s.get_make_by_name("Ford").await.unwrap().unwrap().id, 460);
  assert_eq!(
    s.get_make_by_external_code("ford").await.unwrap().unwrap().id,
    460
  );
  assert!(s.get_make_by_name("Edsel").await.unwrap().is_none());
}

#[tokio::test]
async fn replace_models_swaps_the_scoped_set() {
  let s = store().await;
  let now = Utc::now();

  s.replace_manufacturers(vec![manufacturer(1, "Ford Motor Company")])
    .await
    .unwrap();
  s.replace_makes(1, vec![Make {
    id: 460,
    manufacturer_id: 1,
    name: "Ford".into(),
    external_code: None,
    refreshed_at: now,
  }])
  .await
  .unwrap();

  let model = |id: i64, name: &str| Model {
    id,
    make_id: 460,
    name: name.into(),
    refreshed_at: now,
  };

  s.replace_models(460, vec![model(1, "F-150"), model(2, "Ranger")])
    .await
    .unwrap();
  assert_eq!(s.list_models(460).await.unwrap().len(), 2);

  // A second replacement fully supersedes the first.
  s.replace_models(460, vec![model(3, "Maverick")]).await.unwrap();
  let models = s.list_models(460).await.unwrap();
  assert_eq!(models.len(), 1);
  assert_eq!(models[0].name, "Maverick");
}

#[tokio::test]
async fn variable_values_are_scoped_to_their_variable() {
  let s = store().await;
  let now = Utc::now();

  s.replace_variables(vec![
    VehicleVariable {
      id: 9,
      name: "Drive Type".into(),
      description: None,
      refreshed_at: now,
    },
    VehicleVariable {
      id: 24,
      name: "Fuel Type Primary".into(),
      description: Some("Primary fuel".into()),
      refreshed_at: now,
    },
  ])
  .await
  .unwrap();

  s.replace_variable_values(9, vec![
    NewVariableValue { value: "4WD/4-Wheel Drive".into(), external_code: Some("2".into()) },
    NewVariableValue { value: "FWD/Front-Wheel Drive".into(), external_code: Some("6".into()) },
  ])
  .await
  .unwrap();

  let values = s.list_variable_values(9).await.unwrap();
  assert_eq!(values.len(), 2);
  assert!(values.iter().all(|v| v.variable_id == 9));
  assert!(s.list_variable_values(24).await.unwrap().is_empty());
}

// ─── Fitments ────────────────────────────────────────────────────────────────

fn fitment(part: i64) -> NewPartFitment {
  NewPartFitment {
    part_number_id:     part,
    manufacturer_id:    Some(1),
    make_id:            Some(460),
    model_id:           None,
    vehicle_type_id:    None,
    year:               Some("2015-2020".into()),
    engine_type:        Some("3.5L V6".into()),
    submodel:           Some("XLT".into()),
    variable_value_ids: vec![],
    notes:              Some("Except with Off-Road Package".into()),
  }
}

#[tokio::test]
async fn fitment_with_empty_qualifier_set_is_valid() {
  let s = store().await;
  let created = s.add_fitment(fitment(77)).await.unwrap();

  let fetched = s.get_fitment(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert!(fetched.variable_value_ids.is_empty());
}

#[tokio::test]
async fn fitment_qualifiers_roundtrip() {
  let s = store().await;
  let created = s
    .add_fitment(NewPartFitment {
      variable_value_ids: vec![5, 3, 5],
      ..fitment(77)
    })
    .await
    .unwrap();

  // Stored as a set: sorted, deduplicated.
  let fetched = s.get_fitment(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.variable_value_ids, vec![3, 5]);
}

#[tokio::test]
async fn list_fitments_scoped_by_part() {
  let s = store().await;
  s.add_fitment(fitment(77)).await.unwrap();
  s.add_fitment(fitment(77)).await.unwrap();
  s.add_fitment(fitment(88)).await.unwrap();

  let for_77 = s.list_fitments_for_part(77).await.unwrap();
  assert_eq!(for_77.len(), 2);
  assert!(for_77.iter().all(|f| f.part_number_id == 77));
}

#[tokio::test]
async fn update_fitment_notes_leaves_other_fields_unchanged() {
  let s = store().await;
  let created = s
    .add_fitment(NewPartFitment {
      variable_value_ids: vec![3, 5],
      ..fitment(77)
    })
    .await
    .unwrap();

  let updated = s
    .update_fitment(created.id, NewPartFitment {
      notes: Some("Requires Modification".into()),
      variable_value_ids: created.variable_value_ids.clone(),
      ..fitment(77)
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.notes.as_deref(), Some("Requires Modification"));
  assert_eq!(updated.part_number_id, created.part_number_id);
  assert_eq!(updated.engine_type, created.engine_type);
  assert_eq!(updated.variable_value_ids, created.variable_value_ids);
}

#[tokio::test]
async fn delete_fitment_removes_qualifiers() {
  let s = store().await;
  let created = s
    .add_fitment(NewPartFitment {
      variable_value_ids: vec![1, 2],
      ..fitment(77)
    })
    .await
    .unwrap();

  assert!(s.delete_fitment(created.id).await.unwrap());
  assert!(s.get_fitment(created.id).await.unwrap().is_none());
  assert!(!s.delete_fitment(created.id).await.unwrap());
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn preregistration_gate() {
  let s = store().await;
  assert!(!s.is_preregistered("Catalog-000001-0000000001").await.unwrap());

  s.preregister("Catalog-000001-0000000001").await.unwrap();
  assert!(s.is_preregistered("Catalog-000001-0000000001").await.unwrap());

  // Idempotent.
  s.preregister("Catalog-000001-0000000001").await.unwrap();
}

#[tokio::test]
async fn recorded_event_keeps_submitted_timestamp() {
  let s = store().await;
  s.preregister("evt-1").await.unwrap();

  let event = s.record_event("evt-1", 1_700_000_000_123).await.unwrap();
  assert_eq!(event.timestamp, 1_700_000_000_123);

  let events = s.list_events_for_id("evt-1").await.unwrap();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0], event);
}

// ─── Auth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn role_seeding_is_idempotent() {
  let s = store().await;
  let names = ["ADMIN", "GENERAL_MANAGER", "MANAGER", "CUSTOMER"];

  s.seed_roles(&names).await.unwrap();
  s.seed_roles(&names).await.unwrap();

  let roles = s.list_roles().await.unwrap();
  assert_eq!(roles.len(), 4);
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
  let s = store().await;
  let user = |hash: &str| NewUser {
    username:      "worker".into(),
    password_hash: hash.into(),
    roles:         vec!["MANAGER".into()],
  };

  s.add_user(user("$argon2id$fake1")).await.unwrap();
  let err = s.add_user(user("$argon2id$fake2")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateUsername(_)), "got: {err}");
}

#[tokio::test]
async fn token_roundtrip_and_delete() {
  let s = store().await;
  let now = Utc::now();

  let token = s
    .insert_token(AuthToken {
      id:         0,
      token:      "opaque-token-1".into(),
      subject:    "worker".into(),
      issued_at:  now,
      expires_at: now + Duration::hours(1),
    })
    .await
    .unwrap();
  assert!(token.id > 0);

  let fetched = s.get_token("opaque-token-1").await.unwrap().unwrap();
  assert_eq!(fetched.subject, "worker");
  assert!(!fetched.is_expired(now));
  assert!(fetched.is_expired(now + Duration::hours(2)));

  assert!(s.delete_token("opaque-token-1").await.unwrap());
  assert!(s.get_token("opaque-token-1").await.unwrap().is_none());
}

// ─── Customers / people / shops ──────────────────────────────────────────────

#[tokio::test]
async fn customer_number_lookup_and_conflict() {
  let s = store().await;
  let new = NewCustomer {
    kind:            CustomerKind::Commercial,
    customer_number: "CUST-1001".into(),
    first_name:      "Jo".into(),
    last_name:       "Doe".into(),
    phone_number:    None,
    email:           None,
    vehicle_vins:    vec!["VINAAA111".into()],
  };

  let created = s.add_customer(new.clone()).await.unwrap();
  let fetched = s.get_customer_by_number("CUST-1001").await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.vehicle_vins, vec!["VINAAA111".to_owned()]);

  let err = s.add_customer(new).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateCustomerNumber(_)), "got: {err}");
}

#[tokio::test]
async fn person_phone_numbers_roundtrip() {
  let s = store().await;
  let created = s
    .add_person(NewPerson {
      first_name:      "Ada".into(),
      last_name:       "Lovelace".into(),
      primary_email:   "ada@example.com".into(),
      secondary_email: None,
      phone_numbers:   vec!["+1-555-0100".into(), "+1-555-0101".into()],
      username:        Some("ada".into()),
    })
    .await
    .unwrap();

  let fetched = s.get_person(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.phone_numbers.len(), 2);
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn technicians_are_scoped_to_their_shop() {
  let s = store().await;
  let shop = s
    .add_shop(NewShop { name: "Main St".into(), address: "1 Main St".into() })
    .await
    .unwrap();

  let tech = s
    .add_technician(shop.id, NewTechnician { person_id: 42 })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(tech.person_id, 42);

  assert_eq!(s.list_technicians(shop.id).await.unwrap().len(), 1);
  // Unknown shop: no technician is attached.
  assert!(
    s.add_technician(999, NewTechnician { person_id: 7 })
      .await
      .unwrap()
      .is_none()
  );
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn product_name_lookup_returns_all_matches() {
  let s = store().await;
  let new = |sku: &str| pitstop_core::catalog::NewProduct {
    name:                     "Oil Filter".into(),
    short_description:        None,
    long_description:         None,
    sku:                      Some(sku.into()),
    manufacturer_part_number: None,
    manufacturer_name:        None,
    brand:                    None,
    country_of_origin:        None,
    material:                 None,
    color:                    None,
    warranty:                 None,
  };

  s.add_product(new("SKU-1")).await.unwrap();
  s.add_product(new("SKU-2")).await.unwrap();

  let found = s.find_products_by_name("Oil Filter").await.unwrap();
  assert_eq!(found.len(), 2);
  assert!(s.find_products_by_name("Air Filter").await.unwrap().is_empty());
}

#[tokio::test]
async fn service_item_crud() {
  let s = store().await;
  let created = s
    .add_service_item(pitstop_core::catalog::NewServiceItem {
      name:              "Tire Rotation".into(),
      short_description: Some("Rotate all four".into()),
      long_description:  None,
    })
    .await
    .unwrap();

  let fetched = s.get_service_item(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);

  assert!(s.delete_service_item(created.id).await.unwrap());
  assert!(s.get_service_item(created.id).await.unwrap().is_none());
}
