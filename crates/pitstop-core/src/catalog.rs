//! Catalog items — products, services, and non-inventory products.

use serde::{Deserialize, Serialize};

/// A physical product carried in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id:                       i64,
  pub name:                     String,
  pub short_description:        Option<String>,
  pub long_description:         Option<String>,
  pub sku:                      Option<String>,
  pub manufacturer_part_number: Option<String>,
  pub manufacturer_name:        Option<String>,
  pub brand:                    Option<String>,
  pub country_of_origin:        Option<String>,
  pub material:                 Option<String>,
  pub color:                    Option<String>,
  pub warranty:                 Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
  pub name:                     String,
  pub short_description:        Option<String>,
  pub long_description:         Option<String>,
  pub sku:                      Option<String>,
  pub manufacturer_part_number: Option<String>,
  pub manufacturer_name:        Option<String>,
  pub brand:                    Option<String>,
  pub country_of_origin:        Option<String>,
  pub material:                 Option<String>,
  pub color:                    Option<String>,
  pub warranty:                 Option<String>,
}

/// A billable service offered through the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
  pub id:                i64,
  pub name:              String,
  pub short_description: Option<String>,
  pub long_description:  Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServiceItem {
  pub name:              String,
  pub short_description: Option<String>,
  pub long_description:  Option<String>,
}

/// A catalog item that is sold but never stocked (e.g. shop supplies fees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonInventoryProduct {
  pub id:                i64,
  pub name:              String,
  pub short_description: Option<String>,
  pub long_description:  Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNonInventoryProduct {
  pub name:              String,
  pub short_description: Option<String>,
  pub long_description:  Option<String>,
}
