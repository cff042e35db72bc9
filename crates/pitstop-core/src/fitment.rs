//! Part fitment records — which vehicles a catalog part applies to.
//!
//! A fitment associates a part number with any combination of taxonomy
//! references plus free-text qualifiers. All taxonomy references are
//! optional; a fitment never requires an existing vehicle record. The store
//! holds the structured fields and notes verbatim — deciding whether a given
//! vehicle matches a fitment is left entirely to the caller.

use serde::{Deserialize, Serialize};

/// A part-to-vehicle applicability record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartFitment {
  pub id:                 i64,
  /// The catalog product this fitment applies to.
  pub part_number_id:     i64,
  pub manufacturer_id:    Option<i64>,
  pub make_id:            Option<i64>,
  pub model_id:           Option<i64>,
  pub vehicle_type_id:    Option<i64>,
  /// Free-text year or year range, e.g. "2019" or "2015-2020".
  pub year:               Option<String>,
  /// Free-text engine description, e.g. "2.0L I4", "3.5L V6".
  pub engine_type:        Option<String>,
  /// Free-text trim level, e.g. "LX", "SE", "Limited".
  pub submodel:           Option<String>,
  /// Variable-value qualifiers, e.g. a specific drive type. May be empty.
  pub variable_value_ids: Vec<i64>,
  /// Free-text caveats, e.g. "Except with Off-Road Package".
  pub notes:              Option<String>,
}

/// Input to [`crate::store::FitmentStore::add_fitment`] and the replacement
/// image for [`crate::store::FitmentStore::update_fitment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPartFitment {
  pub part_number_id:     i64,
  pub manufacturer_id:    Option<i64>,
  pub make_id:            Option<i64>,
  pub model_id:           Option<i64>,
  pub vehicle_type_id:    Option<i64>,
  pub year:               Option<String>,
  pub engine_type:        Option<String>,
  pub submodel:           Option<String>,
  #[serde(default)]
  pub variable_value_ids: Vec<i64>,
  pub notes:              Option<String>,
}
