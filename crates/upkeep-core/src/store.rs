//! The `RecordStore` trait and the lenient collection codec it relies on.
//!
//! A store holds each collection as one JSON blob under a string key. Higher
//! layers (`upkeep-cli`) depend on this abstraction, not on any concrete
//! backend (e.g. `upkeep-store-sqlite`).

use std::{fmt, future::Future};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Result;

// ─── Collections ─────────────────────────────────────────────────────────────

/// The two persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Equipment,
  Maintenance,
}

impl Collection {
  /// Storage key under which the collection blob lives.
  pub fn key(self) -> &'static str {
    match self {
      Self::Equipment => "equipmentData",
      Self::Maintenance => "maintenanceRecords",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

/// A record type that lives in exactly one [`Collection`].
pub trait Record:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  const COLLECTION: Collection;

  fn id(&self) -> u64;
}

// ─── Codec ───────────────────────────────────────────────────────────────────

/// Decode a persisted collection blob, failing soft.
///
/// A blob that is not a JSON array yields an empty collection. Elements that
/// do not decode as `R` are dropped; the rest are returned in stored order.
pub fn decode_collection<R: Record>(raw: &str) -> Vec<R> {
  let elements = match serde_json::from_str::<Value>(raw) {
    Ok(Value::Array(elements)) => elements,
    Ok(_) => {
      tracing::warn!(collection = %R::COLLECTION, "stored blob is not an array; treating as empty");
      return Vec::new();
    }
    Err(error) => {
      tracing::warn!(collection = %R::COLLECTION, %error, "stored blob is not valid JSON; treating as empty");
      return Vec::new();
    }
  };

  elements
    .into_iter()
    .enumerate()
    .filter_map(|(index, element)| match serde_json::from_value(element) {
      Ok(record) => Some(record),
      Err(error) => {
        tracing::warn!(collection = %R::COLLECTION, index, %error, "dropping malformed record");
        None
      }
    })
    .collect()
}

/// Encode a whole collection as a JSON array.
pub fn encode_collection<R: Record>(records: &[R]) -> Result<String> {
  Ok(serde_json::to_string(records)?)
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an Upkeep record store backend.
///
/// Collections are read and written wholesale; there are no partial or
/// incremental writes. Reads never fail because of malformed stored content,
/// only because of backend I/O.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the full collection for `R`. Returns an empty vec if nothing has
  /// been persisted yet.
  fn load<R: Record>(
    &self,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Replace the persisted collection for `R` with `records`.
  fn save<'a, R: Record>(
    &'a self,
    records: &'a [R],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove a collection entirely.
  fn clear(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Equipment, MaintenanceRecord};

  const EQUIPMENT: &str = r#"[
    {"id": 1, "name": "Drill Press", "location": "Bay 2", "department": "Machining",
     "model": "DP", "serialNumber": "SN-1", "installDate": "2023-01-01", "status": "Operational"},
    {"id": 2, "name": "Lathe Machine", "status": "Down"},
    {"id": 3, "name": "Conveyor", "location": "Dock", "department": "Shipping",
     "model": "C2", "serialNumber": "SN-3", "installDate": "2021-06-30", "status": "Broken"},
    {"id": "4", "name": "Wrapper", "location": "Line 4", "department": "Packaging",
     "model": "W", "serialNumber": "SN-4", "installDate": "2020-03-12", "status": "Retired"}
  ]"#;

  #[test]
  fn keys_match_persisted_layout() {
    assert_eq!(Collection::Equipment.key(), "equipmentData");
    assert_eq!(Collection::Maintenance.key(), "maintenanceRecords");
    assert_eq!(Equipment::COLLECTION, Collection::Equipment);
    assert_eq!(MaintenanceRecord::COLLECTION, Collection::Maintenance);
  }

  #[test]
  fn malformed_elements_are_dropped() {
    let decoded: Vec<Equipment> = decode_collection(EQUIPMENT);
    let ids: Vec<u64> = decoded.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 4]);
  }

  #[test]
  fn non_array_blobs_decode_as_empty() {
    assert!(decode_collection::<Equipment>("{\"id\": 1}").is_empty());
    assert!(decode_collection::<Equipment>("not json").is_empty());
    assert!(decode_collection::<MaintenanceRecord>("").is_empty());
    assert!(decode_collection::<MaintenanceRecord>("[]").is_empty());
  }

  #[test]
  fn encode_then_decode_keeps_order() {
    let decoded: Vec<Equipment> = decode_collection(EQUIPMENT);
    let raw = encode_collection(&decoded).unwrap();
    let again: Vec<Equipment> = decode_collection(&raw);
    assert_eq!(again, decoded);
  }
}
