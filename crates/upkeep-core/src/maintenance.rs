//! Maintenance records: logged service events against one item of equipment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  enums::{CompletionStatus, MaintenanceType, Priority},
  id,
  store::{Collection, Record},
};

/// A single maintenance event as persisted in the store.
///
/// `equipment_id` may refer to equipment that no longer exists; readers
/// resolve such references to a fallback name rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
  #[serde(deserialize_with = "id::deserialize_lenient")]
  pub id:                u64,
  #[serde(deserialize_with = "id::deserialize_lenient")]
  pub equipment_id:      u64,
  /// Service date as written by the form (`YYYY-MM-DD`). Kept as text so a
  /// bad value only affects date filtering, not the whole record.
  pub date:              String,
  #[serde(rename = "type")]
  pub kind:              MaintenanceType,
  pub technician:        String,
  pub hours_spent:       f64,
  pub description:       String,
  #[serde(default)]
  pub parts_replaced:    Vec<String>,
  pub priority:          Priority,
  pub completion_status: CompletionStatus,
}

impl MaintenanceRecord {
  /// Parse [`date`](Self::date) as a calendar date.
  ///
  /// Accepts a bare `YYYY-MM-DD` date or an RFC 3339 timestamp, of which only
  /// the date part is used.
  pub fn parsed_date(&self) -> Option<NaiveDate> { parse_date(&self.date) }
}

impl Record for MaintenanceRecord {
  const COLLECTION: Collection = Collection::Maintenance;

  fn id(&self) -> u64 { self.id }
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
  let s = s.trim();
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
    chrono::DateTime::parse_from_rfc3339(s)
      .ok()
      .map(|dt| dt.date_naive())
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record_json(date: &str) -> String {
    format!(
      r#"{{
        "id": 1739800000000,
        "equipmentId": "3",
        "date": "{date}",
        "type": "Repair",
        "technician": "Jo Bloggs",
        "hoursSpent": 2.5,
        "description": "Replaced worn drive belt",
        "priority": "High",
        "completionStatus": "Complete"
      }}"#
    )
  }

  #[test]
  fn decodes_with_string_equipment_id_and_missing_parts() {
    let rec: MaintenanceRecord =
      serde_json::from_str(&record_json("2024-02-10")).unwrap();
    assert_eq!(rec.equipment_id, 3);
    assert_eq!(rec.kind, MaintenanceType::Repair);
    assert!(rec.parts_replaced.is_empty());
    assert_eq!(rec.parsed_date(), NaiveDate::from_ymd_opt(2024, 2, 10));
  }

  #[test]
  fn bad_date_still_decodes() {
    let rec: MaintenanceRecord =
      serde_json::from_str(&record_json("last tuesday")).unwrap();
    assert_eq!(rec.parsed_date(), None);
  }

  #[test]
  fn timestamp_dates_use_their_date_part() {
    assert_eq!(
      parse_date("2024-02-15T10:30:00Z"),
      NaiveDate::from_ymd_opt(2024, 2, 15)
    );
  }

  #[test]
  fn kind_serialises_as_type() {
    let rec: MaintenanceRecord =
      serde_json::from_str(&record_json("2024-02-10")).unwrap();
    let value = serde_json::to_value(&rec).unwrap();
    assert_eq!(value["type"], "Repair");
    assert_eq!(value["equipmentId"], 3);
    assert!(value.get("kind").is_none());
  }
}
