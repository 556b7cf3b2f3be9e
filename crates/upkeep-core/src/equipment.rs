//! Equipment: a tracked physical asset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  enums::{Department, Status},
  id,
  store::{Collection, Record},
};

/// An item of plant equipment as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
  #[serde(deserialize_with = "id::deserialize_lenient")]
  pub id:            u64,
  pub name:          String,
  pub location:      String,
  pub department:    Department,
  pub model:         String,
  pub serial_number: String,
  /// Stored as `YYYY-MM-DD`.
  pub install_date:  NaiveDate,
  pub status:        Status,
}

impl Equipment {
  /// Return a copy of this record with `status` replaced.
  pub fn with_status(&self, status: Status) -> Self {
    Self {
      status,
      ..self.clone()
    }
  }
}

impl Record for Equipment {
  const COLLECTION: Collection = Collection::Equipment;

  fn id(&self) -> u64 { self.id }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_camel_case_json() {
    let json = r#"{
      "id": "1739800000000",
      "name": "Drill Press",
      "location": "Bay 2",
      "department": "Machining",
      "model": "DP-400",
      "serialNumber": "SN-001",
      "installDate": "2023-05-01",
      "status": "Operational"
    }"#;
    let eq: Equipment = serde_json::from_str(json).unwrap();
    assert_eq!(eq.id, 1_739_800_000_000);
    assert_eq!(eq.serial_number, "SN-001");
    assert_eq!(eq.install_date, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    assert_eq!(eq.department, Department::Machining);
  }

  #[test]
  fn encodes_id_as_number_and_date_as_text() {
    let eq = Equipment {
      id:            7,
      name:          "Lathe Machine".into(),
      location:      "Bay 1".into(),
      department:    Department::Assembly,
      model:         "L-9".into(),
      serial_number: "SN-7".into(),
      install_date:  NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
      status:        Status::Down,
    };
    let value = serde_json::to_value(&eq).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["installDate"], "2022-01-15");
    assert_eq!(value["status"], "Down");
  }

  #[test]
  fn with_status_changes_only_status() {
    let eq = Equipment {
      id:            1,
      name:          "Drill Press".into(),
      location:      "Bay 2".into(),
      department:    Department::Machining,
      model:         "DP".into(),
      serial_number: "SN".into(),
      install_date:  NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
      status:        Status::Operational,
    };
    let updated = eq.with_status(Status::Retired);
    assert_eq!(updated.status, Status::Retired);
    assert_eq!(Equipment { status: Status::Operational, ..updated }, eq);
  }
}
