//! The [`QueryRecord`] trait and the sort and group keys for each record kind.

use std::borrow::Cow;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use upkeep_core::{CompletionStatus, Equipment, Status};

use crate::join::MaintenanceRow;

/// A single sortable value extracted from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
  Text(&'a str),
  Number(f64),
}

/// What the pipeline needs to know about a record to filter, sort and group
/// it.
pub trait QueryRecord {
  type Status: Copy + PartialEq;
  type SortKey: Copy;
  type GroupKey: Copy;

  /// The field matched by free-text search.
  fn search_text(&self) -> &str;

  fn status(&self) -> Self::Status;

  /// The date used for range filtering; `None` if it does not parse.
  fn date(&self) -> Option<NaiveDate>;

  fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;

  fn group_value(&self, key: Self::GroupKey) -> Cow<'_, str>;
}

// ─── Keys ────────────────────────────────────────────────────────────────────

macro_rules! lenient_parse {
  ($ty:ty) => {
    impl $ty {
      /// Parse a key name, returning `None` for names that are not
      /// recognised.
      pub fn parse_lenient(name: &str) -> Option<Self> { name.trim().parse().ok() }
    }
  };
}

/// Sortable equipment columns.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum EquipmentSortKey {
  Id,
  Name,
  Location,
  Department,
  Model,
  SerialNumber,
  InstallDate,
  Status,
}

/// Fields equipment can be grouped by.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum EquipmentGroupKey {
  Department,
  Status,
  Location,
}

/// Sortable maintenance columns.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MaintenanceSortKey {
  Id,
  EquipmentName,
  Date,
  Type,
  Technician,
  HoursSpent,
  Priority,
  CompletionStatus,
}

/// Fields maintenance records can be grouped by.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MaintenanceGroupKey {
  /// The resolved equipment name.
  Equipment,
  Type,
  Priority,
  CompletionStatus,
}

lenient_parse!(EquipmentSortKey);
lenient_parse!(EquipmentGroupKey);
lenient_parse!(MaintenanceSortKey);
lenient_parse!(MaintenanceGroupKey);

// ─── Equipment ───────────────────────────────────────────────────────────────

impl QueryRecord for &Equipment {
  type GroupKey = EquipmentGroupKey;
  type SortKey = EquipmentSortKey;
  type Status = Status;

  fn search_text(&self) -> &str { &self.name }

  fn status(&self) -> Status { self.status }

  fn date(&self) -> Option<NaiveDate> { Some(self.install_date) }

  fn sort_value(&self, key: EquipmentSortKey) -> SortValue<'_> {
    match key {
      EquipmentSortKey::Id => SortValue::Number(self.id as f64),
      EquipmentSortKey::Name => SortValue::Text(&self.name),
      EquipmentSortKey::Location => SortValue::Text(&self.location),
      EquipmentSortKey::Department => SortValue::Text(self.department.as_ref()),
      EquipmentSortKey::Model => SortValue::Text(&self.model),
      EquipmentSortKey::SerialNumber => SortValue::Text(&self.serial_number),
      EquipmentSortKey::InstallDate => {
        SortValue::Number(f64::from(self.install_date.num_days_from_ce()))
      }
      EquipmentSortKey::Status => SortValue::Text(self.status.as_ref()),
    }
  }

  fn group_value(&self, key: EquipmentGroupKey) -> Cow<'_, str> {
    match key {
      EquipmentGroupKey::Department => Cow::Borrowed(self.department.as_ref()),
      EquipmentGroupKey::Status => Cow::Borrowed(self.status.as_ref()),
      EquipmentGroupKey::Location => Cow::Borrowed(&self.location),
    }
  }
}

// ─── Maintenance ─────────────────────────────────────────────────────────────

impl QueryRecord for MaintenanceRow<'_> {
  type GroupKey = MaintenanceGroupKey;
  type SortKey = MaintenanceSortKey;
  type Status = CompletionStatus;

  fn search_text(&self) -> &str { self.equipment_name }

  fn status(&self) -> CompletionStatus { self.record.completion_status }

  fn date(&self) -> Option<NaiveDate> { self.record.parsed_date() }

  fn sort_value(&self, key: MaintenanceSortKey) -> SortValue<'_> {
    let record = self.record;
    match key {
      MaintenanceSortKey::Id => SortValue::Number(record.id as f64),
      MaintenanceSortKey::EquipmentName => SortValue::Text(self.equipment_name),
      MaintenanceSortKey::Date => SortValue::Text(&record.date),
      MaintenanceSortKey::Type => SortValue::Text(record.kind.as_ref()),
      MaintenanceSortKey::Technician => SortValue::Text(&record.technician),
      MaintenanceSortKey::HoursSpent => SortValue::Number(record.hours_spent),
      MaintenanceSortKey::Priority => SortValue::Text(record.priority.as_ref()),
      MaintenanceSortKey::CompletionStatus => {
        SortValue::Text(record.completion_status.as_ref())
      }
    }
  }

  fn group_value(&self, key: MaintenanceGroupKey) -> Cow<'_, str> {
    match key {
      MaintenanceGroupKey::Equipment => Cow::Borrowed(self.equipment_name),
      MaintenanceGroupKey::Type => Cow::Borrowed(self.record.kind.as_ref()),
      MaintenanceGroupKey::Priority => Cow::Borrowed(self.record.priority.as_ref()),
      MaintenanceGroupKey::CompletionStatus => {
        Cow::Borrowed(self.record.completion_status.as_ref())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keys_parse_from_camel_case_names() {
    assert_eq!(
      EquipmentSortKey::parse_lenient("serialNumber"),
      Some(EquipmentSortKey::SerialNumber)
    );
    assert_eq!(
      MaintenanceSortKey::parse_lenient("equipmentName"),
      Some(MaintenanceSortKey::EquipmentName)
    );
    assert_eq!(
      MaintenanceGroupKey::parse_lenient(" equipment "),
      Some(MaintenanceGroupKey::Equipment)
    );
  }

  #[test]
  fn unknown_keys_parse_as_none() {
    assert_eq!(EquipmentSortKey::parse_lenient("hoursSpent"), None);
    assert_eq!(MaintenanceGroupKey::parse_lenient(""), None);
    assert_eq!(EquipmentGroupKey::parse_lenient("Name"), None);
  }
}
