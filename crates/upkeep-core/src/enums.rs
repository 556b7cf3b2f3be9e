//! Closed value sets shared by equipment and maintenance records.
//!
//! Every set serialises as its variant name (`"Operational"`, `"Machining"`,
//! ...), which is also what [`FromStr`](std::str::FromStr) accepts. Membership
//! is checked once, when text is parsed into one of these types; nothing
//! downstream re-validates.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The plant department an item of equipment belongs to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
pub enum Department {
  Machining,
  Assembly,
  Packaging,
  Shipping,
}

/// Operating status of an item of equipment.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
pub enum Status {
  Operational,
  Down,
  Maintenance,
  Retired,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
pub enum MaintenanceType {
  Preventive,
  Repair,
  Emergency,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
pub enum Priority {
  Low,
  Medium,
  High,
}

/// Completion state of a maintenance job.
///
/// Older data written as `"Pending Parts"` is read back as
/// [`CompletionStatus::Pending`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
pub enum CompletionStatus {
  Complete,
  Incomplete,
  #[serde(alias = "Pending Parts")]
  #[strum(to_string = "Pending", serialize = "Pending Parts")]
  Pending,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn display_and_parse_agree() {
    for status in Status::iter() {
      assert_eq!(Status::from_str(&status.to_string()).unwrap(), status);
    }
    for department in Department::iter() {
      assert_eq!(
        Department::from_str(department.as_ref()).unwrap(),
        department
      );
    }
  }

  #[test]
  fn unknown_value_is_rejected() {
    assert!(Status::from_str("Broken").is_err());
    assert!(Department::from_str("machining").is_err());
  }

  #[test]
  fn pending_parts_reads_as_pending() {
    let parsed: CompletionStatus =
      serde_json::from_str("\"Pending Parts\"").unwrap();
    assert_eq!(parsed, CompletionStatus::Pending);
    assert_eq!(
      CompletionStatus::from_str("Pending Parts").unwrap(),
      CompletionStatus::Pending
    );
    assert_eq!(CompletionStatus::Pending.to_string(), "Pending");
    assert_eq!(
      serde_json::to_string(&CompletionStatus::Pending).unwrap(),
      "\"Pending\""
    );
  }
}
