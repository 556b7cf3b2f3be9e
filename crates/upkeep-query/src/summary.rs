//! Dashboard aggregates: status counts, hours per department and recent
//! activity.
//!
//! Keyed results come back as vectors in order of first occurrence in the
//! input, so a chart built from them is stable across renders.

use upkeep_core::{CompletionStatus, Equipment, MaintenanceRecord, Status};

use crate::join::{EquipmentIndex, MaintenanceRow, UNKNOWN_EQUIPMENT};

/// Default number of rows in the recent-activity table.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Count `items` by `key`, in first-occurrence order.
fn tally<T, K: PartialEq>(items: impl IntoIterator<Item = T>, key: impl Fn(T) -> K) -> Vec<(K, usize)> {
  let mut counts: Vec<(K, usize)> = Vec::new();
  for item in items {
    let k = key(item);
    match counts.iter_mut().find(|(existing, _)| *existing == k) {
      Some((_, n)) => *n += 1,
      None => counts.push((k, 1)),
    }
  }
  counts
}

/// Number of equipment items per status.
pub fn status_breakdown(equipment: &[Equipment]) -> Vec<(Status, usize)> {
  tally(equipment, |eq| eq.status)
}

/// Number of maintenance records per completion status.
pub fn completion_breakdown(records: &[MaintenanceRecord]) -> Vec<(CompletionStatus, usize)> {
  tally(records, |rec| rec.completion_status)
}

/// Total hours spent per department. Records whose equipment is missing are
/// counted under [`UNKNOWN_EQUIPMENT`].
pub fn hours_by_department(
  records: &[MaintenanceRecord],
  equipment: &[Equipment],
) -> Vec<(String, f64)> {
  let index = EquipmentIndex::new(equipment);
  let mut totals: Vec<(String, f64)> = Vec::new();
  for record in records {
    let department = index
      .get(record.equipment_id)
      .map_or(UNKNOWN_EQUIPMENT, |eq| eq.department.as_ref());
    match totals.iter_mut().find(|(name, _)| name == department) {
      Some((_, hours)) => *hours += record.hours_spent,
      None => totals.push((department.to_owned(), record.hours_spent)),
    }
  }
  totals
}

/// The last `limit` records in stored order, newest first.
pub fn recent_activity<'a>(
  records: &'a [MaintenanceRecord],
  equipment: &'a [Equipment],
  limit: usize,
) -> Vec<MaintenanceRow<'a>> {
  let index = EquipmentIndex::new(equipment);
  records
    .iter()
    .rev()
    .take(limit)
    .map(|record| MaintenanceRow {
      record,
      equipment_name: index.name(record.equipment_id),
    })
    .collect()
}
