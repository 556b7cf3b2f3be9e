//! Derived display fields: resolving maintenance records to equipment.

use std::collections::HashMap;

use upkeep_core::{Equipment, MaintenanceRecord};

/// Display name used when a record refers to equipment that does not exist.
pub const UNKNOWN_EQUIPMENT: &str = "Unknown";

/// Equipment looked up by id.
///
/// On duplicate ids the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct EquipmentIndex<'a> {
  by_id: HashMap<u64, &'a Equipment>,
}

impl<'a> EquipmentIndex<'a> {
  pub fn new(equipment: &'a [Equipment]) -> Self {
    let mut by_id = HashMap::with_capacity(equipment.len());
    for eq in equipment {
      by_id.entry(eq.id).or_insert(eq);
    }
    Self { by_id }
  }

  pub fn get(&self, id: u64) -> Option<&'a Equipment> { self.by_id.get(&id).copied() }

  /// The equipment name for `id`, or [`UNKNOWN_EQUIPMENT`].
  pub fn name(&self, id: u64) -> &'a str {
    self.get(id).map_or(UNKNOWN_EQUIPMENT, |eq| eq.name.as_str())
  }
}

/// A maintenance record joined with its resolved equipment name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaintenanceRow<'a> {
  pub record:         &'a MaintenanceRecord,
  pub equipment_name: &'a str,
}

/// Join every record against `index`, preserving order.
pub fn resolve_rows<'a>(
  records: &'a [MaintenanceRecord],
  index: &EquipmentIndex<'a>,
) -> Vec<MaintenanceRow<'a>> {
  records
    .iter()
    .map(|record| MaintenanceRow {
      record,
      equipment_name: index.name(record.equipment_id),
    })
    .collect()
}
