//! The record query pipeline.
//!
//! Pure, synchronous transforms over in-memory collections: search, status
//! and date filters, stable sorting, grouping, bulk status updates, row
//! selection and dashboard summaries. Nothing here performs I/O; callers load
//! collections from a [`RecordStore`](upkeep_core::store::RecordStore) and hand
//! them in.

pub mod compare;
pub mod join;
pub mod query;
pub mod record;
pub mod selection;
pub mod summary;

pub use join::{EquipmentIndex, MaintenanceRow, UNKNOWN_EQUIPMENT, resolve_rows};
pub use query::{
  DateRange, EquipmentQuery, Group, MaintenanceQuery, Query, Sort, SortDirection,
  View, query_equipment, query_maintenance, run,
};
pub use record::{
  EquipmentGroupKey, EquipmentSortKey, MaintenanceGroupKey, MaintenanceSortKey,
  QueryRecord, SortValue,
};
pub use selection::{Selection, apply_bulk_status, toggle_selection};
pub use summary::{
  RECENT_ACTIVITY_LIMIT, completion_breakdown, hours_by_department, recent_activity,
  status_breakdown,
};

#[cfg(test)]
mod proptests;
