//! Query configuration and the pipeline that applies it.
//!
//! [`run`] applies, in order: free-text search, status filter, inclusive date
//! range, stable sort and optional grouping. It is deterministic and never
//! fails; empty input yields empty output.

use std::{cmp::Ordering, collections::HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use upkeep_core::{CompletionStatus, Equipment, MaintenanceRecord, Status};

use crate::{
  compare::compare_values,
  join::{EquipmentIndex, MaintenanceRow, resolve_rows},
  record::{
    EquipmentGroupKey, EquipmentSortKey, MaintenanceGroupKey, MaintenanceSortKey,
    QueryRecord,
  },
};

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  #[default]
  Ascending,
  Descending,
}

impl SortDirection {
  pub fn apply(self, ordering: Ordering) -> Ordering {
    match self {
      Self::Ascending => ordering,
      Self::Descending => ordering.reverse(),
    }
  }

  pub fn reversed(self) -> Self {
    match self {
      Self::Ascending => Self::Descending,
      Self::Descending => Self::Ascending,
    }
  }
}

/// A sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort<K> {
  pub key:       K,
  pub direction: SortDirection,
}

impl<K: Copy + PartialEq> Sort<K> {
  pub fn ascending(key: K) -> Self {
    Self {
      key,
      direction: SortDirection::Ascending,
    }
  }

  pub fn descending(key: K) -> Self {
    Self {
      key,
      direction: SortDirection::Descending,
    }
  }

  /// The sort after a column header for `key` is clicked: the same column
  /// while ascending flips to descending, anything else sorts ascending on
  /// `key`.
  pub fn toggled(current: Option<Self>, key: K) -> Self {
    match current {
      Some(sort) if sort.key == key && sort.direction == SortDirection::Ascending => {
        Self::descending(key)
      }
      _ => Self::ascending(key),
    }
  }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// An inclusive date range. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
  pub start: Option<NaiveDate>,
  pub end:   Option<NaiveDate>,
}

impl DateRange {
  pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self { Self { start, end } }

  pub fn is_unbounded(&self) -> bool { self.start.is_none() && self.end.is_none() }

  /// Whether `date` falls inside the range. An unparseable date (`None`) is
  /// outside every bounded range.
  pub fn includes(&self, date: Option<NaiveDate>) -> bool {
    if self.is_unbounded() {
      return true;
    }
    let Some(date) = date else {
      return false;
    };
    self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
  }
}

/// Parameters for [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Query<S, K, G> {
  /// Case-insensitive substring matched against the record's search field.
  /// Empty matches everything.
  pub search:     String,
  pub status:     Option<S>,
  pub date_range: Option<DateRange>,
  pub sort:       Option<Sort<K>>,
  pub group_by:   Option<G>,
}

impl<S, K, G> Default for Query<S, K, G> {
  fn default() -> Self {
    Self {
      search:     String::new(),
      status:     None,
      date_range: None,
      sort:       None,
      group_by:   None,
    }
  }
}

pub type EquipmentQuery = Query<Status, EquipmentSortKey, EquipmentGroupKey>;
pub type MaintenanceQuery = Query<CompletionStatus, MaintenanceSortKey, MaintenanceGroupKey>;

// ─── Output ──────────────────────────────────────────────────────────────────

/// Records sharing one group value, in pipeline order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
  pub key:   String,
  pub items: Vec<T>,
}

/// The result of [`run`].
#[derive(Debug, Clone, PartialEq)]
pub enum View<T> {
  Flat(Vec<T>),
  /// Groups in order of first occurrence.
  Grouped(Vec<Group<T>>),
}

impl<T> View<T> {
  /// Total number of records across all groups.
  pub fn len(&self) -> usize {
    match self {
      Self::Flat(items) => items.len(),
      Self::Grouped(groups) => groups.iter().map(|g| g.items.len()).sum(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Concatenate groups back into a single sequence.
  pub fn into_flat(self) -> Vec<T> {
    match self {
      Self::Flat(items) => items,
      Self::Grouped(groups) => groups.into_iter().flat_map(|g| g.items).collect(),
    }
  }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Filter, sort and optionally group `items` according to `query`.
pub fn run<R: QueryRecord>(
  items: impl IntoIterator<Item = R>,
  query: &Query<R::Status, R::SortKey, R::GroupKey>,
) -> View<R> {
  let needle = query.search.to_lowercase();

  let mut kept: Vec<R> = items
    .into_iter()
    .filter(|item| needle.is_empty() || item.search_text().to_lowercase().contains(&needle))
    .filter(|item| query.status.is_none_or(|status| item.status() == status))
    .filter(|item| {
      query
        .date_range
        .as_ref()
        .is_none_or(|range| range.includes(item.date()))
    })
    .collect();

  if let Some(sort) = query.sort {
    // `sort_by` is stable, so ties keep input order in either direction.
    kept.sort_by(|a, b| {
      sort
        .direction
        .apply(compare_values(a.sort_value(sort.key), b.sort_value(sort.key)))
    });
  }

  match query.group_by {
    None => View::Flat(kept),
    Some(key) => View::Grouped(partition(kept, key)),
  }
}

fn partition<R: QueryRecord>(items: Vec<R>, key: R::GroupKey) -> Vec<Group<R>> {
  let mut groups: Vec<Group<R>> = Vec::new();
  let mut slots: HashMap<String, usize> = HashMap::new();

  for item in items {
    let label = item.group_value(key).into_owned();
    let slot = match slots.get(&label) {
      Some(&slot) => slot,
      None => {
        slots.insert(label.clone(), groups.len());
        groups.push(Group {
          key:   label,
          items: Vec::new(),
        });
        groups.len() - 1
      }
    };
    groups[slot].items.push(item);
  }

  groups
}

/// Run `query` over an equipment collection.
pub fn query_equipment<'a>(
  equipment: &'a [Equipment],
  query: &EquipmentQuery,
) -> View<&'a Equipment> {
  run(equipment.iter(), query)
}

/// Resolve maintenance records against `equipment`, then run `query`.
pub fn query_maintenance<'a>(
  records: &'a [MaintenanceRecord],
  equipment: &'a [Equipment],
  query: &MaintenanceQuery,
) -> View<MaintenanceRow<'a>> {
  let index = EquipmentIndex::new(equipment);
  run(resolve_rows(records, &index), query)
}
