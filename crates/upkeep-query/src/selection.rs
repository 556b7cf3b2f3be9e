//! Row selection and the bulk status update it drives.

use std::collections::BTreeSet;

use upkeep_core::{Equipment, Status};

/// A set of selected record ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  ids: BTreeSet<u64>,
}

impl Selection {
  pub fn new() -> Self { Self::default() }

  pub fn contains(&self, id: u64) -> bool { self.ids.contains(&id) }

  pub fn len(&self) -> usize { self.ids.len() }

  pub fn is_empty(&self) -> bool { self.ids.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = u64> + '_ { self.ids.iter().copied() }

  /// Add `id` if absent, remove it if present. `None` leaves the selection
  /// untouched.
  pub fn toggle(&mut self, id: Option<u64>) {
    let Some(id) = id else {
      return;
    };
    if !self.ids.remove(&id) {
      self.ids.insert(id);
    }
  }
}

impl FromIterator<u64> for Selection {
  fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
    Self {
      ids: iter.into_iter().collect(),
    }
  }
}

/// Return `selection` with `id` toggled.
pub fn toggle_selection(selection: &Selection, id: Option<u64>) -> Selection {
  let mut next = selection.clone();
  next.toggle(id);
  next
}

/// Overwrite `status` on every record whose id is in `targets`.
///
/// Record order and every other field are preserved. Ids in `targets` that
/// match no record are ignored. An empty selection or a `None` status returns
/// `collection` unchanged.
pub fn apply_bulk_status(
  collection: Vec<Equipment>,
  targets: &Selection,
  status: Option<Status>,
) -> Vec<Equipment> {
  let Some(status) = status else {
    return collection;
  };
  if targets.is_empty() {
    return collection;
  }

  collection
    .into_iter()
    .map(|eq| {
      if targets.contains(eq.id) {
        Equipment { status, ..eq }
      } else {
        eq
      }
    })
    .collect()
}
