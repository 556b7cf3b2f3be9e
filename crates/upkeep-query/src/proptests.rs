//! Property tests for the pipeline over generated collections and queries.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use strum::IntoEnumIterator;
use upkeep_core::{Department, Equipment, Status};

use crate::{
  DateRange, EquipmentGroupKey, EquipmentQuery, EquipmentSortKey, Query, QueryRecord,
  Selection, Sort, apply_bulk_status, compare::compare_values, query_equipment,
  toggle_selection,
};

// -- Strategy helpers --

fn day(offset: u64) -> NaiveDate {
  NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset)
}

fn arb_status() -> impl Strategy<Value = Status> {
  prop::sample::select(Status::iter().collect::<Vec<_>>())
}

fn arb_department() -> impl Strategy<Value = Department> {
  prop::sample::select(Department::iter().collect::<Vec<_>>())
}

fn arb_equipment() -> impl Strategy<Value = Equipment> {
  // Few distinct ids and short names, so duplicates and ties are common.
  (0u64..6, "[A-Za-zÉé ]{0,5}", arb_department(), 0u64..1500, arb_status()).prop_map(
    |(id, name, department, days, status)| Equipment {
      id,
      name,
      location: format!("Bay {}", id % 3),
      department,
      model: "M-1".into(),
      serial_number: format!("SN-{id}"),
      install_date: day(days),
      status,
    },
  )
}

fn arb_collection() -> impl Strategy<Value = Vec<Equipment>> {
  prop::collection::vec(arb_equipment(), 0..12)
}

fn arb_sort() -> impl Strategy<Value = Sort<EquipmentSortKey>> {
  (
    prop::sample::select(EquipmentSortKey::iter().collect::<Vec<_>>()),
    any::<bool>(),
  )
    .prop_map(|(key, desc)| if desc { Sort::descending(key) } else { Sort::ascending(key) })
}

fn arb_range() -> impl Strategy<Value = DateRange> {
  (prop::option::of(0u64..1500), prop::option::of(0u64..1500))
    .prop_map(|(start, end)| DateRange::new(start.map(day), end.map(day)))
}

fn arb_query() -> impl Strategy<Value = EquipmentQuery> {
  (
    "[a-zé]{0,2}",
    prop::option::of(arb_status()),
    prop::option::of(arb_range()),
    prop::option::of(arb_sort()),
    prop::option::of(prop::sample::select(
      EquipmentGroupKey::iter().collect::<Vec<_>>(),
    )),
  )
    .prop_map(|(search, status, date_range, sort, group_by)| Query {
      search,
      status,
      date_range,
      sort,
      group_by,
    })
}

/// Index of `item` in `all`, by address.
fn position(all: &[Equipment], item: &Equipment) -> usize {
  all
    .iter()
    .position(|candidate| std::ptr::eq(candidate, item))
    .expect("output row comes from the input")
}

proptest! {
  #[test]
  fn identical_queries_give_identical_output(
    equipment in arb_collection(),
    query in arb_query(),
  ) {
    prop_assert_eq!(
      query_equipment(&equipment, &query),
      query_equipment(&equipment, &query)
    );
  }

  #[test]
  fn filtered_rows_match_every_criterion_in_input_order(
    equipment in arb_collection(),
    query in arb_query(),
  ) {
    let unsorted = EquipmentQuery { sort: None, group_by: None, ..query.clone() };
    let rows = query_equipment(&equipment, &unsorted).into_flat();
    let needle = query.search.to_lowercase();

    let positions: Vec<usize> = rows.iter().map(|eq| position(&equipment, eq)).collect();
    prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    for eq in &rows {
      prop_assert!(eq.name.to_lowercase().contains(&needle));
      prop_assert!(query.status.is_none_or(|status| eq.status == status));
      prop_assert!(query.date_range.is_none_or(|range| range.includes(Some(eq.install_date))));
    }

    let search_only = EquipmentQuery { search: query.search.clone(), ..Default::default() };
    let wider = query_equipment(&equipment, &search_only).into_flat();
    prop_assert!(rows.iter().all(|eq| wider.iter().any(|w| std::ptr::eq(*w, *eq))));
  }

  #[test]
  fn sorting_orders_rows_and_keeps_ties_stable(
    equipment in arb_collection(),
    sort in arb_sort(),
  ) {
    let query = EquipmentQuery { sort: Some(sort), ..Default::default() };
    let rows = query_equipment(&equipment, &query).into_flat();
    prop_assert_eq!(rows.len(), equipment.len());

    for pair in rows.windows(2) {
      let (a, b) = (pair[0], pair[1]);
      let ordering = compare_values(a.sort_value(sort.key), b.sort_value(sort.key));
      prop_assert_ne!(sort.direction.apply(ordering), Ordering::Greater);
      if ordering == Ordering::Equal {
        prop_assert!(position(&equipment, a) < position(&equipment, b));
      }
    }
  }

  #[test]
  fn grouping_partitions_the_flat_rows(
    equipment in arb_collection(),
    query in arb_query(),
    key in prop::sample::select(EquipmentGroupKey::iter().collect::<Vec<_>>()),
  ) {
    let flat = query_equipment(&equipment, &EquipmentQuery { group_by: None, ..query.clone() });
    let grouped = query_equipment(&equipment, &EquipmentQuery { group_by: Some(key), ..query });
    prop_assert_eq!(grouped.len(), flat.len());

    let crate::View::Grouped(groups) = grouped else {
      return Err(TestCaseError::fail("expected grouped view"));
    };
    let mut keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    for group in &groups {
      prop_assert!(!group.items.is_empty());
      prop_assert!(group.items.iter().all(|eq| eq.group_value(key) == group.key));
    }
    keys.sort_unstable();
    keys.dedup();
    prop_assert_eq!(keys.len(), groups.len());
  }

  #[test]
  fn bulk_update_touches_only_selected_status(
    equipment in arb_collection(),
    ids in prop::collection::vec(0u64..8, 0..5),
    status in prop::option::of(arb_status()),
  ) {
    let targets: Selection = ids.into_iter().collect();
    let updated = apply_bulk_status(equipment.clone(), &targets, status);
    prop_assert_eq!(updated.len(), equipment.len());

    for (before, after) in equipment.iter().zip(&updated) {
      match status {
        Some(status) if targets.contains(before.id) => {
          prop_assert_eq!(after.status, status);
          prop_assert_eq!(&after.with_status(before.status), before);
        }
        _ => {
          prop_assert_eq!(after, before);
        }
      }
    }
  }

  #[test]
  fn toggling_twice_restores_the_selection(
    ids in prop::collection::vec(0u64..8, 0..5),
    id in prop::option::of(0u64..8),
  ) {
    let selection: Selection = ids.into_iter().collect();
    let toggled = toggle_selection(&selection, id);
    if id.is_some() {
      prop_assert_ne!(&toggled, &selection);
    }
    prop_assert_eq!(toggle_selection(&toggled, id), selection);
  }
}
