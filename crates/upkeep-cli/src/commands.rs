//! Subcommand handlers. Each one loads what it needs from the store, runs the
//! form checks or the query pipeline, persists whole collections and writes
//! the result to `out`.

use std::io::Write;

use anyhow::{Context as _, bail};
use chrono::{NaiveDate, Utc};
use upkeep_core::{
  CompletionStatus, Equipment, MaintenanceRecord, Status,
  id::next_id,
  store::{Collection, RecordStore},
  validate::{EquipmentDraft, MaintenanceDraft, describe},
};
use upkeep_query::{
  DateRange, EquipmentGroupKey, EquipmentQuery, EquipmentSortKey, MaintenanceGroupKey,
  MaintenanceQuery, MaintenanceSortKey, Query, Selection, Sort,
  SortDirection, apply_bulk_status, completion_breakdown, hours_by_department,
  query_equipment, query_maintenance, recent_activity, status_breakdown,
};

use crate::{EquipmentAddArgs, ListArgs, MaintenanceAddArgs, render};

// ─── Forms ───────────────────────────────────────────────────────────────────

pub async fn add_equipment<S: RecordStore>(
  store: &S,
  out: &mut impl Write,
  args: EquipmentAddArgs,
  today: NaiveDate,
) -> anyhow::Result<()> {
  let draft = EquipmentDraft {
    name:          args.name,
    location:      args.location,
    department:    args.department,
    model:         args.model,
    serial_number: args.serial,
    install_date:  args.install_date,
    status:        args.status,
  };
  let new = draft.check(today).map_err(|errors| rejected(describe(&errors)))?;

  let mut equipment: Vec<Equipment> =
    store.load().await.context("failed to load equipment")?;
  let id = next_id(equipment.iter().map(|eq| eq.id), Utc::now());
  let added = new.into_equipment(id);
  let name = added.name.clone();
  equipment.push(added);
  store.save(&equipment).await.context("failed to save equipment")?;
  writeln!(out, "Added equipment {id} ({name})")?;
  Ok(())
}

pub async fn add_maintenance<S: RecordStore>(
  store: &S,
  out: &mut impl Write,
  args: MaintenanceAddArgs,
  today: NaiveDate,
) -> anyhow::Result<()> {
  let draft = MaintenanceDraft {
    equipment_id:      args.equipment_id,
    date:              args.date,
    kind:              args.kind,
    technician:        args.technician,
    hours_spent:       args.hours,
    description:       args.description,
    parts_replaced:    args.parts,
    priority:          args.priority,
    completion_status: args.completion,
  };
  let new = draft.check(today).map_err(|errors| rejected(describe(&errors)))?;

  let equipment: Vec<Equipment> =
    store.load().await.context("failed to load equipment")?;
  if !equipment.iter().any(|eq| eq.id == new.equipment_id) {
    tracing::warn!(
      equipment_id = new.equipment_id,
      "no equipment with this id; the record will show as unknown"
    );
  }

  let mut records: Vec<MaintenanceRecord> =
    store.load().await.context("failed to load maintenance records")?;
  let id = next_id(records.iter().map(|rec| rec.id), Utc::now());
  records.push(new.into_record(id));
  store
    .save(&records)
    .await
    .context("failed to save maintenance records")?;
  writeln!(out, "Logged maintenance record {id}")?;
  Ok(())
}

/// Print every field error and turn them into a single failure.
fn rejected(lines: Vec<String>) -> anyhow::Error {
  for line in &lines {
    eprintln!("{line}");
  }
  anyhow::anyhow!("{} invalid field(s)", lines.len())
}

// ─── Tables ──────────────────────────────────────────────────────────────────

pub async fn list_equipment<S: RecordStore>(
  store: &S,
  out: &mut impl Write,
  args: &ListArgs,
) -> anyhow::Result<()> {
  let equipment: Vec<Equipment> =
    store.load().await.context("failed to load equipment")?;
  let query = equipment_query(args);
  write!(out, "{}", render::equipment_view(&query_equipment(&equipment, &query)))?;
  Ok(())
}

pub async fn list_maintenance<S: RecordStore>(
  store: &S,
  out: &mut impl Write,
  args: &ListArgs,
) -> anyhow::Result<()> {
  let equipment: Vec<Equipment> =
    store.load().await.context("failed to load equipment")?;
  let records: Vec<MaintenanceRecord> =
    store.load().await.context("failed to load maintenance records")?;
  let query = maintenance_query(args);
  write!(
    out,
    "{}",
    render::maintenance_view(&query_maintenance(&records, &equipment, &query))
  )?;
  Ok(())
}

pub(crate) fn equipment_query(args: &ListArgs) -> EquipmentQuery {
  Query {
    status: status_filter::<Status>(args.status.as_deref()),
    sort: sort(args, EquipmentSortKey::parse_lenient),
    group_by: lenient_key("group", args.group_by.as_deref(), EquipmentGroupKey::parse_lenient),
    ..base_query(args)
  }
}

pub(crate) fn maintenance_query(args: &ListArgs) -> MaintenanceQuery {
  Query {
    status: status_filter::<CompletionStatus>(args.status.as_deref()),
    sort: sort(args, MaintenanceSortKey::parse_lenient),
    group_by: lenient_key(
      "group",
      args.group_by.as_deref(),
      MaintenanceGroupKey::parse_lenient,
    ),
    ..base_query(args)
  }
}

fn base_query<S, K, G>(args: &ListArgs) -> Query<S, K, G> {
  let date_range = match (args.from, args.to) {
    (None, None) => None,
    (start, end) => Some(DateRange::new(start, end)),
  };
  Query {
    search: args.search.clone(),
    date_range,
    ..Query::default()
  }
}

/// An unknown status value disables the status filter.
fn status_filter<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
  let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
  match raw.parse() {
    Ok(status) => Some(status),
    Err(_) => {
      tracing::warn!(status = raw, "unknown status; not filtering by status");
      None
    }
  }
}

fn sort<K>(args: &ListArgs, parse: impl Fn(&str) -> Option<K>) -> Option<Sort<K>> {
  let key = lenient_key("sort", args.sort.as_deref(), parse)?;
  let direction = if args.desc {
    SortDirection::Descending
  } else {
    SortDirection::Ascending
  };
  Some(Sort { key, direction })
}

fn lenient_key<K>(
  axis: &'static str,
  raw: Option<&str>,
  parse: impl Fn(&str) -> Option<K>,
) -> Option<K> {
  let raw = raw?;
  let key = parse(raw);
  if key.is_none() {
    tracing::warn!(axis, key = raw, "unknown key; ignoring");
  }
  key
}

// ─── Bulk update ─────────────────────────────────────────────────────────────

pub async fn set_status<S: RecordStore>(
  store: &S,
  out: &mut impl Write,
  ids: &[u64],
  status: &str,
) -> anyhow::Result<()> {
  let Ok(status) = status.trim().parse::<Status>() else {
    bail!("invalid status {status:?}; expected Operational, Down, Maintenance or Retired");
  };
  let selection: Selection = ids.iter().copied().collect();

  let equipment: Vec<Equipment> =
    store.load().await.context("failed to load equipment")?;
  let matched = equipment.iter().filter(|eq| selection.contains(eq.id)).count();
  if matched < selection.len() {
    tracing::warn!(
      requested = selection.len(),
      matched,
      "some selected ids match no equipment"
    );
  }

  let updated = apply_bulk_status(equipment, &selection, Some(status));
  store.save(&updated).await.context("failed to save equipment")?;
  writeln!(out, "Set {matched} equipment record(s) to {status}")?;
  Ok(())
}

// ─── Clear ───────────────────────────────────────────────────────────────────

pub async fn clear<S: RecordStore>(
  store: &S,
  out: &mut impl Write,
  collection: Collection,
  yes: bool,
) -> anyhow::Result<()> {
  let label = match collection {
    Collection::Equipment => "equipment",
    Collection::Maintenance => "maintenance",
  };
  if !yes {
    bail!("refusing to delete all {label} records without --yes");
  }
  store
    .clear(collection)
    .await
    .with_context(|| format!("failed to clear {label} records"))?;
  writeln!(out, "Deleted all {label} records")?;
  Ok(())
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

pub async fn dashboard<S: RecordStore>(
  store: &S,
  out: &mut impl Write,
  recent: usize,
) -> anyhow::Result<()> {
  let equipment: Vec<Equipment> =
    store.load().await.context("failed to load equipment")?;
  let records: Vec<MaintenanceRecord> =
    store.load().await.context("failed to load maintenance records")?;

  let panels = render::Dashboard {
    statuses:    status_breakdown(&equipment),
    completions: completion_breakdown(&records),
    hours:       hours_by_department(&records, &equipment),
    recent:      recent_activity(&records, &equipment, recent),
  };
  write!(out, "{}", render::dashboard(&panels))?;
  Ok(())
}
