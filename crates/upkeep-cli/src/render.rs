//! Plain-text rendering of tables and dashboard panels.

use upkeep_core::{CompletionStatus, Equipment, Status};
use upkeep_query::{MaintenanceRow, View};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Render `rows` under `headers` with columns padded to their widest cell.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
  let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
  for row in rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  push_line(&mut out, headers.iter().copied(), &widths);
  let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
  push_line(&mut out, rule.iter().map(String::as_str), &widths);
  for row in rows {
    push_line(&mut out, row.iter().map(String::as_str), &widths);
  }
  out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
  let padded: Vec<String> = cells
    .zip(widths)
    .map(|(cell, &width)| format!("{cell:<width$}"))
    .collect();
  out.push_str(padded.join("  ").trim_end());
  out.push('\n');
}

fn render_view<T>(view: &View<T>, empty: &str, render: impl Fn(&[T]) -> String) -> String {
  if view.is_empty() {
    return format!("{empty}\n");
  }
  match view {
    View::Flat(items) => render(items.as_slice()),
    View::Grouped(groups) => {
      let mut out = String::new();
      for group in groups {
        out.push_str(&format!("== {} ({}) ==\n", group.key, group.items.len()));
        out.push_str(&render(group.items.as_slice()));
        out.push('\n');
      }
      out
    }
  }
}

const EQUIPMENT_HEADERS: [&str; 8] = [
  "ID",
  "Name",
  "Location",
  "Department",
  "Model",
  "Serial Number",
  "Install Date",
  "Status",
];

pub fn equipment_table(items: &[&Equipment]) -> String {
  let rows: Vec<Vec<String>> = items
    .iter()
    .map(|eq| {
      vec![
        eq.id.to_string(),
        eq.name.clone(),
        eq.location.clone(),
        eq.department.to_string(),
        eq.model.clone(),
        eq.serial_number.clone(),
        eq.install_date.to_string(),
        eq.status.to_string(),
      ]
    })
    .collect();
  table(&EQUIPMENT_HEADERS, &rows)
}

pub fn equipment_view(view: &View<&Equipment>) -> String {
  render_view(view, "No equipment added yet", equipment_table)
}

const MAINTENANCE_HEADERS: [&str; 9] = [
  "Equipment",
  "Date",
  "Type",
  "Technician",
  "Hours Spent",
  "Description",
  "Parts Replaced",
  "Priority",
  "Status",
];

pub fn maintenance_table(rows: &[MaintenanceRow<'_>]) -> String {
  let cells: Vec<Vec<String>> = rows
    .iter()
    .map(|row| {
      let rec = row.record;
      let parts = if rec.parts_replaced.is_empty() {
        "N/A".to_owned()
      } else {
        rec.parts_replaced.join(", ")
      };
      vec![
        row.equipment_name.to_owned(),
        rec.date.clone(),
        rec.kind.to_string(),
        rec.technician.clone(),
        format!("{} hrs", rec.hours_spent),
        rec.description.clone(),
        parts,
        rec.priority.to_string(),
        rec.completion_status.to_string(),
      ]
    })
    .collect();
  table(&MAINTENANCE_HEADERS, &cells)
}

pub fn maintenance_view(view: &View<MaintenanceRow<'_>>) -> String {
  render_view(view, "No maintenance records available", maintenance_table)
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

pub struct Dashboard<'a> {
  pub statuses:    Vec<(Status, usize)>,
  pub completions: Vec<(CompletionStatus, usize)>,
  pub hours:       Vec<(String, f64)>,
  pub recent:      Vec<MaintenanceRow<'a>>,
}

pub fn dashboard(d: &Dashboard<'_>) -> String {
  let mut out = String::new();

  out.push_str("Equipment Status Breakdown\n");
  let rows: Vec<Vec<String>> = d
    .statuses
    .iter()
    .map(|(status, n)| vec![status.to_string(), n.to_string()])
    .collect();
  out.push_str(&table(&["Status", "Count"], &rows));

  out.push_str("\nMaintenance Hours by Department\n");
  let rows: Vec<Vec<String>> = d
    .hours
    .iter()
    .map(|(department, hours)| vec![department.clone(), format!("{hours}")])
    .collect();
  out.push_str(&table(&["Department", "Hours"], &rows));

  out.push_str("\nMaintenance Completion\n");
  let rows: Vec<Vec<String>> = d
    .completions
    .iter()
    .map(|(status, n)| vec![status.to_string(), n.to_string()])
    .collect();
  out.push_str(&table(&["Status", "Count"], &rows));

  out.push_str("\nRecent Maintenance Activities\n");
  if d.recent.is_empty() {
    out.push_str("No recent maintenance activities.\n");
  } else {
    let rows: Vec<Vec<String>> = d
      .recent
      .iter()
      .map(|row| {
        vec![
          row.record.date.clone(),
          row.equipment_name.to_owned(),
          row.record.technician.clone(),
          row.record.hours_spent.to_string(),
          row.record.completion_status.to_string(),
        ]
      })
      .collect();
    out.push_str(&table(
      &["Date", "Equipment", "Technician", "Hours Spent", "Status"],
      &rows,
    ));
  }
  out
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use upkeep_core::Department;
  use upkeep_query::{EquipmentGroupKey, EquipmentQuery, query_equipment};

  use super::*;

  fn equipment(id: u64, name: &str, department: Department) -> Equipment {
    Equipment {
      id,
      name: name.into(),
      location: "Bay 1".into(),
      department,
      model: "M".into(),
      serial_number: format!("SN-{id}"),
      install_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
      status: Status::Operational,
    }
  }

  #[test]
  fn columns_are_padded_to_widest_cell() {
    let out = table(&["A", "B"], &[vec!["long cell".into(), "x".into()]]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "A          B");
    assert_eq!(lines[1], "---------  -");
    assert_eq!(lines[2], "long cell  x");
  }

  #[test]
  fn empty_view_shows_placeholder() {
    let view = query_equipment(&[], &EquipmentQuery::default());
    assert_eq!(equipment_view(&view), "No equipment added yet\n");
  }

  #[test]
  fn grouped_view_has_group_headers() {
    let eq = vec![
      equipment(1, "Drill Press", Department::Machining),
      equipment(2, "Packer", Department::Packaging),
    ];
    let query = EquipmentQuery {
      group_by: Some(EquipmentGroupKey::Department),
      ..Default::default()
    };
    let out = equipment_view(&query_equipment(&eq, &query));
    assert!(out.contains("== Machining (1) =="));
    assert!(out.contains("== Packaging (1) =="));
    assert!(out.contains("Drill Press"));
  }

  #[test]
  fn dashboard_lists_each_panel() {
    let panels = Dashboard {
      statuses:    vec![(Status::Operational, 2), (Status::Down, 1)],
      completions: vec![(CompletionStatus::Complete, 1)],
      hours:       vec![("Machining".into(), 3.5)],
      recent:      Vec::new(),
    };
    let out = dashboard(&panels);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Equipment Status Breakdown");
    assert!(lines.contains(&"Operational  2"));
    assert!(lines.contains(&"Machining   3.5"));
    assert!(lines.contains(&"Maintenance Completion"));
    assert_eq!(lines.last(), Some(&"No recent maintenance activities."));
  }
}
