//! Form-input validation.
//!
//! Drafts carry raw form text. [`EquipmentDraft::check`] and
//! [`MaintenanceDraft::check`] turn a draft into a typed record body or a
//! [`ValidationErrors`] listing every failing field. This is the only place
//! closed-set membership and date rules are enforced; stored records are
//! trusted afterwards.

use std::{borrow::Cow, str::FromStr};

use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
  enums::{CompletionStatus, Department, MaintenanceType, Priority, Status},
  equipment::Equipment,
  maintenance::{MaintenanceRecord, parse_date},
};

// ─── Equipment ───────────────────────────────────────────────────────────────

/// Raw equipment form input.
#[derive(Debug, Clone, Default, Validate)]
pub struct EquipmentDraft {
  #[validate(length(min = 2, message = "Name is required"))]
  pub name:          String,
  #[validate(length(min = 2, message = "Location is required"))]
  pub location:      String,
  pub department:    String,
  #[validate(length(min = 1, message = "Model is required"))]
  pub model:         String,
  #[validate(length(min = 1, message = "Serial number is required"))]
  pub serial_number: String,
  pub install_date:  String,
  pub status:        String,
}

/// A validated equipment body, waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
  pub name:          String,
  pub location:      String,
  pub department:    Department,
  pub model:         String,
  pub serial_number: String,
  pub install_date:  NaiveDate,
  pub status:        Status,
}

impl NewEquipment {
  pub fn into_equipment(self, id: u64) -> Equipment {
    Equipment {
      id,
      name: self.name,
      location: self.location,
      department: self.department,
      model: self.model,
      serial_number: self.serial_number,
      install_date: self.install_date,
      status: self.status,
    }
  }
}

impl EquipmentDraft {
  /// Validate against the form rules, with `today` as the latest allowed
  /// install date.
  pub fn check(&self, today: NaiveDate) -> Result<NewEquipment, ValidationErrors> {
    let mut errors = match self.validate() {
      Ok(()) => ValidationErrors::new(),
      Err(errors) => errors,
    };

    let department =
      parse_choice(&self.department, "department", "Invalid department", &mut errors);
    let install_date = parse_past_date(
      &self.install_date,
      today,
      "install_date",
      "Install date cannot be in the future",
      &mut errors,
    );
    let status = parse_choice(&self.status, "status", "Invalid status", &mut errors);

    match (department, install_date, status) {
      (Some(department), Some(install_date), Some(status))
        if errors.errors().is_empty() =>
      {
        Ok(NewEquipment {
          name: self.name.clone(),
          location: self.location.clone(),
          department,
          model: self.model.clone(),
          serial_number: self.serial_number.clone(),
          install_date,
          status,
        })
      }
      _ => Err(errors),
    }
  }
}

// ─── Maintenance ─────────────────────────────────────────────────────────────

/// Raw maintenance form input.
#[derive(Debug, Clone, Default, Validate)]
pub struct MaintenanceDraft {
  pub equipment_id:      String,
  pub date:              String,
  pub kind:              String,
  #[validate(length(min = 2, message = "Technician must be at least 2 characters"))]
  pub technician:        String,
  #[validate(range(min = 0.0, message = "Hours must be positive"))]
  pub hours_spent:       f64,
  #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
  pub description:       String,
  pub parts_replaced:    Vec<String>,
  pub priority:          String,
  pub completion_status: String,
}

/// A validated maintenance body, waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenance {
  pub equipment_id:      u64,
  pub date:              NaiveDate,
  pub kind:              MaintenanceType,
  pub technician:        String,
  pub hours_spent:       f64,
  pub description:       String,
  pub parts_replaced:    Vec<String>,
  pub priority:          Priority,
  pub completion_status: CompletionStatus,
}

impl NewMaintenance {
  pub fn into_record(self, id: u64) -> MaintenanceRecord {
    MaintenanceRecord {
      id,
      equipment_id: self.equipment_id,
      date: self.date.format("%Y-%m-%d").to_string(),
      kind: self.kind,
      technician: self.technician,
      hours_spent: self.hours_spent,
      description: self.description,
      parts_replaced: self.parts_replaced,
      priority: self.priority,
      completion_status: self.completion_status,
    }
  }
}

impl MaintenanceDraft {
  /// Validate against the form rules, with `today` as the latest allowed
  /// service date.
  pub fn check(&self, today: NaiveDate) -> Result<NewMaintenance, ValidationErrors> {
    let mut errors = match self.validate() {
      Ok(()) => ValidationErrors::new(),
      Err(errors) => errors,
    };

    let equipment_id = match self.equipment_id.trim().parse::<u64>() {
      Ok(id) => Some(id),
      Err(_) => {
        add_error(&mut errors, "equipment_id", "Equipment is required");
        None
      }
    };
    if self.hours_spent.is_nan() {
      add_error(&mut errors, "hours_spent", "Hours must be positive");
    } else if self.hours_spent > 24.0 {
      add_error(&mut errors, "hours_spent", "Cannot exceed 24 hours");
    }
    let date = parse_past_date(
      &self.date,
      today,
      "date",
      "Date cannot be in the future",
      &mut errors,
    );
    let kind = parse_choice(&self.kind, "kind", "Invalid maintenance type", &mut errors);
    let priority =
      parse_choice(&self.priority, "priority", "Invalid priority level", &mut errors);
    let completion_status = parse_choice(
      &self.completion_status,
      "completion_status",
      "Invalid completion status",
      &mut errors,
    );

    match (equipment_id, date, kind, priority, completion_status) {
      (Some(equipment_id), Some(date), Some(kind), Some(priority), Some(completion_status))
        if errors.errors().is_empty() =>
      {
        Ok(NewMaintenance {
          equipment_id,
          date,
          kind,
          technician: self.technician.clone(),
          hours_spent: self.hours_spent,
          description: self.description.clone(),
          parts_replaced: self
            .parts_replaced
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect(),
          priority,
          completion_status,
        })
      }
      _ => Err(errors),
    }
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn add_error(errors: &mut ValidationErrors, field: &'static str, message: &'static str) {
  let mut error = ValidationError::new("invalid");
  error.message = Some(Cow::Borrowed(message));
  errors.add(field, error);
}

fn parse_choice<T: FromStr>(
  value: &str,
  field: &'static str,
  message: &'static str,
  errors: &mut ValidationErrors,
) -> Option<T> {
  match value.trim().parse() {
    Ok(parsed) => Some(parsed),
    Err(_) => {
      add_error(errors, field, message);
      None
    }
  }
}

/// A date that parses and is not after `today`.
fn parse_past_date(
  value: &str,
  today: NaiveDate,
  field: &'static str,
  message: &'static str,
  errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
  match parse_date(value) {
    Some(date) if date <= today => Some(date),
    _ => {
      add_error(errors, field, message);
      None
    }
  }
}

/// Flatten errors into `field: message` lines, sorted by field name.
pub fn describe(errors: &ValidationErrors) -> Vec<String> {
  let mut lines: Vec<String> = errors
    .field_errors()
    .into_iter()
    .flat_map(|(field, errs)| {
      errs.iter().map(move |e| match &e.message {
        Some(message) => format!("{field}: {message}"),
        None => format!("{field}: {}", e.code),
      })
    })
    .collect();
  lines.sort();
  lines
}
