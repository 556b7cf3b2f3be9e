//! `upkeep`: command-line front end for the Upkeep maintenance tracker.
//!
//! # Usage
//!
//! ```
//! upkeep equipment add --name "Drill Press" --location "Bay 2" \
//!   --department Machining --model DP-400 --serial SN-001 --install-date 2023-05-01
//! upkeep equipment list --search drill --sort name --desc
//! upkeep equipment set-status --id 1 --id 2 --status Maintenance
//! upkeep maintenance list --from 2024-02-01 --to 2024-02-29 --group-by equipment
//! upkeep dashboard
//! ```

mod commands;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use upkeep_core::store::Collection;
use upkeep_store_sqlite::SqliteStore;

use crate::settings::CliConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "upkeep", author, version, about = "Equipment maintenance tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "upkeep.toml")]
  config: PathBuf,

  /// SQLite store path; overrides `store_path` from the config.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Register, browse and update equipment.
  #[command(subcommand)]
  Equipment(EquipmentCommand),

  /// Log and browse maintenance records.
  #[command(subcommand)]
  Maintenance(MaintenanceCommand),

  /// Summary of equipment status, hours and recent activity.
  Dashboard {
    /// Number of recent maintenance records to show.
    #[arg(long)]
    recent: Option<usize>,
  },
}

#[derive(Subcommand, Debug)]
enum EquipmentCommand {
  /// Register a new item of equipment.
  Add(EquipmentAddArgs),
  /// List equipment, optionally filtered, sorted or grouped.
  List(ListArgs),
  /// Set the status of every listed id at once.
  SetStatus {
    /// Equipment id to update; repeat for several.
    #[arg(long = "id", required = true)]
    ids:    Vec<u64>,
    #[arg(long)]
    status: String,
  },
  /// Delete all equipment records.
  Clear {
    /// Confirm the deletion.
    #[arg(long)]
    yes: bool,
  },
}

#[derive(Subcommand, Debug)]
enum MaintenanceCommand {
  /// Log a maintenance record.
  Add(MaintenanceAddArgs),
  /// List maintenance records, optionally filtered, sorted or grouped.
  List(ListArgs),
  /// Delete all maintenance records.
  Clear {
    /// Confirm the deletion.
    #[arg(long)]
    yes: bool,
  },
}

#[derive(Args, Debug)]
struct EquipmentAddArgs {
  #[arg(long)]
  name:         String,
  #[arg(long)]
  location:     String,
  /// Machining, Assembly, Packaging or Shipping.
  #[arg(long)]
  department:   String,
  #[arg(long)]
  model:        String,
  #[arg(long = "serial")]
  serial:       String,
  /// `YYYY-MM-DD`; may not be in the future.
  #[arg(long)]
  install_date: String,
  /// Operational, Down, Maintenance or Retired.
  #[arg(long, default_value = "Operational")]
  status:       String,
}

#[derive(Args, Debug)]
struct MaintenanceAddArgs {
  #[arg(long)]
  equipment_id: String,
  /// `YYYY-MM-DD`; may not be in the future.
  #[arg(long)]
  date:         String,
  /// Preventive, Repair or Emergency.
  #[arg(long = "type")]
  kind:         String,
  #[arg(long)]
  technician:   String,
  #[arg(long)]
  hours:        f64,
  #[arg(long)]
  description:  String,
  /// Part replaced; repeat for several.
  #[arg(long = "part")]
  parts:        Vec<String>,
  /// Low, Medium or High.
  #[arg(long)]
  priority:     String,
  /// Complete, Incomplete or Pending.
  #[arg(long)]
  completion:   String,
}

/// Table controls shared by both list commands.
#[derive(Args, Debug, Default)]
struct ListArgs {
  /// Case-insensitive name filter.
  #[arg(long, default_value = "")]
  search:   String,
  /// Only show records with this status.
  #[arg(long)]
  status:   Option<String>,
  /// Earliest date to include (`YYYY-MM-DD`).
  #[arg(long)]
  from:     Option<NaiveDate>,
  /// Latest date to include (`YYYY-MM-DD`).
  #[arg(long)]
  to:       Option<NaiveDate>,
  /// Column to sort by, e.g. `name` or `hoursSpent`.
  #[arg(long)]
  sort:     Option<String>,
  /// Sort descending instead of ascending.
  #[arg(long)]
  desc:     bool,
  /// Field to group by, e.g. `department` or `equipment`.
  #[arg(long)]
  group_by: Option<String>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut cfg = CliConfig::load(&cli.config)?;
  if let Some(store) = cli.store {
    cfg.store_path = settings::expand_tilde(&store);
  }

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  let today = chrono::Local::now().date_naive();

  let mut out = std::io::stdout().lock();

  match cli.command {
    Command::Equipment(cmd) => match cmd {
      EquipmentCommand::Add(args) => {
        commands::add_equipment(&store, &mut out, args, today).await
      }
      EquipmentCommand::List(args) => commands::list_equipment(&store, &mut out, &args).await,
      EquipmentCommand::SetStatus { ids, status } => {
        commands::set_status(&store, &mut out, &ids, &status).await
      }
      EquipmentCommand::Clear { yes } => {
        commands::clear(&store, &mut out, Collection::Equipment, yes).await
      }
    },
    Command::Maintenance(cmd) => match cmd {
      MaintenanceCommand::Add(args) => {
        commands::add_maintenance(&store, &mut out, args, today).await
      }
      MaintenanceCommand::List(args) => {
        commands::list_maintenance(&store, &mut out, &args).await
      }
      MaintenanceCommand::Clear { yes } => {
        commands::clear(&store, &mut out, Collection::Maintenance, yes).await
      }
    },
    Command::Dashboard { recent } => {
      commands::dashboard(&store, &mut out, recent.unwrap_or(cfg.recent_limit)).await
    }
  }
}
