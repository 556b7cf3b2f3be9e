//! SQL schema for the Upkeep SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per collection. `value` is the whole collection as a JSON array
-- and is always replaced wholesale.
CREATE TABLE IF NOT EXISTS blobs (
    key         TEXT PRIMARY KEY,   -- 'equipmentData' | 'maintenanceRecords'
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL       -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
