//! Core types and trait definitions for the Upkeep maintenance tracker.
//!
//! This crate holds the domain model, form-input validation and the
//! [`RecordStore`](store::RecordStore) abstraction. It performs no I/O of its
//! own; backends and the query pipeline build on top of it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod enums;
pub mod equipment;
pub mod error;
pub mod id;
pub mod maintenance;
pub mod store;
pub mod validate;

pub use enums::{CompletionStatus, Department, MaintenanceType, Priority, Status};
pub use equipment::Equipment;
pub use error::{Error, Result};
pub use maintenance::MaintenanceRecord;
