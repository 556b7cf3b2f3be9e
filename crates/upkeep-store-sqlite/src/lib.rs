//! SQLite backend for the Upkeep record store.
//!
//! Each collection is one JSON blob in a key-value table. Wraps
//! [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
