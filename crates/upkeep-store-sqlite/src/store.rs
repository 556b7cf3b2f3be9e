//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use upkeep_core::store::{
  Collection, Record, RecordStore, decode_collection, encode_collection,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Upkeep record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by the tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub(crate) async fn read_blob(&self, key: &'static str) -> Result<Option<String>> {
    let value = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM blobs WHERE key = ?1",
              rusqlite::params![key],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(value)
  }

  pub(crate) async fn write_blob(&self, key: &'static str, value: String) -> Result<()> {
    let updated_at = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key, value, updated_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn load<R: Record>(&self) -> Result<Vec<R>> {
    let key = R::COLLECTION.key();
    let records = match self.read_blob(key).await? {
      Some(raw) => decode_collection(&raw),
      None => Vec::new(),
    };
    tracing::debug!(collection = key, count = records.len(), "loaded collection");
    Ok(records)
  }

  async fn save<R: Record>(&self, records: &[R]) -> Result<()> {
    let key = R::COLLECTION.key();
    let raw = encode_collection(records)?;
    self.write_blob(key, raw).await?;
    tracing::debug!(collection = key, count = records.len(), "saved collection");
    Ok(())
  }

  async fn clear(&self, collection: Collection) -> Result<()> {
    let key = collection.key();
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM blobs WHERE key = ?1", rusqlite::params![key])?)
      })
      .await?;
    tracing::debug!(collection = key, removed, "cleared collection");
    Ok(())
  }
}
