//! Record identifiers.
//!
//! Ids are plain `u64` values. Persisted data has carried them both as JSON
//! numbers and as numeric strings, so decoding accepts either.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Deserialize an id written either as a JSON number or a numeric string.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Integer(u64),
    Float(f64),
    Text(String),
  }

  match RawId::deserialize(deserializer)? {
    RawId::Integer(id) => Ok(id),
    RawId::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
      Ok(f as u64)
    }
    RawId::Float(f) => Err(D::Error::custom(format!("invalid id: {f}"))),
    RawId::Text(s) => s
      .trim()
      .parse()
      .map_err(|_| D::Error::custom(format!("invalid id: {s:?}"))),
  }
}

/// Allocate an id for a new record.
///
/// The id is the creation time in Unix milliseconds, unless that is not
/// strictly greater than every existing id, in which case it is `max + 1`.
pub fn next_id(existing: impl IntoIterator<Item = u64>, now: DateTime<Utc>) -> u64 {
  let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
  match existing.into_iter().max() {
    Some(max) if candidate <= max => max.saturating_add(1),
    _ => candidate,
  }
}
