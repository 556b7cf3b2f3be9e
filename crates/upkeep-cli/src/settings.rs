//! Runtime configuration, layered from an optional TOML file and `UPKEEP_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use upkeep_query::RECENT_ACTIVITY_LIMIT;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
  /// SQLite file holding the record collections.
  pub store_path:   PathBuf,
  /// Rows shown in the dashboard's recent-activity table.
  pub recent_limit: usize,
}

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      store_path:   PathBuf::from("upkeep.sqlite3"),
      recent_limit: RECENT_ACTIVITY_LIMIT,
    }
  }
}

impl CliConfig {
  /// Read `path` (if it exists), then overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("UPKEEP"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: CliConfig = settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let cfg = CliConfig::load(Path::new("definitely-not-here.toml")).unwrap();
    assert_eq!(cfg.recent_limit, RECENT_ACTIVITY_LIMIT);
  }

  #[test]
  fn paths_without_tilde_are_untouched() {
    assert_eq!(
      expand_tilde(Path::new("data/upkeep.sqlite3")),
      PathBuf::from("data/upkeep.sqlite3")
    );
  }
}
