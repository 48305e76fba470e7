//! Error type for `pathreg-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored value does not fit its domain type.
  #[error("corrupt row: {0}")]
  Corrupt(String),

  /// The file was written by a newer schema than this build understands.
  #[error("unsupported schema version {found} (expected at most {supported})")]
  UnsupportedSchema { found: i64, supported: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
