//! Error types for `pathreg-core`.

use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator as _, IntoStaticStr};
use thiserror::Error;

// ─── Taxonomy ────────────────────────────────────────────────────────────────

/// Why the registry refused a call.
///
/// Every kind carries a stable numeric code (see [`ErrorKind::code`]) that
/// hosts surface to their own callers. `InvalidPathId` and
/// `InvalidUpdateTimestamp` are not raised by any current operation; they
/// keep their codes reserved.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Error,
  EnumIter,
  IntoStaticStr,
  Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
  #[error("caller is not authorized")]
  NotAuthorized,

  #[error("invalid path id")]
  InvalidPathId,

  #[error("module count out of range")]
  InvalidModuleCount,

  #[error("metadata too long")]
  InvalidMetadata,

  #[error("path already exists")]
  PathAlreadyExists,

  #[error("path not found")]
  PathNotFound,

  #[error("difficulty out of range")]
  InvalidDifficulty,

  #[error("estimated duration must be positive")]
  InvalidDuration,

  #[error("invalid update timestamp")]
  InvalidUpdateTimestamp,

  #[error("invalid oracle")]
  InvalidOracle,

  #[error("maximum number of paths reached")]
  MaxPathsExceeded,

  #[error("owner is the reserved identity")]
  InvalidUser,

  #[error("module ids must be positive")]
  InvalidModuleId,
}

impl ErrorKind {
  /// The numeric code hosts report for this kind.
  pub fn code(self) -> u32 {
    match self {
      Self::NotAuthorized => 100,
      Self::InvalidPathId => 101,
      Self::InvalidModuleCount => 102,
      Self::InvalidMetadata => 103,
      Self::PathAlreadyExists => 104,
      Self::PathNotFound => 105,
      Self::InvalidDifficulty => 106,
      Self::InvalidDuration => 107,
      Self::InvalidUpdateTimestamp => 108,
      Self::InvalidOracle => 109,
      Self::MaxPathsExceeded => 110,
      Self::InvalidUser => 111,
      Self::InvalidModuleId => 112,
    }
  }

  /// Reverse of [`ErrorKind::code`].
  pub fn from_code(code: u32) -> Option<Self> {
    Self::iter().find(|k| k.code() == code)
  }

  /// Snake-case name, e.g. `"max_paths_exceeded"`.
  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  /// The call was refused before any state changed.
  #[error("rejected: {0} (code {code})", code = .0.code())]
  Rejected(#[from] ErrorKind),

  /// The backing ledger failed to read or commit.
  #[error("ledger error: {0}")]
  Ledger(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A thread panicked while holding a [`SharedRegistry`](crate::SharedRegistry)
  /// lock.
  #[error("registry lock poisoned")]
  Poisoned,

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

impl Error {
  /// Wrap a backend error.
  pub fn ledger<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Ledger(Box::new(err))
  }

  /// The rejection kind, if this is a rejection.
  pub fn kind(&self) -> Option<ErrorKind> {
    match self {
      Self::Rejected(kind) => Some(*kind),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
