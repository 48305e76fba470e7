//! The `Ledger` trait: where registry state lives.
//!
//! The registry reads through the ledger while validating a call and then
//! hands it every write for that call in a single [`Ledger::commit`].
//! Implementations must apply a commit all-or-nothing.

use crate::{
  path::{PathRecord, UpdateRecord},
  principal::{PathId, PathKey, Principal},
};

/// One state change produced by a successful registry call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerWrite {
  SetOracle(Principal),
  SetNextPathId(PathId),
  PutPath(PathKey, PathRecord),
  PutUpdate(PathKey, UpdateRecord),
}

/// Storage backend for a [`Registry`](crate::Registry).
pub trait Ledger {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The id the next created path will receive. Zero for an empty ledger.
  fn next_path_id(&self) -> Result<PathId, Self::Error>;

  fn oracle(&self) -> Result<Option<Principal>, Self::Error>;

  fn path(&self, key: &PathKey) -> Result<Option<PathRecord>, Self::Error>;

  fn path_update(&self, key: &PathKey) -> Result<Option<UpdateRecord>, Self::Error>;

  fn contains_path(&self, key: &PathKey) -> Result<bool, Self::Error> {
    Ok(self.path(key)?.is_some())
  }

  /// Apply `writes` in order, atomically.
  fn commit(&mut self, writes: Vec<LedgerWrite>) -> Result<(), Self::Error>;
}
