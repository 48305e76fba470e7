//! An in-memory `Ledger` implementation.

use std::{collections::HashMap, convert::Infallible};

use crate::{
  ledger::{Ledger, LedgerWrite},
  path::{PathRecord, UpdateRecord},
  principal::{PathId, PathKey, Principal},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
  next_path_id: PathId,
  oracle:       Option<Principal>,
  paths:        HashMap<PathKey, PathRecord>,
  path_updates: HashMap<PathKey, UpdateRecord>,
}

impl MemoryLedger {
  pub fn new() -> Self { Self::default() }

  /// Number of stored records.
  pub fn len(&self) -> usize { self.paths.len() }

  pub fn is_empty(&self) -> bool { self.paths.is_empty() }
}

impl Ledger for MemoryLedger {
  type Error = Infallible;

  fn next_path_id(&self) -> Result<PathId, Infallible> { Ok(self.next_path_id) }

  fn oracle(&self) -> Result<Option<Principal>, Infallible> {
    Ok(self.oracle.clone())
  }

  fn path(&self, key: &PathKey) -> Result<Option<PathRecord>, Infallible> {
    Ok(self.paths.get(key).cloned())
  }

  fn path_update(&self, key: &PathKey) -> Result<Option<UpdateRecord>, Infallible> {
    Ok(self.path_updates.get(key).cloned())
  }

  fn contains_path(&self, key: &PathKey) -> Result<bool, Infallible> {
    Ok(self.paths.contains_key(key))
  }

  fn commit(&mut self, writes: Vec<LedgerWrite>) -> Result<(), Infallible> {
    for write in writes {
      match write {
        LedgerWrite::SetOracle(oracle) => self.oracle = Some(oracle),
        LedgerWrite::SetNextPathId(id) => self.next_path_id = id,
        LedgerWrite::PutPath(key, record) => {
          self.paths.insert(key, record);
        }
        LedgerWrite::PutUpdate(key, update) => {
          self.path_updates.insert(key, update);
        }
      }
    }
    Ok(())
  }
}
