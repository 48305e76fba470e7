//! A cloneable, thread-safe handle to one registry.
//!
//! The whole registry sits behind a single mutex. `next_path_id` is shared by
//! every key, so nothing finer-grained is sound.

use std::sync::{Arc, Mutex};

use crate::{
  Error, Result,
  ledger::Ledger,
  path::{PathDraft, PathRecord, UpdateRecord},
  principal::{CallContext, PathId, Principal},
  registry::Registry,
};

pub struct SharedRegistry<L> {
  inner: Arc<Mutex<Registry<L>>>,
}

impl<L> Clone for SharedRegistry<L> {
  fn clone(&self) -> Self { Self { inner: Arc::clone(&self.inner) } }
}

impl<L: Ledger> SharedRegistry<L> {
  pub fn new(registry: Registry<L>) -> Self {
    Self { inner: Arc::new(Mutex::new(registry)) }
  }

  /// Run `f` with exclusive access to the registry.
  pub fn with<R>(&self, f: impl FnOnce(&mut Registry<L>) -> Result<R>) -> Result<R> {
    let mut guard = self.inner.lock().map_err(|_| Error::Poisoned)?;
    f(&mut *guard)
  }

  pub fn set_oracle(&self, ctx: &CallContext, candidate: Principal) -> Result<()> {
    self.with(|r| r.set_oracle(ctx, candidate))
  }

  pub fn store_path(
    &self,
    ctx: &CallContext,
    owner: &Principal,
    draft: PathDraft,
  ) -> Result<PathId> {
    self.with(|r| r.store_path(ctx, owner, draft))
  }

  pub fn update_path(
    &self,
    ctx: &CallContext,
    owner: &Principal,
    path_id: PathId,
    draft: PathDraft,
  ) -> Result<()> {
    self.with(|r| r.update_path(ctx, owner, path_id, draft))
  }

  pub fn deactivate_path(
    &self,
    ctx: &CallContext,
    owner: &Principal,
    path_id: PathId,
  ) -> Result<()> {
    self.with(|r| r.deactivate_path(ctx, owner, path_id))
  }

  pub fn get_path(&self, owner: &Principal, path_id: PathId) -> Result<Option<PathRecord>> {
    self.with(|r| r.get_path(owner, path_id))
  }

  pub fn get_path_update(
    &self,
    owner: &Principal,
    path_id: PathId,
  ) -> Result<Option<UpdateRecord>> {
    self.with(|r| r.get_path_update(owner, path_id))
  }

  pub fn get_path_count(&self) -> Result<u64> { self.with(|r| r.get_path_count()) }

  /// Unwrap the registry if this is the last handle and the lock is not
  /// poisoned.
  pub fn try_into_inner(self) -> Option<Registry<L>> {
    Arc::try_unwrap(self.inner).ok()?.into_inner().ok()
  }
}
