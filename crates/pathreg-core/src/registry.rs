//! The registry state machine over a [`Ledger`].
//!
//! Every mutating call runs its checks against the ledger first, in a fixed
//! order, and only then commits. A rejected call leaves the ledger untouched.

use crate::{
  Error, Result,
  config::RegistryConfig,
  error::ErrorKind,
  ledger::{Ledger, LedgerWrite},
  path::{PathDraft, PathRecord, UpdateRecord},
  principal::{CallContext, PathId, PathKey, Principal},
};

/// The learning path registry.
#[derive(Debug)]
pub struct Registry<L> {
  ledger: L,
  config: RegistryConfig,
}

impl<L: Ledger> Registry<L> {
  pub fn new(ledger: L, config: RegistryConfig) -> Self { Self { ledger, config } }

  pub fn config(&self) -> &RegistryConfig { &self.config }

  pub fn ledger(&self) -> &L { &self.ledger }

  pub fn into_ledger(self) -> L { self.ledger }

  // ── Oracle ────────────────────────────────────────────────────────────

  /// Register `candidate` as the oracle. Only the configured admin may call
  /// this, and only once.
  pub fn set_oracle(&mut self, ctx: &CallContext, candidate: Principal) -> Result<()> {
    let writes = self
      .plan_set_oracle(ctx, &candidate)
      .inspect_err(|e| log_rejection("set_oracle", ctx, e))?;
    self.commit(writes)?;
    tracing::info!(oracle = %candidate, block_height = ctx.block_height, "oracle registered");
    Ok(())
  }

  fn plan_set_oracle(
    &self,
    ctx: &CallContext,
    candidate: &Principal,
  ) -> Result<Vec<LedgerWrite>> {
    if ctx.caller != self.config.admin {
      return Err(ErrorKind::NotAuthorized.into());
    }
    if self.oracle()?.is_some() {
      return Err(ErrorKind::InvalidOracle.into());
    }
    if *candidate == self.config.reserved_owner {
      return Err(ErrorKind::InvalidOracle.into());
    }
    Ok(vec![LedgerWrite::SetOracle(candidate.clone())])
  }

  // ── Paths ─────────────────────────────────────────────────────────────

  /// Create a path for `owner` and return its id.
  ///
  /// Checks run in this order and the first failure is reported: capacity,
  /// oracle authorization, reserved owner, then the draft's own fields
  /// (see [`PathDraft::validate`]), then key uniqueness.
  pub fn store_path(
    &mut self,
    ctx: &CallContext,
    owner: &Principal,
    draft: PathDraft,
  ) -> Result<PathId> {
    let (path_id, writes) = self
      .plan_store(ctx, owner, draft)
      .inspect_err(|e| log_rejection("store_path", ctx, e))?;
    self.commit(writes)?;
    tracing::info!(%owner, path_id, block_height = ctx.block_height, "path stored");
    Ok(path_id)
  }

  fn plan_store(
    &self,
    ctx: &CallContext,
    owner: &Principal,
    draft: PathDraft,
  ) -> Result<(PathId, Vec<LedgerWrite>)> {
    let path_id = self.ledger.next_path_id().map_err(Error::ledger)?;
    if path_id >= self.config.max_paths {
      return Err(ErrorKind::MaxPathsExceeded.into());
    }
    self.require_oracle(&ctx.caller)?;
    self.require_owner(owner)?;
    draft.validate(&self.config)?;

    let key = PathKey::new(owner.clone(), path_id);
    if self.ledger.contains_path(&key).map_err(Error::ledger)? {
      return Err(ErrorKind::PathAlreadyExists.into());
    }

    let record = PathRecord::create(draft, ctx.block_height);
    Ok((path_id, vec![
      LedgerWrite::PutPath(key, record),
      LedgerWrite::SetNextPathId(path_id + 1),
    ]))
  }

  /// Rewrite an existing path and record the rewrite as its latest update.
  /// The path's active/inactive status is preserved.
  pub fn update_path(
    &mut self,
    ctx: &CallContext,
    owner: &Principal,
    path_id: PathId,
    draft: PathDraft,
  ) -> Result<()> {
    let writes = self
      .plan_update(ctx, owner, path_id, draft)
      .inspect_err(|e| log_rejection("update_path", ctx, e))?;
    self.commit(writes)?;
    tracing::info!(%owner, path_id, block_height = ctx.block_height, "path updated");
    Ok(())
  }

  fn plan_update(
    &self,
    ctx: &CallContext,
    owner: &Principal,
    path_id: PathId,
    draft: PathDraft,
  ) -> Result<Vec<LedgerWrite>> {
    let key = PathKey::new(owner.clone(), path_id);
    let current = self
      .ledger
      .path(&key)
      .map_err(Error::ledger)?
      .ok_or(ErrorKind::PathNotFound)?;
    self.require_oracle(&ctx.caller)?;
    self.require_owner(owner)?;
    draft.validate(&self.config)?;

    let update = UpdateRecord::from_draft(draft.clone(), ctx.block_height, ctx.caller.clone());
    let record = current.rewritten(draft, ctx.block_height);
    Ok(vec![
      LedgerWrite::PutPath(key.clone(), record),
      LedgerWrite::PutUpdate(key, update),
    ])
  }

  /// Mark a path inactive. Deactivating an inactive path succeeds without
  /// writing anything.
  pub fn deactivate_path(
    &mut self,
    ctx: &CallContext,
    owner: &Principal,
    path_id: PathId,
  ) -> Result<()> {
    let writes = self
      .plan_deactivate(ctx, owner, path_id)
      .inspect_err(|e| log_rejection("deactivate_path", ctx, e))?;
    if writes.is_empty() {
      tracing::debug!(%owner, path_id, "path already inactive");
      return Ok(());
    }
    self.commit(writes)?;
    tracing::info!(%owner, path_id, block_height = ctx.block_height, "path deactivated");
    Ok(())
  }

  fn plan_deactivate(
    &self,
    ctx: &CallContext,
    owner: &Principal,
    path_id: PathId,
  ) -> Result<Vec<LedgerWrite>> {
    let key = PathKey::new(owner.clone(), path_id);
    let current = self
      .ledger
      .path(&key)
      .map_err(Error::ledger)?
      .ok_or(ErrorKind::PathNotFound)?;
    self.require_oracle(&ctx.caller)?;

    if !current.status {
      return Ok(Vec::new());
    }
    Ok(vec![LedgerWrite::PutPath(key, PathRecord { status: false, ..current })])
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  pub fn get_path(&self, owner: &Principal, path_id: PathId) -> Result<Option<PathRecord>> {
    self
      .ledger
      .path(&PathKey::new(owner.clone(), path_id))
      .map_err(Error::ledger)
  }

  pub fn get_path_update(
    &self,
    owner: &Principal,
    path_id: PathId,
  ) -> Result<Option<UpdateRecord>> {
    self
      .ledger
      .path_update(&PathKey::new(owner.clone(), path_id))
      .map_err(Error::ledger)
  }

  /// Total paths ever created, deactivated ones included.
  pub fn get_path_count(&self) -> Result<u64> {
    self.ledger.next_path_id().map_err(Error::ledger)
  }

  pub fn oracle(&self) -> Result<Option<Principal>> {
    self.ledger.oracle().map_err(Error::ledger)
  }

  /// `false` for missing paths as well as deactivated ones.
  pub fn is_active(&self, owner: &Principal, path_id: PathId) -> Result<bool> {
    Ok(self.get_path(owner, path_id)?.is_some_and(|p| p.is_active()))
  }

  /// How many more paths can be created before `MaxPathsExceeded`.
  pub fn remaining_capacity(&self) -> Result<u64> {
    Ok(self.config.max_paths.saturating_sub(self.get_path_count()?))
  }

  // ── Helpers ───────────────────────────────────────────────────────────

  fn require_oracle(&self, caller: &Principal) -> Result<()> {
    match self.oracle()? {
      Some(oracle) if oracle == *caller => Ok(()),
      _ => Err(ErrorKind::NotAuthorized.into()),
    }
  }

  fn require_owner(&self, owner: &Principal) -> Result<()> {
    if *owner == self.config.reserved_owner {
      return Err(ErrorKind::InvalidUser.into());
    }
    Ok(())
  }

  fn commit(&mut self, writes: Vec<LedgerWrite>) -> Result<()> {
    self.ledger.commit(writes).map_err(|e| {
      tracing::error!(error = %e, "ledger commit failed");
      Error::ledger(e)
    })
  }
}

fn log_rejection(op: &'static str, ctx: &CallContext, err: &Error) {
  match err.kind() {
    Some(kind) => tracing::debug!(
      op,
      caller = %ctx.caller,
      kind = kind.as_str(),
      code = kind.code(),
      "call rejected"
    ),
    None => tracing::warn!(op, caller = %ctx.caller, error = %err, "call failed"),
  }
}
