//! Path records, the unit stored by the registry.
//!
//! A path is created active, may be rewritten in place by the oracle, and may
//! be deactivated. It is never deleted. Only the most recent rewrite is kept
//! as an [`UpdateRecord`].

use serde::{Deserialize, Serialize};

use crate::{
  config::RegistryConfig,
  error::ErrorKind,
  principal::Principal,
};

// ─── Input ───────────────────────────────────────────────────────────────────

/// The caller-supplied fields of a path, used for both creation and update.
/// `timestamp` and `status` are always set by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathDraft {
  /// Ordered module ids; each must be non-zero.
  pub modules:            Vec<u64>,
  pub metadata:           String,
  pub difficulty:         u32,
  /// Expected time to complete, in seconds.
  pub estimated_duration: u64,
}

impl PathDraft {
  pub fn new(
    modules: impl Into<Vec<u64>>,
    metadata: impl Into<String>,
    difficulty: u32,
    estimated_duration: u64,
  ) -> Self {
    Self {
      modules: modules.into(),
      metadata: metadata.into(),
      difficulty,
      estimated_duration,
    }
  }

  /// Check every field against `config`, reporting the first failure in
  /// this order: module count, module ids, metadata, difficulty, duration.
  pub fn validate(&self, config: &RegistryConfig) -> Result<(), ErrorKind> {
    if self.modules.is_empty() || self.modules.len() > config.max_modules {
      return Err(ErrorKind::InvalidModuleCount);
    }
    if self.modules.contains(&0) {
      return Err(ErrorKind::InvalidModuleId);
    }
    // Character count, not bytes.
    if self.metadata.chars().count() > config.max_metadata_chars {
      return Err(ErrorKind::InvalidMetadata);
    }
    if !(config.min_difficulty..=config.max_difficulty).contains(&self.difficulty)
    {
      return Err(ErrorKind::InvalidDifficulty);
    }
    if self.estimated_duration == 0 {
      return Err(ErrorKind::InvalidDuration);
    }
    Ok(())
  }
}

// ─── Stored record ───────────────────────────────────────────────────────────

/// A stored learning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
  pub modules:            Vec<u64>,
  pub metadata:           String,
  pub difficulty:         u32,
  pub estimated_duration: u64,
  /// Block height of the last creation or update. Deactivation leaves it.
  pub timestamp:          u64,
  /// `true` while active. Nothing sets it back once cleared.
  pub status:             bool,
}

impl PathRecord {
  /// A fresh, active record.
  pub fn create(draft: PathDraft, block_height: u64) -> Self {
    Self {
      modules:            draft.modules,
      metadata:           draft.metadata,
      difficulty:         draft.difficulty,
      estimated_duration: draft.estimated_duration,
      timestamp:          block_height,
      status:             true,
    }
  }

  /// The record after rewriting its fields with `draft`; `status` carries
  /// over unchanged.
  pub fn rewritten(&self, draft: PathDraft, block_height: u64) -> Self {
    Self {
      status: self.status,
      ..Self::create(draft, block_height)
    }
  }

  pub fn is_active(&self) -> bool { self.status }
}

// ─── Update record ───────────────────────────────────────────────────────────

/// The last rewrite applied to a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
  pub updated_modules:    Vec<u64>,
  pub updated_metadata:   String,
  pub updated_difficulty: u32,
  pub updated_duration:   u64,
  pub update_timestamp:   u64,
  pub updater:            Principal,
}

impl UpdateRecord {
  pub fn from_draft(draft: PathDraft, block_height: u64, updater: Principal) -> Self {
    Self {
      updated_modules:    draft.modules,
      updated_metadata:   draft.metadata,
      updated_difficulty: draft.difficulty,
      updated_duration:   draft.estimated_duration,
      update_timestamp:   block_height,
      updater,
    }
  }
}
