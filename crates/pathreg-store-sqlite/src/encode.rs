//! Encoding and decoding helpers between registry types and SQLite columns.
//!
//! Unsigned integers are stored as their two's-complement `i64`, which
//! round-trips every `u64` exactly. Module lists are compact JSON arrays.

use pathreg_core::{PathRecord, Principal, UpdateRecord};

use crate::{Error, Result};

// ─── Integers ────────────────────────────────────────────────────────────────

pub fn encode_u64(v: u64) -> i64 { v as i64 }

pub fn decode_u64(v: i64) -> u64 { v as u64 }

pub fn decode_u32(column: &str, v: i64) -> Result<u32> {
  u32::try_from(v).map_err(|_| Error::Corrupt(format!("{column} out of range: {v}")))
}

// ─── Modules ─────────────────────────────────────────────────────────────────

pub fn encode_modules(modules: &[u64]) -> Result<String> {
  Ok(serde_json::to_string(modules)?)
}

pub fn decode_modules(s: &str) -> Result<Vec<u64>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `paths` row.
pub struct RawPath {
  pub modules:            String,
  pub metadata:           String,
  pub difficulty:         i64,
  pub estimated_duration: i64,
  pub timestamp:          i64,
  pub status:             bool,
}

impl RawPath {
  pub fn into_record(self) -> Result<PathRecord> {
    Ok(PathRecord {
      modules:            decode_modules(&self.modules)?,
      metadata:           self.metadata,
      difficulty:         decode_u32("difficulty", self.difficulty)?,
      estimated_duration: decode_u64(self.estimated_duration),
      timestamp:          decode_u64(self.timestamp),
      status:             self.status,
    })
  }
}

/// Raw values read directly from a `path_updates` row.
pub struct RawUpdate {
  pub updated_modules:    String,
  pub updated_metadata:   String,
  pub updated_difficulty: i64,
  pub updated_duration:   i64,
  pub update_timestamp:   i64,
  pub updater:            String,
}

impl RawUpdate {
  pub fn into_update(self) -> Result<UpdateRecord> {
    Ok(UpdateRecord {
      updated_modules:    decode_modules(&self.updated_modules)?,
      updated_metadata:   self.updated_metadata,
      updated_difficulty: decode_u32("updated_difficulty", self.updated_difficulty)?,
      updated_duration:   decode_u64(self.updated_duration),
      update_timestamp:   decode_u64(self.update_timestamp),
      updater:            Principal::new(self.updater),
    })
  }
}
