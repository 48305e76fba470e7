//! The SQLite implementation of [`Ledger`].

use std::path::Path;

use pathreg_core::{
  Ledger, LedgerWrite, PathId, PathKey, PathRecord, Principal, UpdateRecord,
};
use rusqlite::{Connection, OptionalExtension as _};

use crate::{
  Error, Result,
  encode::{RawPath, RawUpdate, decode_u64, encode_modules, encode_u64},
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Registry state stored in a single SQLite file.
///
/// Each [`Ledger::commit`] runs in one transaction.
pub struct SqliteLedger {
  conn: Connection,
}

impl SqliteLedger {
  /// Open (or create) a ledger at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    tracing::debug!(path = %path.display(), "opened sqlite ledger");
    Self::init(conn)
  }

  /// Open an in-memory ledger. Useful for testing.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    let found: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if found > SCHEMA_VERSION {
      return Err(Error::UnsupportedSchema { found, supported: SCHEMA_VERSION });
    }
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  fn apply(tx: &rusqlite::Transaction<'_>, write: LedgerWrite) -> Result<()> {
    match write {
      LedgerWrite::SetOracle(oracle) => {
        tx.execute(
          "UPDATE registry SET oracle = ?1 WHERE id = 0",
          rusqlite::params![oracle.as_str()],
        )?;
      }
      LedgerWrite::SetNextPathId(id) => {
        tx.execute(
          "UPDATE registry SET next_path_id = ?1 WHERE id = 0",
          rusqlite::params![encode_u64(id)],
        )?;
      }
      LedgerWrite::PutPath(key, record) => {
        tx.execute(
          "INSERT INTO paths (
             owner, path_id, modules, metadata, difficulty,
             estimated_duration, timestamp, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT (owner, path_id) DO UPDATE SET
             modules            = excluded.modules,
             metadata           = excluded.metadata,
             difficulty         = excluded.difficulty,
             estimated_duration = excluded.estimated_duration,
             timestamp          = excluded.timestamp,
             status             = excluded.status",
          rusqlite::params![
            key.owner.as_str(),
            encode_u64(key.path_id),
            encode_modules(&record.modules)?,
            record.metadata,
            i64::from(record.difficulty),
            encode_u64(record.estimated_duration),
            encode_u64(record.timestamp),
            record.status,
          ],
        )?;
      }
      LedgerWrite::PutUpdate(key, update) => {
        tx.execute(
          "INSERT INTO path_updates (
             owner, path_id, updated_modules, updated_metadata,
             updated_difficulty, updated_duration, update_timestamp, updater
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT (owner, path_id) DO UPDATE SET
             updated_modules    = excluded.updated_modules,
             updated_metadata   = excluded.updated_metadata,
             updated_difficulty = excluded.updated_difficulty,
             updated_duration   = excluded.updated_duration,
             update_timestamp   = excluded.update_timestamp,
             updater            = excluded.updater",
          rusqlite::params![
            key.owner.as_str(),
            encode_u64(key.path_id),
            encode_modules(&update.updated_modules)?,
            update.updated_metadata,
            i64::from(update.updated_difficulty),
            encode_u64(update.updated_duration),
            encode_u64(update.update_timestamp),
            update.updater.as_str(),
          ],
        )?;
      }
    }
    Ok(())
  }
}

// ─── Ledger impl ─────────────────────────────────────────────────────────────

impl Ledger for SqliteLedger {
  type Error = Error;

  fn next_path_id(&self) -> Result<PathId> {
    let raw: i64 = self.conn.query_row(
      "SELECT next_path_id FROM registry WHERE id = 0",
      [],
      |r| r.get(0),
    )?;
    Ok(decode_u64(raw))
  }

  fn oracle(&self) -> Result<Option<Principal>> {
    let raw: Option<String> =
      self
        .conn
        .query_row("SELECT oracle FROM registry WHERE id = 0", [], |r| r.get(0))?;
    Ok(raw.map(Principal::new))
  }

  fn path(&self, key: &PathKey) -> Result<Option<PathRecord>> {
    let raw: Option<RawPath> = self
      .conn
      .query_row(
        "SELECT modules, metadata, difficulty, estimated_duration, timestamp, status
         FROM paths WHERE owner = ?1 AND path_id = ?2",
        rusqlite::params![key.owner.as_str(), encode_u64(key.path_id)],
        |row| {
          Ok(RawPath {
            modules:            row.get(0)?,
            metadata:           row.get(1)?,
            difficulty:         row.get(2)?,
            estimated_duration: row.get(3)?,
            timestamp:          row.get(4)?,
            status:             row.get(5)?,
          })
        },
      )
      .optional()?;

    raw.map(RawPath::into_record).transpose()
  }

  fn path_update(&self, key: &PathKey) -> Result<Option<UpdateRecord>> {
    let raw: Option<RawUpdate> = self
      .conn
      .query_row(
        "SELECT updated_modules, updated_metadata, updated_difficulty,
                updated_duration, update_timestamp, updater
         FROM path_updates WHERE owner = ?1 AND path_id = ?2",
        rusqlite::params![key.owner.as_str(), encode_u64(key.path_id)],
        |row| {
          Ok(RawUpdate {
            updated_modules:    row.get(0)?,
            updated_metadata:   row.get(1)?,
            updated_difficulty: row.get(2)?,
            updated_duration:   row.get(3)?,
            update_timestamp:   row.get(4)?,
            updater:            row.get(5)?,
          })
        },
      )
      .optional()?;

    raw.map(RawUpdate::into_update).transpose()
  }

  fn contains_path(&self, key: &PathKey) -> Result<bool> {
    Ok(
      self
        .conn
        .query_row(
          "SELECT 1 FROM paths WHERE owner = ?1 AND path_id = ?2",
          rusqlite::params![key.owner.as_str(), encode_u64(key.path_id)],
          |_| Ok(true),
        )
        .optional()?
        .unwrap_or(false),
    )
  }

  fn commit(&mut self, writes: Vec<LedgerWrite>) -> Result<()> {
    let count = writes.len();
    // Dropping the transaction on an early return rolls it back.
    let tx = self.conn.transaction()?;
    for write in writes {
      Self::apply(&tx, write)?;
    }
    tx.commit()?;
    tracing::trace!(writes = count, "ledger commit");
    Ok(())
  }
}
