//! SQL schema for the registry ledger.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema version; files from a newer version are refused.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS` and `OR IGNORE`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Unsigned 64-bit values (ids, durations, block heights) are stored as their
-- two's-complement INTEGER: anything above 9223372036854775807 reads back
-- negative in raw SQL but decodes exactly.

-- Exactly one row: the registry-wide counter and the write-once oracle.
CREATE TABLE IF NOT EXISTS registry (
    id           INTEGER PRIMARY KEY CHECK (id = 0),
    next_path_id INTEGER NOT NULL,
    oracle       TEXT
);

INSERT OR IGNORE INTO registry (id, next_path_id, oracle) VALUES (0, 0, NULL);

-- Rows are inserted or rewritten in place; never deleted.
CREATE TABLE IF NOT EXISTS paths (
    owner              TEXT    NOT NULL,
    path_id            INTEGER NOT NULL,
    modules            TEXT    NOT NULL,   -- JSON array of module ids
    metadata           TEXT    NOT NULL,
    difficulty         INTEGER NOT NULL,
    estimated_duration INTEGER NOT NULL,
    timestamp          INTEGER NOT NULL,   -- block height of last write
    status             INTEGER NOT NULL,   -- 1 active, 0 deactivated
    PRIMARY KEY (owner, path_id)
);

-- Latest update only; overwritten on every update.
CREATE TABLE IF NOT EXISTS path_updates (
    owner              TEXT    NOT NULL,
    path_id            INTEGER NOT NULL,
    updated_modules    TEXT    NOT NULL,
    updated_metadata   TEXT    NOT NULL,
    updated_difficulty INTEGER NOT NULL,
    updated_duration   INTEGER NOT NULL,
    update_timestamp   INTEGER NOT NULL,
    updater            TEXT    NOT NULL,
    PRIMARY KEY (owner, path_id),
    FOREIGN KEY (owner, path_id) REFERENCES paths(owner, path_id)
);

PRAGMA user_version = 1;
";
