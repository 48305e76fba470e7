//! Core types and state machine for the learning path registry.
//!
//! The registry stores learning paths keyed by `(owner, path_id)` on behalf of
//! a single oracle. Storage is abstracted behind [`Ledger`]; this crate ships
//! the in-memory [`MemoryLedger`] and depends on no database.

pub mod config;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod path;
pub mod principal;
pub mod registry;
pub mod shared;

pub use config::RegistryConfig;
pub use error::{Error, ErrorKind, Result};
pub use ledger::{Ledger, LedgerWrite};
pub use memory::MemoryLedger;
pub use path::{PathDraft, PathRecord, UpdateRecord};
pub use principal::{CallContext, PathId, PathKey, Principal};
pub use registry::Registry;
pub use shared::SharedRegistry;
