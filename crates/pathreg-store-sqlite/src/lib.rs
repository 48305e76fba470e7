//! SQLite backend for the learning path registry.
//!
//! [`SqliteLedger`] implements [`pathreg_core::Ledger`] over a single
//! `rusqlite` connection. Plug it into a [`pathreg_core::Registry`] for state
//! that survives restarts.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteLedger;
