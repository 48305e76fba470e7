//! Identities and the call context supplied by the hosting environment.
//!
//! Principals are opaque. The registry only ever compares them for equality;
//! format validation is the host's concern.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequential identifier assigned to a path at creation.
pub type PathId = u64;

/// An opaque caller or owner identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
  pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Principal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for Principal {
  fn from(value: &str) -> Self { Self::new(value) }
}

impl From<String> for Principal {
  fn from(value: String) -> Self { Self(value) }
}

/// The composite identity of a stored path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathKey {
  pub owner:   Principal,
  pub path_id: PathId,
}

impl PathKey {
  pub fn new(owner: Principal, path_id: PathId) -> Self {
    Self { owner, path_id }
  }
}

impl fmt::Display for PathKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.owner, self.path_id)
  }
}

/// Who is calling and at what block height.
///
/// Supplied per call by the host. Block heights are expected to be
/// non-decreasing across calls; the registry records them as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
  pub caller:       Principal,
  pub block_height: u64,
}

impl CallContext {
  pub fn new(caller: impl Into<Principal>, block_height: u64) -> Self {
    Self { caller: caller.into(), block_height }
  }
}
