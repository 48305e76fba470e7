//! Registry configuration.
//!
//! Loaded from an optional TOML file layered under `PATHREG_*` environment
//! variables, e.g. `PATHREG_ADMIN=ST1ADMIN PATHREG_MAX_PATHS=500`.

use std::path::Path;

use config::ConfigError;
use serde::{Deserialize, Serialize};

use crate::{Result, principal::Principal};

/// The burn address no path may be owned by.
pub const DEFAULT_RESERVED_OWNER: &str = "SP000000000000000000002Q6VF78";

pub const DEFAULT_MAX_PATHS: u64 = 10_000;
pub const DEFAULT_MAX_MODULES: usize = 50;
pub const DEFAULT_MAX_METADATA_CHARS: usize = 256;

/// Limits and privileged identities for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
  /// The only identity allowed to register the oracle.
  pub admin:              Principal,
  #[serde(default = "default_reserved_owner")]
  pub reserved_owner:     Principal,
  #[serde(default = "default_max_paths")]
  pub max_paths:          u64,
  #[serde(default = "default_max_modules")]
  pub max_modules:        usize,
  #[serde(default = "default_max_metadata_chars")]
  pub max_metadata_chars: usize,
  #[serde(default = "default_min_difficulty")]
  pub min_difficulty:     u32,
  #[serde(default = "default_max_difficulty")]
  pub max_difficulty:     u32,
}

fn default_reserved_owner() -> Principal { Principal::new(DEFAULT_RESERVED_OWNER) }
fn default_max_paths() -> u64 { DEFAULT_MAX_PATHS }
fn default_max_modules() -> usize { DEFAULT_MAX_MODULES }
fn default_max_metadata_chars() -> usize { DEFAULT_MAX_METADATA_CHARS }
fn default_min_difficulty() -> u32 { 1 }
fn default_max_difficulty() -> u32 { 10 }

impl RegistryConfig {
  /// Default limits with `admin` as the administrator.
  pub fn new(admin: impl Into<Principal>) -> Self {
    Self {
      admin:              admin.into(),
      reserved_owner:     default_reserved_owner(),
      max_paths:          default_max_paths(),
      max_modules:        default_max_modules(),
      max_metadata_chars: default_max_metadata_chars(),
      min_difficulty:     default_min_difficulty(),
      max_difficulty:     default_max_difficulty(),
    }
  }

  pub fn with_max_paths(mut self, max_paths: u64) -> Self {
    self.max_paths = max_paths;
    self
  }

  /// Read `path` (if it exists) and `PATHREG_*` variables, then validate.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
      builder = builder.add_source(
        config::File::from(path)
          .format(config::FileFormat::Toml)
          .required(false),
      );
    }
    let settings = builder
      .add_source(config::Environment::with_prefix("PATHREG").try_parsing(true))
      .build()?;

    let cfg: Self = settings.try_deserialize()?;
    cfg.validate()?;
    tracing::debug!(admin = %cfg.admin, max_paths = cfg.max_paths, "loaded registry config");
    Ok(cfg)
  }

  /// Reject limits no draft could ever satisfy.
  pub fn validate(&self) -> Result<()> {
    if self.max_modules == 0 {
      return Err(ConfigError::Message("max_modules must be at least 1".into()).into());
    }
    if self.min_difficulty == 0 || self.min_difficulty > self.max_difficulty {
      return Err(
        ConfigError::Message(format!(
          "difficulty range {}..={} is empty or includes zero",
          self.min_difficulty, self.max_difficulty
        ))
        .into(),
      );
    }
    if self.admin == self.reserved_owner {
      return Err(ConfigError::Message("admin cannot be the reserved owner".into()).into());
    }
    Ok(())
  }
}
