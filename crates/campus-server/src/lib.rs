//! Configuration and wiring for the Campus server binary.

use std::path::{Path, PathBuf};

use campus_core::{document::Fields, model::Model, resource::Resource};
use campus_identity::IdentityConfig;
use serde::Deserialize;
use serde_json::Value;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 3000 }

/// Runtime server configuration, deserialised from `config.toml` and the
/// `CAMPUS_*` environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:     String,
  #[serde(default = "default_port")]
  pub port:     u16,
  #[serde(default)]
  pub store:    StoreConfig,
  pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  #[default]
  Sqlite,
  Memory,
}

fn default_store_path() -> PathBuf { PathBuf::from("campus.db") }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  #[serde(default)]
  pub backend: Backend,
  /// Database file for the SQLite backend. A leading `~` is expanded.
  #[serde(default = "default_store_path")]
  pub path:    PathBuf,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      backend: Backend::default(),
      path:    default_store_path(),
    }
  }
}

/// Layer the TOML file at `path` (optional) under the `CAMPUS_*` environment.
///
/// Nested keys use `__`: `CAMPUS_IDENTITY__API_KEY` sets `identity.api_key`.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("CAMPUS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Seed data ────────────────────────────────────────────────────────────────

/// The four demo models loaded by `--seed-models`, in id order.
pub fn demo_models() -> campus_core::Result<Vec<Fields>> {
  (1..=4)
    .map(|n| {
      Model {
        url:     Some(Value::from(format!("model{n}.url"))),
        label:   Some(Value::from(format!("Model {n}"))),
        visible: Some(Value::Bool(n != 2)),
      }
      .to_fields()
    })
    .collect()
}
