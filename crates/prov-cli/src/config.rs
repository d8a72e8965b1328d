//! `provctl.toml` configuration.
//!
//! Resolution order for the ledger path, highest first: the `--ledger` flag,
//! the `PROVCTL_LEDGER` environment variable, `ledger.path` in the config
//! file, then the built-in default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "provctl.toml";
pub const LEDGER_ENV: &str = "PROVCTL_LEDGER";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Path of the JSON ledger snapshot.
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ledger.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse configuration")
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `provctl.toml` in the
    /// working directory is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Apply the environment override for the ledger path.
    pub fn apply_env(&mut self, env_ledger: Option<String>) {
        if let Some(path) = env_ledger.filter(|p| !p.is_empty()) {
            self.ledger.path = PathBuf::from(path);
        }
    }

    pub fn ledger_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .unwrap_or_else(|| self.ledger.path.clone())
    }
}
