//! Runtime configuration
//!
//! Settings are read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::{Error, Result};

pub const DATA_DIR_VAR: &str = "TODO_SYNC_DATA_DIR";
pub const REMOTE_LATENCY_VAR: &str = "TODO_SYNC_REMOTE_LATENCY_MS";
pub const SEED_REMOTE_VAR: &str = "TODO_SYNC_SEED_REMOTE";

const DEFAULT_DATA_DIR: &str = ".todo-sync";
const DEFAULT_REMOTE_LATENCY_MS: u64 = 5000;

/// Settings for wiring a repository to its data sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Directory holding the local store
    pub data_dir: PathBuf,
    /// Delay applied to every read from the simulated remote backend
    pub remote_latency: Duration,
    /// Whether the simulated remote backend starts with sample tasks
    pub seed_remote: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            remote_latency: Duration::from_millis(DEFAULT_REMOTE_LATENCY_MS),
            seed_remote: true,
        }
    }
}

impl SyncConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let remote_latency = match lookup(REMOTE_LATENCY_VAR) {
            Some(value) => {
                let millis = value.trim().parse::<u64>().map_err(|_| {
                    Error::InvalidInput(format!(
                        "{} must be a whole number of milliseconds, got '{}'",
                        REMOTE_LATENCY_VAR, value
                    ))
                })?;
                Duration::from_millis(millis)
            }
            None => defaults.remote_latency,
        };

        let seed_remote = match lookup(SEED_REMOTE_VAR) {
            Some(value) => parse_flag(SEED_REMOTE_VAR, &value)?,
            None => defaults.seed_remote,
        };

        Ok(Self {
            data_dir,
            remote_latency,
            seed_remote,
        })
    }

    /// Path of the local task store file
    pub fn local_store_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(Error::InvalidInput(format!(
            "{} must be true or false, got '{}'",
            name, value
        ))),
    }
}
