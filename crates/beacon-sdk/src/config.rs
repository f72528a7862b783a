//! Admin console configuration
//!
//! Read from an optional `config/beacon.{toml,json,yaml}` file, then from
//! `BEACON_*` environment variables (nested keys use `__`, for example
//! `BEACON_STORAGE__TYPE=file`). A `.env` file is loaded first if present.

use beacon_repository::{
    Clock, FileStore, IdGenerator, KeyValueStore, MemoryStore, SequenceIdGenerator,
    TimestampIdGenerator, UuidIdGenerator,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

/// Where artifacts are persisted
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process memory; lost on exit
    #[default]
    Memory,
    /// Single JSON document on disk
    File {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
}

fn default_store_path() -> PathBuf {
    PathBuf::from("beacon-store.json")
}

impl StorageConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        StorageConfig::File { path: path.into() }
    }

    pub fn key_value_store(&self) -> Arc<dyn KeyValueStore> {
        match self {
            StorageConfig::Memory => Arc::new(MemoryStore::new()),
            StorageConfig::File { path } => Arc::new(FileStore::new(path)),
        }
    }
}

/// How artifact id tokens are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Timestamp,
    Sequence,
    Uuid,
}

impl IdStrategy {
    pub fn generator(&self, clock: Arc<dyn Clock>) -> Arc<dyn IdGenerator> {
        match self {
            IdStrategy::Timestamp => Arc::new(TimestampIdGenerator::new(clock)),
            IdStrategy::Sequence => Arc::new(SequenceIdGenerator::new()),
            IdStrategy::Uuid => Arc::new(UuidIdGenerator),
        }
    }
}

/// Admin console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub storage: StorageConfig,

    /// Bound on one property provider call
    pub provider_timeout_ms: u64,

    /// Bound on one store read or write
    pub persistence_timeout_ms: u64,

    pub id_strategy: IdStrategy,

    /// Change events buffered per subscriber
    pub notification_capacity: usize,

    /// Log level
    pub log_level: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            provider_timeout_ms: 10_000,
            persistence_timeout_ms: 5_000,
            id_strategy: IdStrategy::default(),
            notification_capacity: 16,
            log_level: "info".to_string(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from `.env`, `config/beacon` and the environment
    pub fn load() -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();
        Self::load_from("config/beacon")
    }

    /// Load from the given file stem (extension optional) plus the environment
    pub fn load_from(file: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("BEACON")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let loaded: AdminConfig = cfg.try_deserialize()?;
        tracing::debug!(?loaded, "configuration loaded");
        Ok(loaded)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    pub fn persistence_timeout(&self) -> Duration {
        Duration::from_millis(self.persistence_timeout_ms)
    }

    /// `EnvFilter` directive enabling `log_level` for the beacon crates
    pub fn log_filter(&self) -> String {
        let level = self.log_level.trim();
        let level = if level.is_empty() { "info" } else { level };
        ["beacon_sdk", "beacon_runtime", "beacon_repository"]
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect::<Vec<_>>()
            .join(",")
    }
}
