//! Environment overrides for AdminConfig
//!
//! Kept in its own test binary: it sets process-wide `BEACON_*` variables
//! that would leak into the file-based config tests.

use beacon_sdk::{AdminConfig, StorageConfig};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_environment_overrides_file_and_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("beacon.toml"),
        "provider_timeout_ms = 1500\nlog_level = \"warn\"\n",
    )
    .unwrap();

    std::env::set_var("BEACON_PROVIDER_TIMEOUT_MS", "2500");
    std::env::set_var("BEACON_STORAGE__TYPE", "file");
    std::env::set_var("BEACON_STORAGE__PATH", "/tmp/beacon-env.json");

    let stem = dir.path().join("beacon");
    let loaded = AdminConfig::load_from(stem.to_str().unwrap());

    std::env::remove_var("BEACON_PROVIDER_TIMEOUT_MS");
    std::env::remove_var("BEACON_STORAGE__TYPE");
    std::env::remove_var("BEACON_STORAGE__PATH");

    let config = loaded.unwrap();
    assert_eq!(config.provider_timeout(), Duration::from_millis(2500));
    assert_eq!(config.storage, StorageConfig::file("/tmp/beacon-env.json"));
    // file value survives where the environment is silent
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.persistence_timeout_ms, 5_000);
}
