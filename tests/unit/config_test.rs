//! Tests for configuration loading and data directory resolution

use std::fs;
use std::path::Path;

use docverify::config::{AppConfig, ScoringStrategy, StorageBackend, default_config_toml};
use docverify::paths;
use serial_test::serial;
use tempfile::TempDir;

/// Point `DOCVERIFY_HOME` at `dir` for the duration of `f`
fn with_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var_os(paths::HOME_ENV);
    // SAFETY: callers are #[serial], so no other test touches the environment concurrently
    unsafe { std::env::set_var(paths::HOME_ENV, dir) };
    let result = f();
    match previous {
        Some(value) => unsafe { std::env::set_var(paths::HOME_ENV, value) },
        None => unsafe { std::env::remove_var(paths::HOME_ENV) },
    }
    result
}

// =============================================================================
// PATHS
// =============================================================================

#[test]
#[serial]
fn data_dir_follows_env() {
    let dir = TempDir::new().unwrap();
    with_home(dir.path(), || {
        assert_eq!(paths::data_dir(), dir.path());
        assert_eq!(paths::config_file(), dir.path().join("docverify.toml"));
        assert_eq!(paths::default_store_file(), dir.path().join("store.json"));
        assert_eq!(paths::resolve(Path::new("other.json")), dir.path().join("other.json"));
    });
}

#[test]
#[serial]
fn absolute_paths_are_not_rebased() {
    let dir = TempDir::new().unwrap();
    let absolute = dir.path().join("elsewhere.json");
    with_home(dir.path(), || {
        assert_eq!(paths::resolve(&absolute), absolute);
    });
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("docverify.toml");
    fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid configuration"));
}

#[test]
fn full_file_is_parsed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("docverify.toml");
    fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 9000

[storage]
backend = "memory"

[scoring]
strategy = "fixed"
fixed_score = 77
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.scoring.strategy, ScoringStrategy::Fixed);
    assert_eq!(config.scoring.fixed_score, 77);
    assert_eq!(config.workflow().scorer_name(), "fixed");
}

#[test]
#[serial]
fn default_config_round_trips_through_load() {
    let dir = TempDir::new().unwrap();
    with_home(dir.path(), || {
        fs::write(paths::config_file(), default_config_toml()).unwrap();
        let config = AppConfig::load().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.store_path(), dir.path().join("store.json"));
    });
}

#[test]
fn backend_names_parse() {
    assert_eq!("json".parse::<StorageBackend>().unwrap(), StorageBackend::File);
    assert_eq!("MEMORY".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
    assert!("sqlite".parse::<StorageBackend>().is_err());
}
