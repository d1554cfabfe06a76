//! Integration tests for configuration loading.

use pretty_assertions::assert_eq;
use schema_pilot::config::{Config, ENV_EXPORT_DIR, ENV_LATENCY_MS};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from_file(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.generation.latency_ms, 1500);
}

#[test]
fn test_file_then_environment_precedence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[generation]
latency_ms = 300

[display]
queries = false

[export]
directory = "/srv/schemas"
"#,
    )
    .unwrap();

    let mut config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.generation.latency_ms, 300);
    assert!(config.display.diagram);
    assert!(!config.display.queries);

    config
        .apply_overrides_from(|key| match key {
            k if k == ENV_LATENCY_MS => Some("25".to_string()),
            k if k == ENV_EXPORT_DIR => Some("/tmp/out".to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(config.generation.latency_ms, 25);
    assert_eq!(config.export.directory, PathBuf::from("/tmp/out"));
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[generation]\nlatency_ms = \"slow\"\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert_eq!(err.category(), "Configuration Error");
}
