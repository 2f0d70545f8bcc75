//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::LogLevel;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_henotace_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, henotace_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "http://localhost:8000"
retries = 0

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.api.retries, 0);
    assert_eq!(config.logging.level, LogLevel::Debug);
    // Defaults preserved
    assert_eq!(config.api.timeout_secs, 30);
    assert!(config.logging.enabled);
    assert_eq!(config.tutor.compression.checkpoint_every, 5);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, henotace_common::ConfigError::ParseError(_)));
}

#[test]
fn out_of_range_values_are_still_returned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nretries = 99\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.retries, 99);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("henotace").join("config.toml");

    assert!(create_default_config(&path).unwrap());
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, crate::schema::DEFAULT_BASE_URL);
    assert_eq!(config.tutor.language, "en");
}

#[test]
fn create_default_config_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nretries = 1\n").unwrap();

    assert!(!create_default_config(&path).unwrap());
    assert_eq!(load_from_path(&path).unwrap().api.retries, 1);
}

#[test]
fn default_template_never_mentions_a_key_value() {
    let template = template::default_config_toml();
    assert!(!template.contains("api_key ="));
    let parsed: crate::schema::HenotaceConfig = toml::from_str(template).unwrap();
    assert_eq!(parsed.api.retries, 2);
}

#[test]
fn default_config_path_ends_with_henotace_config() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("henotace/config.toml"));
    }
}
