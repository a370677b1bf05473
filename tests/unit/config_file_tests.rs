//! Unit tests for configuration overrides

use crate::fixtures::write_file_sync;
use portal_pack::io::config_file::{ConfigOverrides, load_overrides};
use portal_pack::{CompressionLevel, RunConfiguration};
use std::time::Duration;
use tempfile::TempDir;

fn base_config() -> RunConfiguration {
    RunConfiguration::new("static", "out.zip").expect("absolute paths")
}

#[test]
fn test_defaults() {
    let config = base_config();
    assert!(config.source_dir.is_absolute());
    assert!(config.output_path.is_absolute());
    assert_eq!(config.level, CompressionLevel::Best);
    assert!(config.overwrite);
    assert_eq!(config.max_file_size, 100 * 1024 * 1024);
    assert_eq!(config.retry_attempts, 3);
    assert_eq!(config.retry_delay, Duration::from_millis(1000));
    assert!(config.exclude_patterns.contains(&"*.log".to_string()));
}

#[test]
fn test_load_and_apply_camel_case_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    write_file_sync(
        &path,
        br#"{
            "compressionLevel": "fast",
            "excludePatterns": ["*.map"],
            "maxFileSize": 2048,
            "retryAttempts": 5,
            "retryDelay": 250,
            "overwrite": false,
            "animationSpeed": 100
        }"#,
    )
    .unwrap();

    let overrides = load_overrides(&path).expect("valid config");
    let mut config = base_config();
    let warnings = overrides.apply(&mut config);

    assert!(warnings.is_empty());
    assert_eq!(config.level, CompressionLevel::Fast);
    assert_eq!(config.exclude_patterns, vec!["*.map".to_string()]);
    assert_eq!(config.max_file_size, 2048);
    assert_eq!(config.retry_attempts, 5);
    assert_eq!(config.retry_delay, Duration::from_millis(250));
    assert!(!config.overwrite);
}

#[test]
fn test_partial_overrides_keep_defaults() {
    let overrides: ConfigOverrides = serde_json::from_str(r#"{ "overwrite": false }"#).unwrap();
    let mut config = base_config();
    overrides.apply(&mut config);

    assert!(!config.overwrite);
    assert_eq!(config.level, CompressionLevel::Best);
    assert_eq!(config.exclude_patterns.len(), 7);
}

#[test]
fn test_unknown_level_and_zero_attempts_are_adjusted() {
    let overrides: ConfigOverrides =
        serde_json::from_str(r#"{ "compressionLevel": "ultra", "retryAttempts": 0 }"#).unwrap();
    let mut config = base_config();
    config.level = CompressionLevel::Store;
    let warnings = overrides.apply(&mut config);

    assert_eq!(config.level, CompressionLevel::Best);
    assert_eq!(config.retry_attempts, 1);
    assert_eq!(warnings.len(), 2);
}

#[test]
fn test_missing_and_malformed_files_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_overrides(temp_dir.path().join("absent.json")).is_err());

    let bad = temp_dir.path().join("bad.json");
    write_file_sync(&bad, b"{ \"overwrite\": ").unwrap();
    let err = load_overrides(&bad).expect_err("malformed json");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
