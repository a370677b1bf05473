//! Integration tests for the command-line binary

use crate::fixtures::{archive_contents, create_portal_fixture, write_file_sync};
use std::process::Command;
use tempfile::TempDir;

fn portal_pack() -> Command {
    Command::new(env!("CARGO_BIN_EXE_portal-pack"))
}

#[test]
fn test_usage_with_missing_arguments() {
    let output = portal_pack()
        .arg("only-source")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"));
    assert!(stdout.contains("COMPRESSION_LEVEL"));
}

#[test]
fn test_successful_run_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_portal_fixture(temp_dir.path()).unwrap();
    let output_path = temp_dir.path().join("portal.zip");

    let output = portal_pack()
        .arg(&source)
        .arg(&output_path)
        .arg("fast")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("COMPRESSION REPORT"));
    assert!(stdout.contains("Compression level: fast (1)"));

    // Default exclusions drop b.log
    let contents = archive_contents(&output_path);
    assert_eq!(contents.len(), 2);
    assert!(!contents.contains_key("b.log"));
}

#[test]
fn test_invalid_level_lists_accepted_values() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_portal_fixture(temp_dir.path()).unwrap();
    let output_path = temp_dir.path().join("portal.zip");

    let output = portal_pack()
        .arg(&source)
        .arg(&output_path)
        .arg("ultra")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid compression level: ultra"));
    assert!(stderr.contains("store, fast, default, best"));
    assert!(!output_path.exists());
}

#[test]
fn test_no_eligible_files_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("logs-only");
    write_file_sync(source.join("server.log"), b"started").unwrap();
    let output_path = temp_dir.path().join("empty.zip");

    let output = portal_pack()
        .arg(&source)
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fatal Error: No files to compress"));
    assert!(!output_path.exists());
}

#[test]
fn test_unreadable_config_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_portal_fixture(temp_dir.path()).unwrap();
    let output_path = temp_dir.path().join("portal.zip");
    let config_path = temp_dir.path().join("config.json");
    write_file_sync(&config_path, b"{ not json").unwrap();

    let output = portal_pack()
        .arg(&source)
        .arg(&output_path)
        .arg("best")
        .arg(&config_path)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not load config"));
    assert!(output_path.exists());
}

#[test]
fn test_config_file_overrides_exclusions() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_portal_fixture(temp_dir.path()).unwrap();
    let output_path = temp_dir.path().join("portal.zip");
    let config_path = temp_dir.path().join("config.json");
    write_file_sync(&config_path, br#"{ "excludePatterns": ["sub"], "compressionLevel": "store" }"#).unwrap();

    let output = portal_pack()
        .arg(&source)
        .arg(&output_path)
        .arg("default")
        .arg(&config_path)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Explicit level argument wins over the config file
    assert!(stdout.contains("Compression level: default (6)"));

    let contents = archive_contents(&output_path);
    let names: Vec<&str> = contents.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["a.txt", "b.log"]);
}
