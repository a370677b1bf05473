//! Contract test for the serialized report shape

use crate::fixtures::{create_portal_fixture, test_config};
use portal_pack::archive_directory;
use portal_pack::services::progress::ProgressTracker;
use tempfile::TempDir;

#[tokio::test]
async fn test_report_json_fields() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_portal_fixture(temp_dir.path()).unwrap();
    let output = temp_dir.path().join("portal.zip");

    let report = archive_directory(&test_config(&source, &output), &ProgressTracker::new())
        .await
        .expect("archive run");

    let json = serde_json::to_value(&report).unwrap();

    for key in [
        "success",
        "output_file",
        "files_processed",
        "original_size",
        "compressed_size",
        "compression_ratio",
        "duration_secs",
        "throughput_bytes_per_sec",
        "checksum",
        "content_checksum",
    ] {
        assert!(json["summary"].get(key).is_some(), "summary.{key} missing");
    }
    for key in ["files_processed", "total_files", "errors", "warnings"] {
        assert!(json["statistics"].get(key).is_some(), "statistics.{key} missing");
    }
    for key in ["platform", "arch", "runtime", "memory_bytes"] {
        assert!(json["environment"].get(key).is_some(), "environment.{key} missing");
    }

    assert!(json["errors"].is_array());
    assert_eq!(json["warnings"][0], "Excluded: b.log");
    assert_eq!(json["statistics"]["warnings"], 1);

    // Ratio is a two-decimal percentage string
    let ratio = json["summary"]["compression_ratio"].as_str().unwrap();
    let decimals = ratio.rsplit('.').next().unwrap();
    assert_eq!(decimals.len(), 2, "ratio {ratio}");
}
