//! Unit tests for report and failure rendering

use portal_pack::cli::output::{format_failure, format_report};
use portal_pack::models::{EnvironmentInfo, Report, ReportStatistics, ReportSummary};
use portal_pack::{Diagnostics, Error, RunFailure};

fn sample_report(warnings: Vec<String>, errors: Vec<String>) -> Report {
    Report {
        summary: ReportSummary {
            success: true,
            output_file: "/tmp/portal.zip".to_string(),
            files_processed: 3,
            original_size: 2048,
            compressed_size: 512,
            compression_ratio: "75.00".to_string(),
            duration_secs: 0.25,
            throughput_bytes_per_sec: Some(8192),
            checksum: "ab".repeat(32),
            content_checksum: "cd".repeat(32),
        },
        statistics: ReportStatistics {
            files_processed: 3,
            total_files: 3,
            errors: errors.len(),
            warnings: warnings.len(),
        },
        environment: EnvironmentInfo {
            platform: "linux".to_string(),
            arch: "x86_64".to_string(),
            runtime: "portal-pack 0.1.0".to_string(),
            memory_bytes: None,
        },
        errors,
        warnings,
    }
}

#[test]
fn test_report_summary_lines() {
    let text = format_report(&sample_report(Vec::new(), Vec::new()));

    assert!(text.contains("COMPRESSION REPORT"));
    assert!(text.contains("Output File: /tmp/portal.zip"));
    assert!(text.contains("Original Size: 2 KB"));
    assert!(text.contains("Compressed Size: 512 Bytes"));
    assert!(text.contains("Compression Ratio: 75.00%"));
    assert!(text.contains("Throughput: 8 KB/s"));
    assert!(!text.contains("Issues:"));
    assert!(!text.contains("Warnings:"));
    assert!(!text.contains("Memory Used"));
}

#[test]
fn test_long_warning_list_is_truncated() {
    let warnings: Vec<String> = (1..=12).map(|i| format!("Excluded: file{i}.log")).collect();
    let text = format_report(&sample_report(warnings, Vec::new()));

    assert!(text.contains("Warnings: 12 warnings (showing first 5):"));
    assert!(text.contains("Excluded: file5.log"));
    assert!(!text.contains("Excluded: file6.log"));
}

#[test]
fn test_short_warning_list_is_complete() {
    let warnings: Vec<String> = (1..=10).map(|i| format!("Excluded: file{i}.log")).collect();
    let text = format_report(&sample_report(warnings, vec!["Failed to add file x: denied".into()]));

    assert!(text.contains("Excluded: file10.log"));
    assert!(!text.contains("showing first"));
    assert!(text.contains("Errors: 1"));
    assert!(text.contains("1. Failed to add file x: denied"));
}

#[test]
fn test_failure_lists_diagnostics() {
    let mut diagnostics = Diagnostics::default();
    diagnostics.error("Attempt 1 failed: disk full");
    diagnostics.error("Attempt 2 failed: disk full");
    diagnostics.warn("Retry attempt 2/2");

    let failure = RunFailure::new(Error::NoFiles, diagnostics);
    let text = format_failure(&failure);

    assert!(text.contains("Fatal Error: No files to compress"));
    assert!(text.contains("Detailed Errors:"));
    assert!(text.contains("2. Attempt 2 failed: disk full"));
    assert!(text.contains("Retry attempt 2/2"));
}
