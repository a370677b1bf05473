//! Completion report assembly

use crate::io::checksum::{content_sha256, file_sha256};
use crate::models::{
    Diagnostics, EnvironmentInfo, Report, ReportStatistics, ReportSummary, RunResult,
};
use crate::services::progress::compute_throughput;
use crate::{Error, Result};

/// Build the report for a finished archive
///
/// Checksums are computed from the bytes on disk at `result.output_path`, so a file that was
/// not fully flushed fails here rather than producing a report.
pub async fn build(result: &RunResult, diagnostics: &Diagnostics) -> Result<Report> {
    let verify_error = |e: std::io::Error| Error::Verify {
        path: result.output_path.clone(),
        message: e.to_string(),
    };

    let checksum = file_sha256(&result.output_path)
        .await
        .map_err(verify_error)?;
    let content_checksum = content_sha256(&result.output_path)
        .await
        .map_err(verify_error)?;

    let summary = ReportSummary {
        success: true,
        output_file: result.output_path.to_string_lossy().into_owned(),
        files_processed: result.files_processed,
        original_size: result.original_size,
        compressed_size: result.compressed_size,
        compression_ratio: result.compression_ratio.clone(),
        duration_secs: result.duration.as_secs_f64(),
        throughput_bytes_per_sec: compute_throughput(result.original_size, result.duration),
        checksum,
        content_checksum,
    };

    let statistics = ReportStatistics {
        files_processed: result.files_processed,
        total_files: result.total_files,
        errors: diagnostics.errors.len(),
        warnings: diagnostics.warnings.len(),
    };

    Ok(Report {
        summary,
        statistics,
        environment: EnvironmentInfo::capture(),
        errors: diagnostics.errors.clone(),
        warnings: diagnostics.warnings.clone(),
    })
}

impl EnvironmentInfo {
    /// Describe the current host and build.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            runtime: format!(
                "portal-pack {} ({})",
                env!("CARGO_PKG_VERSION"),
                env!("RUSTC_VERSION")
            ),
            memory_bytes: resident_memory_bytes(),
        }
    }
}

/// Resident set size of this process
#[cfg(target_os = "linux")]
fn resident_memory_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib * 1024)
}

#[cfg(not(target_os = "linux"))]
fn resident_memory_bytes() -> Option<u64> {
    None
}
