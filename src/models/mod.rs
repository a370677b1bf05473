//! Data models for scanned files, run results, diagnostics, and reports

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A regular file selected for archiving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub path: PathBuf,
    /// Forward-slash separated path below the source root; used as the entry name.
    pub relative_path: String,
    pub size: u64,
    pub modified: SystemTime,
}

/// Output of one directory walk, in traversal order
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<FileStat>,
    pub total_size: u64,
    pub file_count: usize,
    pub directory_count: usize,
}

impl ScanResult {
    /// Drop the entry for `path`, keeping the totals consistent.
    pub fn remove_path(&mut self, path: &Path) -> Option<FileStat> {
        let index = self.files.iter().position(|f| f.path == path)?;
        let removed = self.files.remove(index);
        self.total_size -= removed.size;
        self.file_count -= 1;
        Some(removed)
    }
}

/// Warnings and errors accumulated over a run. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Diagnostics {
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Move everything recorded in `other` to the end of this collection.
    pub fn append(&mut self, mut other: Diagnostics) {
        self.warnings.append(&mut other.warnings);
        self.errors.append(&mut other.errors);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// Outcome of one successful archive attempt
#[derive(Debug, Clone)]
pub struct RunResult {
    /// May differ from the requested path when a unique name had to be chosen.
    pub output_path: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Percentage with two decimals, e.g. `"42.17"`.
    pub compression_ratio: String,
    /// Wall-clock time from the start of the scan until the archive was closed.
    pub duration: Duration,
    pub files_processed: usize,
    pub total_files: usize,
}

/// Progress counters at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_processed: u64,
}

impl ProgressSnapshot {
    /// Whole-number completion percentage, 0 while the total is unknown.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total_files == 0 {
            return 0;
        }
        let pct = self.files_processed.min(self.total_files) * 100 / self.total_files;
        u8::try_from(pct).unwrap_or(100)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub success: bool,
    pub output_file: String,
    pub files_processed: usize,
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio: String,
    pub duration_secs: f64,
    pub throughput_bytes_per_sec: Option<u64>,
    /// SHA-256 of the archive file as written to disk.
    pub checksum: String,
    /// SHA-256 over entry names and decompressed contents, independent of the archive comment.
    pub content_checksum: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub files_processed: usize,
    pub total_files: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Informational host details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub platform: String,
    pub arch: String,
    pub runtime: String,
    pub memory_bytes: Option<u64>,
}

/// Final artifact of a successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub summary: ReportSummary,
    pub statistics: ReportStatistics,
    pub environment: EnvironmentInfo,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}
