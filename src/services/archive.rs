//! Archive creation driver
//!
//! Reads scanned files asynchronously and hands them, in scan order, to the blocking zip
//! sink through a bounded channel so that reading and compressing overlap.

use crate::io::archive::{PendingEntry, write_archive};
use crate::io::destination::discard_partial;
use crate::models::{Diagnostics, RunResult, ScanResult};
use crate::services::progress::ProgressTracker;
use crate::{CompressionLevel, Error, Result};
use std::path::Path;
use std::time::Instant;
use tokio::sync::mpsc;

/// Entries buffered between the reader and the sink.
const ENTRY_QUEUE_DEPTH: usize = 4;

/// Writes one archive per call to [`ArchiveWriter::create`]
#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    level: CompressionLevel,
    progress: ProgressTracker,
    started_at: Instant,
}

impl ArchiveWriter {
    /// `started_at` is the instant the scan began; reported durations span scan and write.
    #[must_use]
    pub fn new(level: CompressionLevel, progress: ProgressTracker, started_at: Instant) -> Self {
        Self {
            level,
            progress,
            started_at,
        }
    }

    /// Perform one full archive attempt
    ///
    /// # Arguments
    /// * `scan` - Files to archive, appended in their scan order
    /// * `output_path` - Resolved archive path; created or truncated here
    /// * `diagnostics` - Receives per-file errors and archive warnings of this attempt
    ///
    /// # Returns
    /// The run result; on `Err` no partial archive is left at `output_path`
    pub async fn create(
        &self,
        scan: &ScanResult,
        output_path: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<RunResult> {
        let resolved = output_path.to_path_buf();

        self.progress.begin_attempt();
        let comment = format!(
            "Created by portal-pack on {}",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        );

        let (sender, receiver) = mpsc::channel::<PendingEntry>(ENTRY_QUEUE_DEPTH);
        let sink_path = resolved.clone();
        let level = self.level;
        let progress = self.progress.clone();
        let sink = tokio::task::spawn_blocking(move || {
            write_archive(sink_path, level, comment, receiver, &progress)
        });

        for file in &scan.files {
            let content = match tokio::fs::read(&file.path).await {
                Ok(c) => c,
                Err(e) => {
                    diagnostics.error(format!(
                        "Failed to add file {}: {e}",
                        file.relative_path
                    ));
                    continue;
                }
            };

            let entry = PendingEntry {
                name: file.relative_path.clone(),
                modified: file.modified,
                content,
            };
            if sender.send(entry).await.is_err() {
                // Sink has stopped; its error is reported below.
                break;
            }
        }
        drop(sender);

        let finished = match sink.await {
            Ok(Ok(finished)) => finished,
            Ok(Err(e)) => {
                discard_partial(&resolved).await;
                return Err(e);
            }
            Err(join_err) => {
                discard_partial(&resolved).await;
                return Err(Error::archive_write(&resolved, "Archive task failed", join_err));
            }
        };

        diagnostics.warnings.extend(finished.warnings);
        diagnostics.errors.extend(finished.errors);

        let original_size = scan.total_size;
        let compressed_size = finished.compressed_size;
        let duration = self.started_at.elapsed();

        log::info!(
            "Archive written: {} ({} entries, {compressed_size} bytes)",
            resolved.display(),
            finished.entries_written
        );

        Ok(RunResult {
            output_path: resolved,
            original_size,
            compressed_size,
            compression_ratio: compression_ratio(original_size, compressed_size),
            duration,
            files_processed: finished.entries_written,
            total_files: scan.file_count,
        })
    }
}

/// `(original - compressed) / original * 100` with two decimals; negative when the archive grew.
#[must_use]
pub fn compression_ratio(original: u64, compressed: u64) -> String {
    if original == 0 {
        return "0.00".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = (original as f64 - compressed as f64) / original as f64 * 100.0;
    format!("{ratio:.2}")
}
