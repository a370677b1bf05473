//! Zip sink: writes entries received from the reader side into the output file.
//!
//! Runs on a blocking thread. I/O failures of the sink abort the attempt; entry-level
//! rejections by the zip writer are recorded and the entry is skipped. Empty files are
//! still stored, with a warning.

use crate::services::progress::ProgressTracker;
use crate::{CompressionLevel, Error, Result};
use chrono::{Datelike, Local, Timelike};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::SystemTime;
use tokio::sync::mpsc::Receiver;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const WRITE_BUFFER_SIZE: usize = 256 * 1024;
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// A file read into memory and waiting to be appended
#[derive(Debug)]
pub struct PendingEntry {
    pub name: String,
    pub modified: SystemTime,
    pub content: Vec<u8>,
}

/// What the sink produced once finished
#[derive(Debug, Default)]
pub struct SinkFinish {
    pub entries_written: usize,
    pub compressed_size: u64,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Base entry options for a compression level.
#[must_use]
pub fn entry_options(level: CompressionLevel) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().unix_permissions(0o644);
    match level {
        CompressionLevel::Store => options.compression_method(CompressionMethod::Stored),
        _ => options
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level.numeric()))),
    }
}

/// Convert a modification time to the zip's local-time representation.
///
/// Returns `None` for times outside the range a zip header can store (1980 to 2107).
#[must_use]
pub fn zip_timestamp(modified: SystemTime) -> Option<zip::DateTime> {
    let local: chrono::DateTime<Local> = modified.into();
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        u8::try_from(local.month()).ok()?,
        u8::try_from(local.day()).ok()?,
        u8::try_from(local.hour()).ok()?,
        u8::try_from(local.minute()).ok()?,
        u8::try_from(local.second()).ok()?,
    )
    .ok()
}

/// Drain `entries` into a new archive at `path`
///
/// # Arguments
/// * `path` - Resolved output path; created (truncated) here
/// * `level` - Compression policy for every entry
/// * `comment` - Archive comment
/// * `entries` - Entries in scan order; the sender closing the channel ends the archive
/// * `progress` - Receives byte counts and committed-entry notifications
///
/// # Returns
/// Counts and entry-level diagnostics, or `Error::ArchiveWrite` if the sink failed
pub fn write_archive(
    path: PathBuf,
    level: CompressionLevel,
    comment: String,
    mut entries: Receiver<PendingEntry>,
    progress: &ProgressTracker,
) -> Result<SinkFinish> {
    let file = File::create(&path)
        .map_err(|e| Error::archive_write(&path, "Output stream error", e))?;
    let mut zip = ZipWriter::new(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file));
    zip.set_comment(comment);

    let base_options = entry_options(level);
    let mut finish = SinkFinish::default();
    let mut seen_names = HashSet::new();
    // Entry counted once the writer moves past it; the last one after finalization.
    let mut uncommitted = false;

    while let Some(entry) = entries.blocking_recv() {
        if !seen_names.insert(entry.name.clone()) {
            finish.warnings.push(format!(
                "Archive warning: duplicate entry {} skipped",
                entry.name
            ));
            continue;
        }

        let timestamp = zip_timestamp(entry.modified).unwrap_or_else(|| {
            finish.warnings.push(format!(
                "Archive warning: modification time of {} outside zip range, stored as 1980-01-01",
                entry.name
            ));
            zip::DateTime::default()
        });

        let content_len = entry.content.len() as u64;
        if content_len == 0 {
            finish
                .warnings
                .push(format!("Archive warning: empty entry {}", entry.name));
        }
        let options = base_options
            .last_modified_time(timestamp)
            .large_file(content_len >= ZIP64_THRESHOLD);

        if let Err(e) = append_entry(&mut zip, &entry, options) {
            match e {
                ZipError::Io(io_err) => {
                    return Err(Error::archive_write(&path, "Archive error", io_err));
                }
                other => {
                    finish
                        .errors
                        .push(format!("Failed to add file {}: {other}", entry.name));
                    continue;
                }
            }
        }

        log::debug!("Appended {} ({content_len} bytes)", entry.name);
        if uncommitted {
            progress.entry_committed();
        }
        uncommitted = true;
        progress.record_bytes(content_len);
        finish.entries_written += 1;
    }

    let writer = zip
        .finish()
        .map_err(|e| Error::archive_write(&path, "Archive error", e))?;
    let file = writer
        .into_inner()
        .map_err(|e| Error::archive_write(&path, "Output stream error", e.into_error()))?;
    file.sync_all()
        .map_err(|e| Error::archive_write(&path, "Output stream error", e))?;
    finish.compressed_size = file
        .metadata()
        .map_err(|e| Error::archive_write(&path, "Output stream error", e))?
        .len();

    if uncommitted {
        progress.entry_committed();
    }

    Ok(finish)
}

fn append_entry<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    entry: &PendingEntry,
    options: SimpleFileOptions,
) -> zip::result::ZipResult<()> {
    zip.start_file(entry.name.as_str(), options)?;
    zip.write_all(&entry.content)?;
    Ok(())
}

