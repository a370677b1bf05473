//! Directory Archiving Library
//!
//! This library packages a source directory into a deflate-compressed zip archive:
//! the tree is walked with exclusion rules, eligible files are streamed into the
//! archive with retry on sink failures, and a report with size statistics and a
//! checksum of the written file is produced.

pub mod cli;
pub mod io;
pub mod models;
pub mod services;

pub use models::{Diagnostics, FileStat, ProgressSnapshot, Report, RunResult, ScanResult};

use io::destination::resolve_output_path;
use services::archive::ArchiveWriter;
use services::inspect::{self, ExclusionRules};
use services::progress::ProgressTracker;
use services::retry::{AttemptReport, RetryCoordinator, RetryPolicy};
use std::path::{Path, PathBuf};
use std::result;
use std::time::{Duration, Instant};

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    NotFound(PathBuf),
    NotADirectory(PathBuf),
    InvalidLevel(String),
    NoFiles,
    ArchiveWrite {
        path: PathBuf,
        message: String,
    },
    Verify {
        path: PathBuf,
        message: String,
    },
    RetryExhausted {
        attempts: u32,
        last_error: String,
        history: Diagnostics,
    },
}

impl Error {
    /// Wrap a sink failure with the file it happened on and the phase that failed.
    pub fn archive_write(path: &Path, phase: &str, err: impl std::fmt::Display) -> Self {
        Error::ArchiveWrite {
            path: path.to_path_buf(),
            message: format!("{phase}: {err}"),
        }
    }

    /// Whether a failed attempt with this error is worth repeating.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ArchiveWrite { .. } | Error::Io(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::NotFound(path) => {
                write!(f, "Source directory not found: {}", path.display())
            }
            Error::NotADirectory(path) => {
                write!(f, "Source path is not a directory: {}", path.display())
            }
            Error::InvalidLevel(level) => write!(
                f,
                "Invalid compression level: {level}. Available: {}",
                CompressionLevel::labels().join(", ")
            ),
            Error::NoFiles => write!(f, "No files to compress"),
            Error::ArchiveWrite { path, message } => {
                write!(f, "Archive write failed for {}: {message}", path.display())
            }
            Error::Verify { path, message } => {
                write!(f, "Failed to verify archive {}: {message}", path.display())
            }
            Error::RetryExhausted {
                attempts,
                last_error,
                ..
            } => write!(
                f,
                "All {attempts} attempts failed. Last error: {last_error}"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Terminal failure of a run: the cause plus everything collected before it.
#[derive(Debug)]
pub struct RunFailure {
    pub error: Error,
    pub diagnostics: Diagnostics,
}

impl RunFailure {
    #[must_use]
    pub fn new(error: Error, diagnostics: Diagnostics) -> Self {
        Self { error, diagnostics }
    }
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Compression policy names and the deflate effort they map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    Store,
    Fast,
    Default,
    #[default]
    Best,
}

impl CompressionLevel {
    pub const ALL: [CompressionLevel; 4] = [
        CompressionLevel::Store,
        CompressionLevel::Fast,
        CompressionLevel::Default,
        CompressionLevel::Best,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionLevel::Store => "store",
            CompressionLevel::Fast => "fast",
            CompressionLevel::Default => "default",
            CompressionLevel::Best => "best",
        }
    }

    /// Numeric deflate level.
    #[must_use]
    pub fn numeric(&self) -> u8 {
        match self {
            CompressionLevel::Store => 0,
            CompressionLevel::Fast => 1,
            CompressionLevel::Default => 6,
            CompressionLevel::Best => 9,
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == label)
    }

    /// Lenient lookup used for configuration files: unknown names mean maximum effort.
    #[must_use]
    pub fn from_label_or_best(label: &str) -> Self {
        Self::from_label(label).unwrap_or(CompressionLevel::Best)
    }

    #[must_use]
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(CompressionLevel::as_str).collect()
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompressionLevel {
    type Err = Error;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        CompressionLevel::from_label(s).ok_or_else(|| Error::InvalidLevel(s.to_string()))
    }
}

/// Exclusion patterns applied when no configuration overrides them.
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 7] = [
    ".git",
    ".gitignore",
    "node_modules",
    ".env",
    "*.log",
    ".DS_Store",
    "Thumbs.db",
];

pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Settings for a single archive run
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
    pub level: CompressionLevel,
    pub overwrite: bool,
    pub exclude_patterns: Vec<String>,
    pub max_file_size: u64,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl RunConfiguration {
    /// Build a configuration with default policy, resolving both paths to absolute form.
    pub fn new<S: AsRef<Path>, O: AsRef<Path>>(source: S, output: O) -> std::io::Result<Self> {
        Ok(Self {
            source_dir: std::path::absolute(source)?,
            output_path: std::path::absolute(output)?,
            level: CompressionLevel::default(),
            overwrite: true,
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }
}

/// Archive a source directory and return the completion report
///
/// Each attempt resolves the output path, scans the source tree and writes the archive, in
/// that order, so a stale archive inside the source tree is gone before the walk sees it.
///
/// # Arguments
/// * `config` - Paths and policy for this run
/// * `progress` - Counters updated while entries are written
///
/// # Returns
/// The report for the produced archive, or the failure cause together with every
/// warning and error collected up to that point
pub async fn archive_directory(
    config: &RunConfiguration,
    progress: &ProgressTracker,
) -> result::Result<Report, RunFailure> {
    let mut diagnostics = Diagnostics::default();

    if let Err(e) = inspect::validate_source(&config.source_dir).await {
        return Err(RunFailure::new(e, diagnostics));
    }

    let started_at = Instant::now();
    let rules = ExclusionRules::new(&config.exclude_patterns);
    let writer = ArchiveWriter::new(config.level, progress.clone(), started_at);
    let mut coordinator =
        RetryCoordinator::new(RetryPolicy::new(config.retry_attempts, config.retry_delay));

    let attempt_outcome = coordinator
        .run(&mut diagnostics, |attempt| {
            let writer = &writer;
            let rules = &rules;
            async move {
                log::debug!("Starting archive attempt {attempt}");
                let mut attempt_diagnostics = Diagnostics::default();
                let outcome =
                    run_attempt(config, rules, writer, progress, &mut attempt_diagnostics).await;
                AttemptReport::new(outcome, attempt_diagnostics)
            }
        })
        .await;

    let run_result = match attempt_outcome {
        Ok(result) => result,
        Err(e) => return Err(RunFailure::new(e, diagnostics)),
    };

    match services::report::build(&run_result, &diagnostics).await {
        Ok(report) => Ok(report),
        Err(e) => Err(RunFailure::new(e, diagnostics)),
    }
}

/// Resolve the output path, scan the source tree, then write the archive.
async fn run_attempt(
    config: &RunConfiguration,
    rules: &ExclusionRules,
    writer: &ArchiveWriter,
    progress: &ProgressTracker,
    diagnostics: &mut Diagnostics,
) -> Result<RunResult> {
    let output_path = resolve_output_path(&config.output_path, config.overwrite)
        .await
        .map_err(|e| Error::archive_write(&config.output_path, "Output path error", e))?;

    log::info!("Analyzing source directory {}", config.source_dir.display());
    let mut scan = inspect::scan(
        &config.source_dir,
        rules,
        config.max_file_size,
        diagnostics,
    )
    .await;

    // The archive must never contain itself
    if scan.remove_path(&output_path).is_some() {
        log::debug!("Skipping output file {} found in source tree", output_path.display());
    }

    log::info!(
        "Found {} files ({} bytes) in {} directories",
        scan.file_count,
        scan.total_size,
        scan.directory_count
    );

    if scan.files.is_empty() {
        return Err(Error::NoFiles);
    }

    progress.set_total(scan.file_count);
    writer.create(&scan, &output_path, diagnostics).await
}
