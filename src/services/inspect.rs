//! Source tree inspection with exclusion filtering
//!
//! The walk is best-effort: unreadable entries become error diagnostics, excluded
//! and oversize entries become warnings, and the walk always completes once the
//! root itself has been validated.

use crate::models::{Diagnostics, FileStat, ScanResult};
use crate::services::format::format_size;
use crate::{Error, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::SystemTime;

/// Normalize a relative path for use as an archive entry name
/// On Windows: Convert backslashes to forward slashes
/// On Unix: Use path as-is (backslash is a valid filename character)
#[cfg(windows)]
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(not(windows))]
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Exclusion patterns: literal names, `*suffix` wildcards, or path substrings.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    patterns: Vec<String>,
}

impl ExclusionRules {
    /// Empty patterns are dropped; they would otherwise match every path.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| p.as_ref().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check an entry against every pattern.
    ///
    /// A pattern starting with `*` matches names ending in the rest of the pattern. Any other
    /// pattern matches an identical name or any relative path containing it, so `env` also
    /// excludes `environment/`.
    #[must_use]
    pub fn matches(&self, file_name: &str, relative_path: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                file_name.ends_with(suffix)
            } else {
                file_name == pattern || relative_path.contains(pattern.as_str())
            }
        })
    }
}

/// Ensure the source root exists and is a directory.
pub async fn validate_source(root: &Path) -> Result<()> {
    match tokio::fs::metadata(root).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::NotFound(root.to_path_buf()))
        }
        Err(e) => Err(Error::Io(e)),
    }
}

/// Walk state for a single scan
struct TraversalContext<'a> {
    root: &'a Path,
    rules: &'a ExclusionRules,
    max_file_size: u64,
    result: ScanResult,
    diagnostics: &'a mut Diagnostics,
}

impl TraversalContext<'_> {
    fn relative(&self, path: &Path) -> String {
        normalize_path(path.strip_prefix(self.root).unwrap_or(path))
    }

    async fn record_file(&mut self, path: PathBuf, relative_path: String) {
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) => {
                self.diagnostics
                    .error(format!("Error reading file {}: {e}", path.display()));
                return;
            }
        };

        let size = metadata.len();
        if size > self.max_file_size {
            self.diagnostics.warn(format!(
                "Large file skipped ({}): {relative_path}",
                format_size(size)
            ));
            return;
        }

        let modified = metadata.modified().unwrap_or_else(|e| {
            log::warn!(
                "Modification time unavailable for {}: {e}, using current time",
                path.display()
            );
            SystemTime::now()
        });

        log::debug!("File entry: {relative_path} (size: {size})");

        self.result.total_size += size;
        self.result.file_count += 1;
        self.result.files.push(FileStat {
            path,
            relative_path,
            size,
            modified,
        });
    }
}

/// Walk `root` and collect every eligible regular file
///
/// # Arguments
/// * `root` - Validated source directory
/// * `rules` - Exclusion rules tested against each entry's name and relative path
/// * `max_file_size` - Files larger than this are skipped with a warning
/// * `diagnostics` - Receives warnings for skipped entries and errors for unreadable ones
///
/// # Returns
/// Files in directory traversal order; possibly empty
pub async fn scan(
    root: &Path,
    rules: &ExclusionRules,
    max_file_size: u64,
    diagnostics: &mut Diagnostics,
) -> ScanResult {
    let mut context = TraversalContext {
        root,
        rules,
        max_file_size,
        result: ScanResult::default(),
        diagnostics,
    };

    visit_directory(&mut context, root.to_path_buf()).await;
    context.result
}

/// Recursive traversal implementation. Excluded directories are not descended into.
fn visit_directory<'a, 'b: 'a>(
    context: &'a mut TraversalContext<'b>,
    dir: PathBuf,
) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
    Box::pin(async move {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(e) => e,
            Err(e) => {
                context
                    .diagnostics
                    .error(format!("Error reading directory {}: {e}", dir.display()));
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    context
                        .diagnostics
                        .error(format!("Error reading directory {}: {e}", dir.display()));
                    break;
                }
            };

            let entry_path = entry.path();
            let relative_path = context.relative(&entry_path);
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if context.rules.matches(&file_name, &relative_path) {
                context.diagnostics.warn(format!("Excluded: {relative_path}"));
                continue;
            }

            let file_type = match entry.file_type().await {
                Ok(t) => t,
                Err(e) => {
                    context.diagnostics.error(format!(
                        "Error reading file {}: {e}",
                        entry_path.display()
                    ));
                    continue;
                }
            };

            if file_type.is_dir() {
                context.result.directory_count += 1;
                visit_directory(context, entry_path).await;
            } else if file_type.is_file() {
                context.record_file(entry_path, relative_path).await;
            } else {
                // Symlinks, sockets, devices
                log::debug!("Skipping non-regular entry: {relative_path}");
            }
        }
    })
}
