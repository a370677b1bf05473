//! Output path resolution: overwrite or pick a free sibling name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Decide where an archive will be written
///
/// Creates the parent directory when missing. If `path` already exists it is removed when
/// `overwrite` is set; otherwise the first free `<stem>_N<.ext>` sibling is returned and the
/// existing file is left untouched.
pub async fn resolve_output_path(path: &Path, overwrite: bool) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !tokio::fs::try_exists(parent).await?
    {
        tokio::fs::create_dir_all(parent).await?;
        log::info!("Created directory: {}", parent.display());
    }

    if !tokio::fs::try_exists(path).await? {
        return Ok(path.to_path_buf());
    }

    if overwrite {
        tokio::fs::remove_file(path).await?;
        log::info!("Removed existing file: {}", path.display());
        return Ok(path.to_path_buf());
    }

    let unique = unique_sibling_path(path).await?;
    log::info!("Using unique filename: {}", unique.display());
    Ok(unique)
}

/// First `<stem>_N<.ext>` (N = 1, 2, …) next to `path` that does not exist yet.
pub async fn unique_sibling_path(path: &Path) -> std::io::Result<PathBuf> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter: u64 = 1;
    loop {
        let candidate = path.with_file_name(format!("{stem}_{counter}{extension}"));
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Remove the partial output of a failed attempt.
pub async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => log::debug!("Discarded partial archive {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!(
            "Failed to remove partial archive {}: {e}",
            path.display()
        ),
    }
}
