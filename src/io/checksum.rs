//! SHA-256 fingerprints of a written archive.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Hex SHA-256 of the file bytes on disk, read in chunks.
pub async fn file_sha256(path: &Path) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let read = file.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hex SHA-256 over every entry's name and decompressed content, in archive order.
///
/// Unlike [`file_sha256`] this ignores the archive comment and header layout, so two
/// archives of the same tree hash equal even when created at different times.
pub async fn content_sha256(path: &Path) -> std::io::Result<String> {
    let path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || content_sha256_blocking(&path))
        .await
        .map_err(std::io::Error::other)?
}

fn content_sha256_blocking(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(std::io::Error::other)?;
    let mut hasher = Sha256::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(std::io::Error::other)?;
        hasher.update(entry.name().as_bytes());
        hasher.update([0u8]);
        std::io::copy(&mut entry, &mut hasher)?;
    }

    Ok(format!("{:x}", hasher.finalize()))
}
