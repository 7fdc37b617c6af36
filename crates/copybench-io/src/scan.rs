//! Building the source snapshot
//!
//! The snapshot is built once at startup and never mutated, so every
//! strategy and every run copies exactly the same file set and sees the
//! same traversal order.

use copybench_types::{Error, FileEntry, Result, SourceInfo};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Inspect a path and produce a [`SourceInfo`] snapshot.
///
/// A regular file yields a single-entry snapshot. A directory is walked in
/// lexical per-directory order so sequential destination naming is stable
/// across strategies; only regular files become entries. Symbolic links are
/// not followed and link entries are skipped, which also rules out link
/// cycles.
pub fn scan_source<P: AsRef<Path>>(path: P) -> Result<SourceInfo> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            Error::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::io(format!("failed to read '{}': {}", path.display(), error))
        }
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if metadata.is_file() {
        let size = metadata.len();
        debug!("scanned single file '{}' ({} bytes)", path.display(), size);
        return Ok(SourceInfo {
            path: path.to_path_buf(),
            name: name.clone(),
            total_size: size,
            is_file: true,
            files: vec![FileEntry {
                path: path.to_path_buf(),
                name,
                size,
            }],
        });
    }

    let mut files = Vec::new();
    let mut total_size = 0u64;
    for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
        let entry = entry
            .map_err(|error| Error::io(format!("failed to walk '{}': {}", path.display(), error)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let size = entry
            .metadata()
            .map_err(|error| {
                Error::io(format!(
                    "failed to read '{}': {}",
                    entry.path().display(),
                    error
                ))
            })?
            .len();
        total_size += size;
        files.push(FileEntry {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().into_owned(),
            size,
        });
    }

    debug!(
        "scanned '{}': {} files, {} bytes",
        path.display(),
        files.len(),
        total_size
    );

    Ok(SourceInfo {
        path: path.to_path_buf(),
        name,
        total_size,
        is_file: false,
        files,
    })
}
