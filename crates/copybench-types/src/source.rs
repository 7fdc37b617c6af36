//! Description of the benchmark source
//!
//! A [`SourceInfo`] is built once at startup from the source path and stays
//! read-only for the rest of the run, so every strategy copies exactly the
//! same set of files.

use std::path::PathBuf;

/// One regular file beneath the benchmark source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// File name without any directory components
    pub name: String,
    /// File size in bytes
    pub size: u64,
}

/// Immutable snapshot of the source file or directory
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// Path the snapshot was built from
    pub path: PathBuf,
    /// Final component of the source path
    pub name: String,
    /// Sum of all file sizes
    pub total_size: u64,
    /// Whether the source is a single regular file
    pub is_file: bool,
    /// Every regular file under the source, in deterministic order
    pub files: Vec<FileEntry>,
}

impl SourceInfo {
    /// Number of files the benchmark will copy per run
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
