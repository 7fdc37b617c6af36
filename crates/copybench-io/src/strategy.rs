//! The copy-strategy contract and registry
//!
//! Every benchmarked technique, from subprocess invocation to buffered
//! streaming, is dispatched through the single [`CopyStrategy`] trait.
//! Capability is decided once at registration time; the runner only ever
//! sees the filtered set.

use crate::{FsCopy, ParallelNativeCopy, StreamCopy, UnixNativeCopy, WindowsNativeCopy};
use async_trait::async_trait;
use copybench_types::{FileEntry, ProgressSink, Result, SourceInfo};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a strategy needs to perform one copy of the entire source
pub struct CopyRequest<'a> {
    /// The immutable source snapshot
    pub source: &'a SourceInfo,
    /// Scratch folder all copies land in
    pub destination: &'a Path,
    /// 1-based index of this run within the strategy's set
    pub run_index: u32,
    /// Runner-owned base progress message for this run
    pub label: &'a str,
    /// Write-only progress handle for this run
    pub progress: &'a dyn ProgressSink,
}

/// One named technique for copying a source to a destination
#[async_trait]
pub trait CopyStrategy: Send + Sync {
    /// Display identifier
    fn name(&self) -> String;

    /// Human-readable explanation of the underlying mechanism
    fn description(&self) -> String;

    /// Capability predicate, computed at registration time from the host
    /// (operating system family, helper-command availability). Strategies
    /// that cannot run are excluded from the run set entirely.
    fn can_run(&self) -> bool;

    /// Copy the entire source once, reporting progress through the sink.
    ///
    /// Destinations are derived from the run index and source file names so
    /// repeated runs never collide. Any internal concurrency must be fully
    /// joined before this returns.
    async fn perform(&self, request: &CopyRequest<'_>) -> Result<()>;
}

/// Destination file name for one copied file: `<stem>_<tag>_<run><ext>`
pub fn run_file_name(name: &str, tag: &str, run_index: u32) -> String {
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => {
            format!("{stem}_{tag}_{run_index}.{extension}")
        }
        _ => format!("{name}_{tag}_{run_index}"),
    }
}

/// Destination directory name for a whole-tree copy: `<name>_<tag>_<run>`
pub fn run_dir_name(source_name: &str, tag: &str, run_index: u32) -> String {
    format!("{source_name}_{tag}_{run_index}")
}

/// Flattened destination path for one source file
pub fn file_destination(
    destination: &Path,
    entry: &FileEntry,
    tag: &str,
    run_index: u32,
) -> PathBuf {
    destination.join(run_file_name(&entry.name, tag, run_index))
}

/// Parameters for building the strategy set
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Buffer sizes, one stream-copy entry per value (the default-buffer
    /// entry is always registered)
    pub high_water_marks: Vec<u64>,
    /// Worker counts, one parallel-copy entry per value
    pub worker_counts: Vec<usize>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            high_water_marks: Vec::new(),
            worker_counts: vec![1, 3, 5, 10],
        }
    }
}

/// The fixed, ordered set of strategy variants
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn CopyStrategy>>,
}

impl StrategyRegistry {
    /// Build the full variant set in registration order.
    ///
    /// Capability predicates are evaluated here, once; no strategy branches
    /// on the platform at perform time.
    pub fn build(options: &RegistryOptions) -> Self {
        let mut strategies: Vec<Arc<dyn CopyStrategy>> = Vec::new();

        strategies.push(Arc::new(WindowsNativeCopy::new()));
        strategies.push(Arc::new(UnixNativeCopy::new()));
        for &workers in &options.worker_counts {
            strategies.push(Arc::new(ParallelNativeCopy::new(workers)));
        }
        strategies.push(Arc::new(FsCopy::new()));
        strategies.push(Arc::new(StreamCopy::with_default_buffer()));
        for &high_water_mark in &options.high_water_marks {
            strategies.push(Arc::new(StreamCopy::with_high_water_mark(
                high_water_mark as usize,
            )));
        }

        Self { strategies }
    }

    /// Every registered strategy, runnable or not
    pub fn all(&self) -> &[Arc<dyn CopyStrategy>] {
        &self.strategies
    }

    /// Strategies whose capability predicate passed, in registration order
    pub fn runnable(&self) -> Vec<Arc<dyn CopyStrategy>> {
        self.strategies
            .iter()
            .filter(|strategy| strategy.can_run())
            .cloned()
            .collect()
    }
}
