//! Whole-file copy via the platform bulk-copy primitive
//!
//! `tokio::fs::copy` defers to `std::fs::copy`, which uses the OS fast path
//! where one exists (`copy_file_range`, `fcopyfile`, `CopyFileEx`).

use crate::strategy::{file_destination, CopyRequest, CopyStrategy};
use async_trait::async_trait;
use copybench_types::{Error, ProgressSink, RateLimitedProgress, Result};

/// Bulk copy of every source file through `fs::copy`
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCopy;

impl FsCopy {
    /// Create the strategy
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CopyStrategy for FsCopy {
    fn name(&self) -> String {
        "fs copy".to_string()
    }

    fn description(&self) -> String {
        "tokio::fs::copy per file, delegating to the platform bulk-copy primitive".to_string()
    }

    fn can_run(&self) -> bool {
        true
    }

    async fn perform(&self, request: &CopyRequest<'_>) -> Result<()> {
        let progress = RateLimitedProgress::new(request.progress);
        let total = request.source.file_count();

        for (index, entry) in request.source.files.iter().enumerate() {
            let target = file_destination(request.destination, entry, "fscopy", request.run_index);
            tokio::fs::copy(&entry.path, &target).await.map_err(|error| {
                Error::copy(format!(
                    "failed to copy '{}': {}",
                    entry.path.display(),
                    error
                ))
            })?;
            progress.update_message(
                &format!("{} {}/{} files", request.label, index + 1, total),
                false,
            );
        }

        Ok(())
    }
}
