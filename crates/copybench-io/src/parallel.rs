//! Parallel fan-out of the native copy command
//!
//! One `cp` process per source file, with a bounded number in flight. The
//! fan-out happens inside a single `perform` call: the benchmark loop stays
//! strictly sequential, and every spawned process is driven to completion
//! before the run's outcome is observed.

use crate::native::{command_on_path, run_command};
use crate::strategy::{file_destination, CopyRequest, CopyStrategy};
use async_trait::async_trait;
use copybench_types::{ProgressSink, RateLimitedProgress, Result};
use futures::stream::StreamExt;
use tokio::process::Command;

/// Native `cp` fanned out across a fixed worker count
pub struct ParallelNativeCopy {
    workers: usize,
    can_run: bool,
}

impl ParallelNativeCopy {
    /// Create the strategy with the given worker bound (minimum 1)
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            can_run: cfg!(any(target_os = "linux", target_os = "macos"))
                && command_on_path("cp"),
        }
    }

    /// Maximum number of `cp` processes in flight
    pub fn workers(&self) -> usize {
        self.workers
    }

    fn tag(&self) -> String {
        format!("cpx{}", self.workers)
    }
}

#[async_trait]
impl CopyStrategy for ParallelNativeCopy {
    fn name(&self) -> String {
        format!("Unix native copy ({} workers)", self.workers)
    }

    fn description(&self) -> String {
        format!(
            "one `cp` process per file, at most {} in flight",
            self.workers
        )
    }

    fn can_run(&self) -> bool {
        self.can_run
    }

    async fn perform(&self, request: &CopyRequest<'_>) -> Result<()> {
        let tag = self.tag();
        let progress = RateLimitedProgress::new(request.progress);
        let total = request.source.file_count();

        let mut pending = futures::stream::iter(request.source.files.iter().map(|entry| {
            let target = file_destination(request.destination, entry, &tag, request.run_index);
            let source = entry.path.clone();
            async move { run_command(Command::new("cp").arg(&source).arg(&target)).await }
        }))
        .buffer_unordered(self.workers);

        // Drain the whole stream before reporting: a failure must not leave
        // workers running past the end of the run.
        let mut completed = 0usize;
        let mut first_error = None;
        while let Some(outcome) = pending.next().await {
            completed += 1;
            match outcome {
                Ok(()) => {
                    progress.update_message(
                        &format!("{} {}/{} files", request.label, completed, total),
                        false,
                    );
                }
                Err(error) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
