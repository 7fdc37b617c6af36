//! Sequential benchmark execution
//!
//! Strategies run in registration order; runs within a strategy run back to
//! back with a fixed settle interval between them. Any `perform` failure is
//! fatal to the whole benchmark — a partial benchmark with a silently
//! skipped strategy would produce misleading comparative results.

use crate::stats::RunResult;
use copybench_io::{CopyRequest, CopyStrategy};
use copybench_types::{NullProgressSink, ProgressSink, Result, SourceInfo};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Configuration for the benchmark runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Number of runs per strategy
    pub tests_in_set: u32,
    /// Fixed cooldown between consecutive runs of a set
    pub settle_interval: Duration,
}

impl RunnerConfig {
    /// Default cooldown between runs
    pub const DEFAULT_SETTLE_INTERVAL: Duration = Duration::from_millis(500);
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tests_in_set: 3,
            settle_interval: Self::DEFAULT_SETTLE_INTERVAL,
        }
    }
}

/// Observer of benchmark lifecycle events
///
/// The engine stays terminal-free; the CLI implements this to draw strategy
/// headers, per-run spinners, and per-set summaries. `run_started` hands
/// back the sink the strategy reports progress through for that run.
pub trait BenchObserver: Send + Sync {
    /// A strategy's set is about to start
    fn strategy_started(&self, _name: &str, _description: &str) {}

    /// A run is about to start; returns the run's progress sink
    fn run_started(&self, label: &str) -> Box<dyn ProgressSink>;

    /// A strategy's set finished with the given aggregated result
    fn strategy_finished(&self, _result: &RunResult, _total_bytes: u64) {}
}

/// Observer that draws nothing (tests, quiet mode)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BenchObserver for NullObserver {
    fn run_started(&self, _label: &str) -> Box<dyn ProgressSink> {
        Box::new(NullProgressSink)
    }
}

/// Drives every runnable strategy through its timed set
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    config: RunnerConfig,
}

impl BenchmarkRunner {
    /// Create a runner with the given configuration
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// The runner's configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every runnable strategy in order and collect one result each.
    ///
    /// Strategies whose capability predicate failed are never invoked and
    /// never reported. The first `perform` failure aborts the remaining
    /// strategies and propagates.
    pub async fn run(
        &self,
        strategies: &[Arc<dyn CopyStrategy>],
        source: &SourceInfo,
        destination: &Path,
        observer: &dyn BenchObserver,
    ) -> Result<Vec<RunResult>> {
        let mut results = Vec::new();
        for strategy in strategies.iter().filter(|strategy| strategy.can_run()) {
            let result = self
                .run_set(strategy.as_ref(), source, destination, observer)
                .await?;
            results.push(result);
        }
        Ok(results)
    }

    async fn run_set(
        &self,
        strategy: &dyn CopyStrategy,
        source: &SourceInfo,
        destination: &Path,
        observer: &dyn BenchObserver,
    ) -> Result<RunResult> {
        let name = strategy.name();
        observer.strategy_started(&name, &strategy.description());
        info!("benchmarking '{}'", name);

        let total = self.config.tests_in_set;
        let mut runs = Vec::with_capacity(total as usize);
        for run_index in 1..=total {
            let label = format!("Running test: {} {}/{}", name, run_index, total);
            let sink = observer.run_started(&label);
            sink.update_message(&label, true);

            let request = CopyRequest {
                source,
                destination,
                run_index,
                label: &label,
                progress: sink.as_ref(),
            };

            let started = Instant::now();
            let outcome = strategy.perform(&request).await;
            let seconds = started.elapsed().as_millis() as f64 / 1000.0;

            if let Err(error) = outcome {
                sink.complete(false, None);
                return Err(error);
            }
            sink.complete(true, Some(&format!("{label} ({seconds:.1}s)")));

            debug!("run {}/{} of '{}' took {:.3}s", run_index, total, name, seconds);
            runs.push(seconds);

            if run_index < total {
                tokio::time::sleep(self.config.settle_interval).await;
            }
        }

        let result = RunResult::new(name, runs);
        observer.strategy_finished(&result, source.total_size);
        Ok(result)
    }
}
