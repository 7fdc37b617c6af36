//! Benchmark engine for copybench
//!
//! Drives every runnable copy strategy through a configurable number of
//! timed runs, aggregates the timings, and renders the comparison table.
//!
//! The loop is strictly sequential: one strategy at a time, one run at a
//! time, with a fixed settle interval between runs to reduce interference
//! from OS caching and background effects. A strategy may parallelize
//! internally; the runner only observes its joined result.
//!
//! # Examples
//!
//! ```rust,no_run
//! use copybench_engine::{BenchmarkRunner, NullObserver, RunnerConfig};
//! use copybench_io::{scan_source, RegistryOptions, StrategyRegistry};
//! use std::path::Path;
//!
//! # async fn example() -> copybench_types::Result<()> {
//! let source = scan_source("data/payload.bin")?;
//! let registry = StrategyRegistry::build(&RegistryOptions::default());
//! let runner = BenchmarkRunner::new(RunnerConfig::default());
//! let results = runner
//!     .run(&registry.runnable(), &source, Path::new("scratch"), &NullObserver)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod report;
pub mod runner;
pub mod stats;

pub use report::render_summary;
pub use runner::{BenchObserver, BenchmarkRunner, NullObserver, RunnerConfig};
pub use stats::{aggregate, throughput, RunResult, RunStats};
