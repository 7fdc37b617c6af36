//! Source scanning and copy strategies for copybench
//!
//! This crate provides the pluggable copy-strategy set that the benchmark
//! runner drives:
//!
//! - **Source scanning**: [`scan_source`] builds the immutable
//!   [`SourceInfo`](copybench_types::SourceInfo) snapshot once at startup
//! - **Strategy contract**: the [`CopyStrategy`] trait and the
//!   [`CopyRequest`] argument bundle shared by every variant
//! - **Strategy variants**: native OS copy commands, a parallel fan-out of
//!   the native command, buffered stream copies at configurable buffer
//!   sizes, and the platform bulk-copy primitive
//! - **Registry**: [`StrategyRegistry`] builds the fixed variant set and
//!   filters it by each strategy's capability predicate
//!
//! # Examples
//!
//! ```rust,no_run
//! use copybench_io::{scan_source, RegistryOptions, StrategyRegistry};
//!
//! let source = scan_source("data/payload.bin")?;
//! let registry = StrategyRegistry::build(&RegistryOptions::default());
//! for strategy in registry.runnable() {
//!     println!("{}: {}", strategy.name(), strategy.description());
//! }
//! # Ok::<(), copybench_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod fscopy;
pub mod native;
pub mod parallel;
pub mod scan;
pub mod strategy;
pub mod stream;

pub use fscopy::FsCopy;
pub use native::{UnixNativeCopy, WindowsNativeCopy};
pub use parallel::ParallelNativeCopy;
pub use scan::scan_source;
pub use strategy::{
    file_destination, run_dir_name, run_file_name, CopyRequest, CopyStrategy, RegistryOptions,
    StrategyRegistry,
};
pub use stream::{StreamCopy, DEFAULT_HIGH_WATER_MARK};
