//! Core type system and error handling for copybench
//!
//! This crate provides the foundational types shared by the copybench
//! workspace:
//!
//! - **Error handling**: structured error types for parse, I/O, and copy
//!   failures, plus the workspace-wide [`Result`] alias
//! - **Byte sizes**: parsing and formatting of human-readable byte counts
//!   such as `"2.3 kB"`
//! - **Source description**: the immutable [`SourceInfo`] snapshot of the
//!   file or directory being benchmarked
//! - **Progress reporting**: the write-only [`ProgressSink`] handle that
//!   copy strategies use to publish textual progress
//!
//! # Examples
//!
//! ```rust
//! use copybench_types::{format_bytes, parse_bytes};
//!
//! let bytes = parse_bytes("2 MB")?;
//! assert_eq!(bytes, 2 * 1024 * 1024);
//! assert_eq!(format_bytes(bytes), "2 MB");
//! # Ok::<(), copybench_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bytes;
pub mod error;
pub mod progress;
pub mod result;
pub mod source;

// Re-export commonly used types
pub use bytes::{format_bytes, format_throughput, parse_bytes, KILOBYTE};
pub use error::{Error, ErrorKind};
pub use progress::{NullProgressSink, ProgressSink, RateLimitedProgress};
pub use result::Result;
pub use source::{FileEntry, SourceInfo};
