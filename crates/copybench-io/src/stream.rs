//! Buffered stream copy
//!
//! Chunked read/write through `BufReader`/`BufWriter` with a fixed buffer
//! capacity — the "high-water-mark". One registry entry exists per requested
//! buffer size, plus one at the default size, so the benchmark can compare
//! buffer sizes directly.

use crate::strategy::{file_destination, CopyRequest, CopyStrategy};
use async_trait::async_trait;
use copybench_types::{format_bytes, Error, ProgressSink, RateLimitedProgress, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::debug;

/// Buffer size used when no high-water-mark is requested
pub const DEFAULT_HIGH_WATER_MARK: usize = 64 * 1024;

/// Buffered stream copy at a fixed buffer size
pub struct StreamCopy {
    high_water_mark: Option<usize>,
}

impl StreamCopy {
    /// Create the default-buffer instance
    pub fn with_default_buffer() -> Self {
        Self {
            high_water_mark: None,
        }
    }

    /// Create an instance with an explicit buffer size (minimum 1 byte)
    pub fn with_high_water_mark(high_water_mark: usize) -> Self {
        Self {
            high_water_mark: Some(high_water_mark.max(1)),
        }
    }

    /// The buffer size this instance copies with
    pub fn buffer_size(&self) -> usize {
        self.high_water_mark.unwrap_or(DEFAULT_HIGH_WATER_MARK)
    }

    fn tag(&self) -> String {
        format!("stream{}", self.buffer_size())
    }
}

#[async_trait]
impl CopyStrategy for StreamCopy {
    fn name(&self) -> String {
        match self.high_water_mark {
            Some(size) => format!("Stream copy ({} buffer)", format_bytes(size as u64)),
            None => format!(
                "Stream copy (default {} buffer)",
                format_bytes(DEFAULT_HIGH_WATER_MARK as u64)
            ),
        }
    }

    fn description(&self) -> String {
        "chunked read/write through BufReader/BufWriter at a fixed buffer capacity".to_string()
    }

    fn can_run(&self) -> bool {
        true
    }

    async fn perform(&self, request: &CopyRequest<'_>) -> Result<()> {
        let buffer_size = self.buffer_size();
        let tag = self.tag();
        let progress = RateLimitedProgress::new(request.progress);
        let total = request.source.total_size;

        let mut copied = 0u64;
        for entry in &request.source.files {
            let target = file_destination(request.destination, entry, &tag, request.run_index);
            copied = copy_streamed(
                &entry.path,
                &target,
                buffer_size,
                copied,
                total,
                request.label,
                &progress,
            )
            .await?;
        }

        Ok(())
    }
}

async fn copy_streamed(
    source: &Path,
    target: &Path,
    buffer_size: usize,
    mut copied: u64,
    total: u64,
    label: &str,
    progress: &dyn ProgressSink,
) -> Result<u64> {
    let source_file = File::open(source)
        .await
        .map_err(|error| Error::copy(format!("failed to open '{}': {}", source.display(), error)))?;
    let mut reader = BufReader::with_capacity(buffer_size, source_file);

    let target_file = File::create(target)
        .await
        .map_err(|error| Error::copy(format!("failed to create '{}': {}", target.display(), error)))?;
    let mut writer = BufWriter::with_capacity(buffer_size, target_file);

    let mut chunk = vec![0u8; buffer_size];
    loop {
        let read = reader
            .read(&mut chunk)
            .await
            .map_err(|error| Error::copy(format!("failed to read '{}': {}", source.display(), error)))?;
        if read == 0 {
            break;
        }

        writer.write_all(&chunk[..read]).await.map_err(|error| {
            Error::copy(format!("failed to write '{}': {}", target.display(), error))
        })?;

        copied += read as u64;
        if total > 0 {
            let percentage = copied as f64 / total as f64 * 100.0;
            progress.update_message(&format!("{label} {percentage:.2}%"), false);
        }
    }

    writer.flush().await.map_err(|error| {
        Error::copy(format!("failed to flush '{}': {}", target.display(), error))
    })?;

    debug!("streamed '{}' -> '{}'", source.display(), target.display());
    Ok(copied)
}
