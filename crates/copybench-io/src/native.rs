//! Native OS copy commands
//!
//! These strategies measure what the platform's own copy tooling achieves:
//! `cp` on Unix-like systems, `cmd /C copy` and `xcopy` on Windows. One
//! process is spawned per run, covering the whole source tree.

use crate::strategy::{run_dir_name, run_file_name, CopyRequest, CopyStrategy};
use async_trait::async_trait;
use copybench_types::{Error, Result};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Check whether `command` resolves to a file somewhere on `PATH`.
///
/// Capability probes run once at registration; a strategy whose helper
/// command is missing is excluded from the run set up front instead of
/// failing mid-benchmark.
pub(crate) fn command_on_path(command: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(command).is_file())
}

pub(crate) async fn run_command(command: &mut Command) -> Result<()> {
    let rendered = format!("{:?}", command.as_std());
    debug!("spawning {}", rendered);

    let output = command
        .output()
        .await
        .map_err(|error| Error::copy(format!("failed to spawn {}: {}", rendered, error)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::copy(format!(
            "{} exited with {}: {}",
            rendered,
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Native copy via a single `cp -R` process per run
pub struct UnixNativeCopy {
    can_run: bool,
}

impl UnixNativeCopy {
    /// Create the strategy, probing the host capability once
    pub fn new() -> Self {
        Self {
            can_run: cfg!(any(target_os = "linux", target_os = "macos"))
                && command_on_path("cp"),
        }
    }

    fn target(&self, request: &CopyRequest<'_>) -> PathBuf {
        let name = if request.source.is_file {
            run_file_name(&request.source.name, "native", request.run_index)
        } else {
            run_dir_name(&request.source.name, "native", request.run_index)
        };
        request.destination.join(name)
    }
}

impl Default for UnixNativeCopy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CopyStrategy for UnixNativeCopy {
    fn name(&self) -> String {
        "Unix native copy".to_string()
    }

    fn description(&self) -> String {
        "one `cp -R <source> <destination>` process per run".to_string()
    }

    fn can_run(&self) -> bool {
        self.can_run
    }

    async fn perform(&self, request: &CopyRequest<'_>) -> Result<()> {
        let target = self.target(request);
        run_command(
            Command::new("cp")
                .arg("-R")
                .arg(&request.source.path)
                .arg(&target),
        )
        .await
    }
}

/// Native copy via `cmd /C copy` (files) or `xcopy` (directory trees)
pub struct WindowsNativeCopy {
    can_run: bool,
}

impl WindowsNativeCopy {
    /// Create the strategy, probing the host capability once
    pub fn new() -> Self {
        Self {
            can_run: cfg!(windows),
        }
    }
}

impl Default for WindowsNativeCopy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CopyStrategy for WindowsNativeCopy {
    fn name(&self) -> String {
        "Windows native copy".to_string()
    }

    fn description(&self) -> String {
        "`cmd /C copy` per file source, `xcopy /E /I /Q /Y` per directory tree".to_string()
    }

    fn can_run(&self) -> bool {
        self.can_run
    }

    async fn perform(&self, request: &CopyRequest<'_>) -> Result<()> {
        if request.source.is_file {
            let target = request.destination.join(run_file_name(
                &request.source.name,
                "native",
                request.run_index,
            ));
            run_command(
                Command::new("cmd")
                    .args(["/C", "copy", "/Y"])
                    .arg(&request.source.path)
                    .arg(&target),
            )
            .await
        } else {
            let target = request.destination.join(run_dir_name(
                &request.source.name,
                "native",
                request.run_index,
            ));
            run_command(
                Command::new("xcopy")
                    .arg(&request.source.path)
                    .arg(&target)
                    .args(["/E", "/I", "/Q", "/Y"]),
            )
            .await
        }
    }
}
