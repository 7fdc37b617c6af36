//! copybench - file-copy strategy benchmark
//!
//! Benchmarks a pluggable set of copy strategies (native OS commands, a
//! parallel fan-out of the native command, buffered stream copies at
//! configurable buffer sizes, and the platform bulk-copy primitive) against
//! a source file or directory, reporting timing and throughput statistics.

use anyhow::Result;
use clap::Parser;
use console::style;
use copybench_engine::{render_summary, BenchmarkRunner, RunnerConfig};
use copybench_io::{scan_source, RegistryOptions, StrategyRegistry};
use copybench_types::{parse_bytes, Error, ProgressSink};
use std::path::{Path, PathBuf};
use tracing::info;

mod display;
mod progress;

use crate::display::{print_banner, ConsoleObserver};
use crate::progress::SpinnerSink;

/// Default buffer sizes benchmarked by the stream-copy strategy
const DEFAULT_HIGH_WATER_MARKS: &[&str] = &["1 MB", "100 MB", "500 MB", "1 GB"];

/// Benchmark file-copy strategies against a source file or directory
#[derive(Parser)]
#[command(
    name = "copybench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Benchmark file-copy strategies",
    long_about = "Benchmarks native copy commands, buffered stream copies, and parallel\n\
                  copies against a source file or directory, reporting average and best\n\
                  times with derived throughput. The destination folder is scratch\n\
                  space and is deleted after a successful run."
)]
struct Cli {
    /// Path to the file or directory to copy
    #[arg(short = 's', long)]
    source_file: PathBuf,

    /// Scratch folder for copies; must not exist unless --force is given
    #[arg(short = 'd', long)]
    destination_folder: PathBuf,

    /// Delete the destination folder before starting if it exists
    #[arg(short = 'f', long)]
    force: bool,

    /// Number of runs per strategy
    #[arg(long, default_value_t = 3)]
    tests_in_set: u32,

    /// Buffer sizes to benchmark the stream copy at, comma-separable in a
    /// single occurrence: --high-water-mark="50 kB,150 MB,1 GB"
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_HIGH_WATER_MARKS.iter().map(ToString::to_string)
    )]
    high_water_mark: Vec<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.quiet)?;
    info!("copybench v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(error) = run(cli).await {
        report_error(&error);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(debug: bool, quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}

async fn run(cli: Cli) -> copybench_types::Result<()> {
    let high_water_marks = parse_high_water_marks(&cli.high_water_mark)?;

    prepare_destination(&cli.destination_folder, cli.force, cli.quiet).await?;

    let source = scan_source(&cli.source_file)?;
    if !cli.quiet {
        print_banner(&source);
    }

    let registry = StrategyRegistry::build(&RegistryOptions {
        high_water_marks,
        ..RegistryOptions::default()
    });
    let runner = BenchmarkRunner::new(RunnerConfig {
        tests_in_set: cli.tests_in_set,
        ..RunnerConfig::default()
    });
    let observer = ConsoleObserver::new(cli.quiet);

    let results = runner
        .run(
            &registry.runnable(),
            &source,
            &cli.destination_folder,
            &observer,
        )
        .await?;

    clean_up(&cli.destination_folder, cli.quiet).await?;

    let mut stdout = std::io::stdout();
    render_summary(&mut stdout, &results, source.total_size)?;

    Ok(())
}

fn parse_high_water_marks(values: &[String]) -> copybench_types::Result<Vec<u64>> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(parse_bytes)
        .collect()
}

/// Check the destination folder and create it, refusing to proceed when it
/// already exists and `force` is not set. No strategy runs before this.
async fn prepare_destination(path: &Path, force: bool, quiet: bool) -> copybench_types::Result<()> {
    let checking = phase_spinner("Checking destination", quiet);
    let exists = tokio::fs::metadata(path).await.is_ok();
    checking.complete(true, None);

    if exists {
        if !force {
            return Err(Error::DestinationExists {
                path: path.to_path_buf(),
            });
        }
        clean_up(path, quiet).await?;
    }

    let creating = phase_spinner(&format!("Creating '{}'", path.display()), quiet);
    let outcome = tokio::fs::create_dir_all(path).await;
    creating.complete(outcome.is_ok(), None);

    outcome.map_err(|error| Error::io(format!("failed to create '{}': {}", path.display(), error)))
}

/// Delete the scratch destination folder
async fn clean_up(path: &Path, quiet: bool) -> copybench_types::Result<()> {
    let deleting = phase_spinner(&format!("Deleting '{}'", path.display()), quiet);
    let outcome = tokio::fs::remove_dir_all(path).await;
    deleting.complete(outcome.is_ok(), None);

    outcome.map_err(|error| Error::io(format!("failed to delete '{}': {}", path.display(), error)))
}

fn phase_spinner(message: &str, quiet: bool) -> SpinnerSink {
    if quiet {
        SpinnerSink::hidden(message)
    } else {
        SpinnerSink::new(message)
    }
}

fn report_error(error: &Error) {
    match error {
        Error::DestinationExists { path } => {
            eprintln!(
                "{}",
                style(format!(
                    "Destination '{}' already exists. Please provide a folder path that does \
                     not exist; the folder will be deleted after the benchmark. Run with '-f' \
                     to force and delete this folder.",
                    path.display()
                ))
                .red()
            );
        }
        other => {
            eprintln!("{} {}", style("error:").red().bold(), style(other).red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use copybench_types::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_aliases_and_defaults() {
        let cli = Cli::try_parse_from(["copybench", "-s", "data", "-d", "scratch", "-f"]).unwrap();

        assert_eq!(cli.source_file, PathBuf::from("data"));
        assert_eq!(cli.destination_folder, PathBuf::from("scratch"));
        assert!(cli.force);
        assert_eq!(cli.tests_in_set, 3);
        assert_eq!(cli.high_water_mark.len(), DEFAULT_HIGH_WATER_MARKS.len());
    }

    #[test]
    fn cli_splits_comma_separated_high_water_marks() {
        let cli = Cli::try_parse_from([
            "copybench",
            "-s",
            "data",
            "-d",
            "scratch",
            "--high-water-mark",
            "50 kB,150 MB,1 GB",
        ])
        .unwrap();

        let parsed = parse_high_water_marks(&cli.high_water_mark).unwrap();
        assert_eq!(
            parsed,
            vec![50 * 1024, 150 * 1024 * 1024, 1024 * 1024 * 1024]
        );
    }

    #[test]
    fn missing_source_flag_is_a_usage_error() {
        assert!(Cli::try_parse_from(["copybench", "-d", "scratch"]).is_err());
    }

    #[test]
    fn malformed_high_water_mark_propagates_parse_error() {
        let error = parse_high_water_marks(&["not a value".to_string()]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn existing_destination_without_force_is_refused() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("scratch");
        std::fs::create_dir(&destination).unwrap();
        std::fs::write(destination.join("keep.txt"), b"untouched").unwrap();

        let error = prepare_destination(&destination, false, true)
            .await
            .unwrap_err();

        assert!(matches!(error, Error::DestinationExists { .. }));
        // the existing folder is left untouched
        assert!(destination.join("keep.txt").exists());
    }

    #[tokio::test]
    async fn force_deletes_and_recreates_destination() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("scratch");
        std::fs::create_dir(&destination).unwrap();
        std::fs::write(destination.join("stale.txt"), b"old").unwrap();

        prepare_destination(&destination, true, true).await.unwrap();

        assert!(destination.is_dir());
        assert!(!destination.join("stale.txt").exists());
    }

    #[tokio::test]
    async fn clean_up_removes_the_scratch_tree() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("scratch");
        std::fs::create_dir_all(destination.join("nested")).unwrap();
        std::fs::write(destination.join("nested/file.bin"), b"x").unwrap();

        clean_up(&destination, true).await.unwrap();

        assert!(!destination.exists());
    }
}
