//! Console output for the benchmark session

use console::style;
use copybench_engine::{BenchObserver, RunResult};
use copybench_types::{format_bytes, format_throughput, NullProgressSink, ProgressSink, SourceInfo};

use crate::progress::SpinnerSink;

/// Print the session banner: what is being copied and where we run
pub fn print_banner(source: &SourceInfo) {
    println!();
    println!(
        "{}",
        style(format!(
            "Copying '{}' ({})",
            source.name,
            format_bytes(source.total_size)
        ))
        .blue()
    );
    if !source.is_file {
        println!("{}", style(format!("{} files", source.file_count())).blue());
    }
    println!(
        "{}",
        style(format!(
            "Running platform: {} ({} cpus)",
            std::env::consts::OS,
            num_cpus::get()
        ))
        .blue()
    );
    println!();
}

/// Observer that renders strategy headers, run spinners, and set summaries
pub struct ConsoleObserver {
    quiet: bool,
}

impl ConsoleObserver {
    /// Create an observer; quiet mode suppresses all output
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl BenchObserver for ConsoleObserver {
    fn strategy_started(&self, name: &str, description: &str) {
        if self.quiet {
            return;
        }
        println!("{}", style(name).blue());
        println!("{}", style(description).yellow());
    }

    fn run_started(&self, label: &str) -> Box<dyn ProgressSink> {
        if self.quiet {
            Box::new(NullProgressSink)
        } else {
            Box::new(SpinnerSink::new(label))
        }
    }

    fn strategy_finished(&self, result: &RunResult, total_bytes: u64) {
        if self.quiet {
            return;
        }
        println!(
            "{}",
            style(format!(
                "{} Average: {:.1}s ({}) Best: {:.1}s ({})",
                result.name,
                result.average,
                format_throughput(result.average_throughput(total_bytes)),
                result.best,
                format_throughput(result.best_throughput(total_bytes)),
            ))
            .blue()
        );
        println!();
    }
}
