//! Indicatif-backed progress sinks

use copybench_types::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Spinner-backed implementation of the benchmark's progress sink
pub struct SpinnerSink {
    bar: ProgressBar,
}

impl SpinnerSink {
    /// Create a ticking spinner showing `message`
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    /// Create a sink that renders nothing (quiet mode)
    pub fn hidden(message: &str) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_message(message.to_string());
        Self { bar }
    }
}

impl ProgressSink for SpinnerSink {
    fn update_message(&self, message: &str, animate: bool) {
        if animate {
            self.bar.enable_steady_tick(TICK_INTERVAL);
        }
        self.bar.set_message(message.to_string());
    }

    fn complete(&self, success: bool, final_message: Option<&str>) {
        let message = final_message.map(str::to_string);
        if success {
            match message {
                Some(message) => self.bar.finish_with_message(message),
                None => self.bar.finish(),
            }
        } else {
            self.bar
                .abandon_with_message(message.unwrap_or_else(|| "failed".to_string()));
        }
    }
}
