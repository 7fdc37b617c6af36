//! Progress reporting for long-running copy operations
//!
//! Strategies receive a [`ProgressSink`] handle and may publish textual
//! updates through it. The sink is write-only from the strategy's point of
//! view; updates are advisory and never drive control flow.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Write-only handle for reporting textual progress
pub trait ProgressSink: Send + Sync {
    /// Replace the currently displayed progress message.
    ///
    /// `animate` asks the sink to keep an activity indicator ticking while
    /// the message is shown; sinks without one ignore it.
    fn update_message(&self, message: &str, animate: bool);

    /// Mark the operation as finished, optionally replacing the message one
    /// last time.
    fn complete(&self, success: bool, final_message: Option<&str>);
}

/// Sink that discards every update
///
/// Used by tests and quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn update_message(&self, _message: &str, _animate: bool) {}

    fn complete(&self, _success: bool, _final_message: Option<&str>) {}
}

/// Wrapper that caps how often updates reach the inner sink
///
/// Copy loops can produce updates far faster than a terminal can usefully
/// display them. The first update always passes through; later ones are
/// dropped until the interval has elapsed. Completion always passes through.
pub struct RateLimitedProgress<'a> {
    inner: &'a dyn ProgressSink,
    interval: Duration,
    last_update: Mutex<Option<Instant>>,
}

impl<'a> RateLimitedProgress<'a> {
    /// Default update interval, roughly ten updates per second
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    /// Wrap a sink with the default interval
    pub fn new(inner: &'a dyn ProgressSink) -> Self {
        Self::with_interval(inner, Self::DEFAULT_INTERVAL)
    }

    /// Wrap a sink with a custom interval
    pub fn with_interval(inner: &'a dyn ProgressSink, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last_update: Mutex::new(None),
        }
    }
}

impl ProgressSink for RateLimitedProgress<'_> {
    fn update_message(&self, message: &str, animate: bool) {
        let now = Instant::now();
        {
            let mut last_update = self
                .last_update
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let due = last_update.map_or(true, |last| now.duration_since(last) >= self.interval);
            if !due {
                return;
            }
            *last_update = Some(now);
        }
        self.inner.update_message(message, animate);
    }

    fn complete(&self, success: bool, final_message: Option<&str>) {
        self.inner.complete(success, final_message);
    }
}
