//! Metrics instrumentation for autodns.
//!
//! All metrics are prefixed with `autodns.`

use metrics::{counter, histogram};
use std::time::Instant;

/// Record one sync invocation.
pub fn record_sync(result: SyncResult, duration: std::time::Duration) {
    let result_str = match result {
        SyncResult::Upserted => "upserted",
        SyncResult::Deleted => "deleted",
        SyncResult::SkippedUntagged => "skipped_untagged",
        SyncResult::SkippedState => "skipped_state",
        SyncResult::Failed => "failed",
    };

    counter!("autodns.sync.count", "result" => result_str).increment(1);
    histogram!("autodns.sync.duration.seconds").record(duration.as_secs_f64());
}

/// Sync result classes for metrics.
#[derive(Debug, Clone, Copy)]
pub enum SyncResult {
    /// Record upserted.
    Upserted,
    /// Record deleted (or already absent).
    Deleted,
    /// Instance had no usable dns tag.
    SkippedUntagged,
    /// Event state outside the handled set.
    SkippedState,
    /// Invocation failed.
    Failed,
}

/// Record a sync failure by error kind.
pub fn record_failure(kind: &'static str) {
    counter!("autodns.sync.error.count", "kind" => kind).increment(1);
}

/// Record a Route 53 change submission.
pub fn record_change(operation: &'static str) {
    counter!("autodns.route53.change.count", "operation" => operation).increment(1);
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer start.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}
