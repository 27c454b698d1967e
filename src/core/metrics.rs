//! Logger metrics for observability
//!
//! Writes happen on worker threads after the emitting call has returned, so
//! the counters here are the only place sink failures and worker panics
//! become visible.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_submitted();
/// metrics.record_written(2);
///
/// assert_eq!(metrics.submitted(), 1);
/// assert_eq!(metrics.physical_writes(), 2);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Jobs handed to the dispatch pool
    submitted: AtomicU64,

    /// Messages rejected by the severity filter
    filtered: AtomicU64,

    /// Jobs a worker finished running (successfully or not)
    completed: AtomicU64,

    /// Lines written to a sink
    physical_writes: AtomicU64,

    /// Sink writes that returned an error
    write_failures: AtomicU64,

    /// Number of times a submitter had to wait for queue space
    block_events: AtomicU64,

    /// Jobs that panicked inside a worker
    panicked_jobs: AtomicU64,

    /// Jobs submitted after the queue disconnected
    rejected: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            physical_writes: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
            panicked_jobs: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn physical_writes(&self) -> u64 {
        self.physical_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn panicked_jobs(&self) -> u64 {
        self.panicked_jobs.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Jobs submitted but not yet finished by a worker
    pub fn in_flight(&self) -> u64 {
        self.submitted().saturating_sub(self.completed())
    }

    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_completed(&self) -> u64 {
        self.completed.fetch_add(1, Ordering::Release)
    }

    #[inline]
    pub fn record_written(&self, writes: u64) -> u64 {
        self.physical_writes.fetch_add(writes, Ordering::Relaxed)
    }

    /// Record a failed sink write, returning the previous failure count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_panic(&self) -> u64 {
        self.panicked_jobs.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate of physical writes as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.physical_writes() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.submitted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.completed.store(0, Ordering::Relaxed);
        self.physical_writes.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
        self.panicked_jobs.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted()),
            filtered: AtomicU64::new(self.filtered()),
            completed: AtomicU64::new(self.completed()),
            physical_writes: AtomicU64::new(self.physical_writes()),
            write_failures: AtomicU64::new(self.write_failures()),
            block_events: AtomicU64::new(self.block_events()),
            panicked_jobs: AtomicU64::new(self.panicked_jobs()),
            rejected: AtomicU64::new(self.rejected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.submitted(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.completed(), 0);
        assert_eq!(metrics.physical_writes(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.block_events(), 0);
        assert_eq!(metrics.panicked_jobs(), 0);
        assert_eq!(metrics.rejected(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_write_failure(), 0);
        assert_eq!(metrics.record_write_failure(), 1);
        assert_eq!(metrics.write_failures(), 2);
    }

    #[test]
    fn test_in_flight() {
        let metrics = LoggerMetrics::new();
        metrics.record_submitted();
        metrics.record_submitted();
        metrics.record_completed();
        assert_eq!(metrics.in_flight(), 1);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        metrics.record_written(90);
        for _ in 0..10 {
            metrics.record_write_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_submitted();
        metrics.record_block();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.submitted(), 0);
        assert_eq!(metrics.block_events(), 0);
        assert_eq!(snapshot.submitted(), 1);
        assert_eq!(snapshot.block_events(), 1);
    }
}
