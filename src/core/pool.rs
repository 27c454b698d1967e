//! Bounded dispatch pool
//!
//! A fixed set of worker threads consuming from one bounded FIFO queue of
//! boxed closures. Submitting to a full queue blocks the submitter until a
//! worker frees a slot; nothing is ever dropped and the queue never grows.
//!
//! Ordering: jobs leave the queue in the order they entered it. With more
//! than one worker, jobs run concurrently and may *finish* in any order; only
//! a single-worker pool completes jobs in submission order.
//!
//! There is no drain or shutdown operation. Dropping the pool disconnects
//! the queue; workers finish whatever was already queued and exit on their
//! own, and nobody waits for them.

use super::error::{LoggerError, Result};
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::Arc;
use std::thread;

/// A zero-argument unit of work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Point-in-time view of queue pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub capacity: usize,
    pub length: usize,
    pub workers: usize,
}

impl PoolStats {
    pub fn is_full(&self) -> bool {
        self.length >= self.capacity
    }
}

pub struct DispatchPool {
    sender: Sender<Job>,
    capacity: usize,
    workers: usize,
    metrics: Arc<LoggerMetrics>,
}

impl DispatchPool {
    /// Spawn `workers` threads sharing a queue of `capacity` jobs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if either count is zero and
    /// `WorkerSpawn` if the OS refuses a thread.
    pub fn new(workers: usize, capacity: usize, metrics: Arc<LoggerMetrics>) -> Result<Self> {
        if workers == 0 {
            return Err(LoggerError::config(
                "DispatchPool",
                "worker count must be at least 1",
            ));
        }
        if capacity == 0 {
            return Err(LoggerError::config(
                "DispatchPool",
                "queue capacity must be at least 1",
            ));
        }

        let (sender, receiver) = bounded::<Job>(capacity);

        for index in 0..workers {
            let receiver = receiver.clone();
            let metrics = Arc::clone(&metrics);
            thread::Builder::new()
                .name(format!("log-dispatch-{}", index))
                .spawn(move || Self::worker_loop(index, receiver, metrics))
                .map_err(|e| LoggerError::worker_spawn(index, e))?;
        }

        Ok(Self {
            sender,
            capacity,
            workers,
            metrics,
        })
    }

    /// Worker body: take one job, run it, repeat until the queue disconnects.
    ///
    /// Each job runs under `catch_unwind` so a panicking job costs one message,
    /// not a worker.
    fn worker_loop(index: usize, receiver: Receiver<Job>, metrics: Arc<LoggerMetrics>) {
        while let Ok(job) = receiver.recv() {
            if let Err(panic_info) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(job)) {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                metrics.record_panic();
                eprintln!(
                    "[LOGGER CRITICAL] Dispatch worker #{} job panicked: {}. \
                     Worker continues.",
                    index, panic_msg
                );
            }
            metrics.record_completed();
        }
    }

    /// Enqueue a job, blocking while the queue is full.
    pub fn submit(&self, job: Job) {
        self.metrics.record_submitted();

        match self.sender.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => {
                self.metrics.record_block();
                // send() blocks until a worker frees a slot
                if self.sender.send(job).is_err() {
                    self.reject();
                }
            }
            Err(TrySendError::Disconnected(_)) => self.reject(),
        }
    }

    fn reject(&self) {
        // Keep in_flight() honest: a rejected job will never complete
        self.metrics.record_rejected();
        self.metrics.record_completed();
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity,
            length: self.sender.len(),
            workers: self.workers,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}
