//! In-memory sink, mostly for tests and diagnostics

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Collects written lines in a shared buffer.
///
/// Clones observe the same buffer, so a test can keep one handle while the
/// logger owns another.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::sinks::MemorySink;
/// use rust_leveled_logger::Sink;
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writer.write_line(b"[Inf] hello\n").unwrap();
/// assert_eq!(sink.lines(), vec!["[Inf] hello"]);
/// ```
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
    writes: Arc<Mutex<usize>>,
    fail: Arc<AtomicBool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    /// Number of successful `write_line` calls
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }

    /// Make subsequent writes fail, to exercise error accounting
    pub fn fail_writes(&self, fail: bool) {
        self.fail.store(fail, Ordering::Release);
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
        *self.writes.lock() = 0;
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        if self.fail.load(Ordering::Acquire) {
            return Err(LoggerError::writer("memory sink configured to fail"));
        }
        self.buffer.lock().extend_from_slice(line);
        *self.writes.lock() += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
