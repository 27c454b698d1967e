//! Severity gate evaluated at every emit call

use super::log_level::LogLevel;
use std::sync::atomic::{AtomicU8, Ordering};

/// Returns true iff a message at `message` severity passes a `threshold`.
#[inline]
pub fn should_emit(message: LogLevel, threshold: LogLevel) -> bool {
    message <= threshold
}

/// Holds the current threshold.
///
/// The check happens on the caller's thread before anything is queued, so
/// changing the level never affects work that is already waiting in the pool.
#[derive(Debug)]
pub struct SeverityFilter {
    threshold: AtomicU8,
}

impl SeverityFilter {
    pub const fn new(level: LogLevel) -> Self {
        Self {
            threshold: AtomicU8::new(level as u8),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.threshold.store(level.as_u8(), Ordering::Release);
    }

    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        should_emit(level, self.level())
    }
}

impl Default for SeverityFilter {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}
