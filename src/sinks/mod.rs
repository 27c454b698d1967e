//! Sink implementations

pub mod console;
pub mod memory;
pub mod rotating_file;
pub mod writer;

pub use console::{ConsoleSink, ConsoleStream};
pub use memory::MemorySink;
pub use rotating_file::{RotatingFileSink, RotationPolicy, DEFAULT_MAX_AGE, DEFAULT_MAX_SIZE_MB};
pub use writer::WriterSink;

pub use crate::core::{Destination, Sink};

use crate::core::Result;
use std::path::Path;

impl Destination {
    pub fn stdout() -> Self {
        Destination::new(ConsoleSink::stdout())
    }

    pub fn stderr() -> Self {
        Destination::new(ConsoleSink::stderr())
    }

    /// Rotating file rotated at `max_size_mb`, rotated segments kept for one
    /// day and gzip-compressed, with no limit on their count
    pub fn rotating_file(path: impl AsRef<Path>, max_size_mb: u64) -> Result<Self> {
        Ok(Destination::new(RotatingFileSink::with_policy(
            path,
            RotationPolicy::daily_compressed(max_size_mb).with_unlimited_backups(),
        )?))
    }

    /// Rotating file rotated at `max_size_mb` that keeps every rotated
    /// segment, with neither age pruning nor compression
    pub fn size_rotated_file(path: impl AsRef<Path>, max_size_mb: u64) -> Result<Self> {
        Ok(Destination::new(RotatingFileSink::with_policy(
            path,
            RotationPolicy::new()
                .with_max_size_mb(max_size_mb)
                .with_unlimited_backups(),
        )?))
    }
}
