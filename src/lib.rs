//! # Rust Leveled Logger
//!
//! A leveled logging facility with asynchronous, bounded dispatch.
//!
//! ## Features
//!
//! - **Four severities**: error, warn, info and debug, filtered by a
//!   threshold that can change at runtime
//! - **Asynchronous writes**: a fixed pool of worker threads drains a bounded
//!   queue; a full queue blocks the caller instead of dropping messages
//! - **Fan-out**: every message goes to its severity writer and to a standard
//!   console mirror
//! - **Rotating files**: size-based rotation with age pruning and gzip
//!   compression of rotated segments
//! - **Default instance**: process-wide logger behind free functions
//!
//! ## Example
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//! use rust_leveled_logger::{error, info};
//!
//! let logger = Logger::console(LogFlags::STD, 1, 100, 2).unwrap();
//! logger.set_level(LogLevel::Warn);
//!
//! info!(logger, "not written");
//! error!(logger, "boom {}", 5);
//! logger.warn(&[&"disk", &91, &"%"]);
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Destination, LogFlags, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, PoolStats, Result, Sink, WriteErrorCallback,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, RotatingFileSink, RotationPolicy, WriterSink};
}

pub use crate::core::{
    Destination, LogFlags, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, PoolStats, Result, Sink, WriteErrorCallback,
};
pub use crate::sinks::{ConsoleSink, MemorySink, RotatingFileSink, RotationPolicy, WriterSink};
