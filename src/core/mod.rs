//! Core logger types and traits

pub mod config;
pub mod error;
pub mod filter;
pub mod flags;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod pool;
pub mod sink;
pub mod template;
pub mod writer;

pub use config::{LoggerConfig, DEFAULT_LOG_PATH, DEFAULT_LOG_SIZE_MB};
pub use error::{LoggerError, Result};
pub use filter::{should_emit, SeverityFilter};
pub use flags::LogFlags;
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{
    normalize_caller_depth, Logger, LoggerBuilder, WriteErrorCallback, DEFAULT_CALLER_DEPTH,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS, FATAL_EXIT_CODE,
};
pub use metrics::LoggerMetrics;
pub use pool::{DispatchPool, Job, PoolStats};
pub use sink::{Destination, Sink};
pub use writer::{FanOut, FanOutReport, LevelWriter, LeveledWriterSet, STANDARD_PREFIX};
