//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    filter::SeverityFilter,
    flags::LogFlags,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    pool::{DispatchPool, PoolStats},
    sink::Destination,
    template,
    writer::LeveledWriterSet,
};
use std::fmt::{self, Display};
use std::io::Write;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

/// Caller depth used when a non-positive depth is configured
pub const DEFAULT_CALLER_DEPTH: usize = 2;

pub const DEFAULT_WORKERS: usize = 1;

pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Exit status used by [`Logger::fatal`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// Callback for write failures observed on a worker thread.
///
/// Receives the error and the total failure count so far.
pub type WriteErrorCallback = Arc<dyn Fn(&LoggerError, u64) + Send + Sync>;

/// Normalize a configured caller depth: anything `<= 0` becomes 2
pub fn normalize_caller_depth(depth: i64) -> usize {
    if depth <= 0 {
        DEFAULT_CALLER_DEPTH
    } else {
        usize::try_from(depth).unwrap_or(DEFAULT_CALLER_DEPTH)
    }
}

/// Leveled logger with asynchronous, fanned-out writes.
///
/// Emit calls check the level and render the message on the caller's thread,
/// then hand the write to a bounded worker pool. Each message that passes
/// is written twice: to the writer of its severity and to the standard
/// (console) writer.
///
/// Emit calls never fail and never panic. A full queue makes them wait.
pub struct Logger {
    filter: SeverityFilter,
    writers: Arc<LeveledWriterSet>,
    pool: DispatchPool,
    metrics: Arc<LoggerMetrics>,
    /// Stored for compatibility only. Call sites always come from
    /// `#[track_caller]` and do not depend on this value.
    caller_depth: usize,
    on_write_error: Option<WriteErrorCallback>,
}

impl Logger {
    /// Create a logger whose four severity writers share `destination`.
    ///
    /// The standard writer goes to stdout. A `caller_depth <= 0` is
    /// normalized to 2.
    ///
    /// # Errors
    ///
    /// Fails if `workers` or `queue_capacity` is zero or a worker thread
    /// cannot be spawned.
    pub fn new(
        destination: Destination,
        flags: LogFlags,
        workers: usize,
        queue_capacity: usize,
        caller_depth: i64,
    ) -> Result<Self> {
        Logger::builder()
            .destination(destination)
            .flags(flags)
            .workers(workers)
            .queue_capacity(queue_capacity)
            .caller_depth(caller_depth)
            .build()
    }

    /// Logger writing its severity output to stdout as well
    pub fn console(
        flags: LogFlags,
        workers: usize,
        queue_capacity: usize,
        caller_depth: i64,
    ) -> Result<Self> {
        Self::new(Destination::stdout(), flags, workers, queue_capacity, caller_depth)
    }

    /// Logger writing to a size-rotated file (one day retention, gzip)
    pub fn with_rotating_file(
        path: impl AsRef<Path>,
        max_size_mb: u64,
        flags: LogFlags,
        workers: usize,
        queue_capacity: usize,
        caller_depth: i64,
    ) -> Result<Self> {
        let destination = Destination::rotating_file(path, max_size_mb)?;
        Self::new(destination, flags, workers, queue_capacity, caller_depth)
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_leveled_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .workers(2)
    ///     .queue_capacity(1000)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.stats().capacity, 1000);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ------------------------------------------------------------------
    // Emit operations
    // ------------------------------------------------------------------

    /// Emit `args` at `level` if the current threshold allows it.
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.allows(level) {
            return;
        }
        let message = match args.as_str() {
            Some(s) => s.to_string(),
            None => fmt::format(args),
        };
        self.dispatch(LogRecord::new(level, message).with_location(Location::caller()));
    }

    #[inline]
    #[track_caller]
    pub fn log_error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn log_warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn log_info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn log_debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Emit a list of values separated by single spaces.
    ///
    /// The output equals the formatted variant with a `"{} {} ..."`
    /// template of matching length.
    #[track_caller]
    pub fn log_values(&self, level: LogLevel, values: &[&dyn Display]) {
        if !self.allows(level) {
            return;
        }
        let template = template::placeholder_template(values.len());
        let message = template::render(&template, values);
        self.dispatch(LogRecord::new(level, message).with_location(Location::caller()));
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, values: &[&dyn Display]) {
        self.log_values(LogLevel::Error, values);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, values: &[&dyn Display]) {
        self.log_values(LogLevel::Warn, values);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, values: &[&dyn Display]) {
        self.log_values(LogLevel::Info, values);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, values: &[&dyn Display]) {
        self.log_values(LogLevel::Debug, values);
    }

    /// Queue the message for the error and standard writers, write it to
    /// stderr directly, then exit the process with status 1.
    ///
    /// Runs regardless of the configured level. The queued write races the
    /// exit and may never reach its sink; only the stderr line is written
    /// before termination.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        let record =
            LogRecord::new(LogLevel::Error, fmt::format(args)).with_location(Location::caller());

        let mut line = String::with_capacity(record.message.len() + 32);
        LogFlags::STD.write_header(&mut line, &record.timestamp, record.location);
        line.push_str(&record.message);
        line.push('\n');

        self.dispatch(record);

        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
        std::process::exit(FATAL_EXIT_CODE)
    }

    fn allows(&self, level: LogLevel) -> bool {
        let allowed = self.filter.allows(level);
        if !allowed {
            self.metrics.record_filtered();
        }
        allowed
    }

    fn dispatch(&self, record: LogRecord) {
        let writers = Arc::clone(&self.writers);
        let metrics = Arc::clone(&self.metrics);
        let on_write_error = self.on_write_error.clone();

        self.pool.submit(Box::new(move || {
            Self::deliver(&writers, &record, &metrics, on_write_error.as_ref());
        }));
    }

    /// Runs on a worker thread. Failures are counted and reported here
    /// since the emitting call has long returned.
    fn deliver(
        writers: &LeveledWriterSet,
        record: &LogRecord,
        metrics: &LoggerMetrics,
        on_write_error: Option<&WriteErrorCallback>,
    ) {
        let report = writers.write_at(record);
        metrics.record_written(report.written as u64);

        for (sink, error) in &report.errors {
            let failures = metrics.record_write_failure() + 1;

            // Alert on first failure and periodically thereafter
            if failures == 1 || failures % 1000 == 0 {
                eprintln!(
                    "[LOGGER ERROR] Write to sink '{}' failed ({} failures so far): {}",
                    sink, failures, error
                );
            }
            if let Some(callback) = on_write_error {
                callback(error, failures);
            }
        }
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    /// Replace the threshold. Messages already queued are still written.
    pub fn set_level(&self, level: LogLevel) {
        self.filter.set_level(level);
    }

    /// Set the threshold by name; unrecognized names select `Info`.
    pub fn set_level_name(&self, name: &str) -> LogLevel {
        let level = LogLevel::from_name_or_default(name);
        self.set_level(level);
        level
    }

    pub fn level(&self) -> LogLevel {
        self.filter.level()
    }

    /// Prefix for the four severity writers (not the standard writer)
    pub fn set_prefix(&self, prefix: &str) {
        self.writers.set_prefix(prefix);
    }

    /// Flags for the four severity writers (not the standard writer)
    pub fn set_flags(&self, flags: LogFlags) {
        self.writers.set_flags(flags);
    }

    /// Re-point the severity writers to a size-rotated file.
    ///
    /// Unlike the constructor's file destination, this one neither prunes
    /// old segments by age nor compresses them.
    pub fn set_destination(&self, path: impl AsRef<Path>, max_size_mb: u64) -> Result<()> {
        let destination = Destination::size_rotated_file(path, max_size_mb)?;
        self.set_sink(destination);
        Ok(())
    }

    /// Re-point the severity writers to any sink
    pub fn set_sink(&self, destination: Destination) {
        self.writers.set_destination(destination);
    }

    /// Queue capacity and current length
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Configured caller depth (normalized).
    ///
    /// Has no effect on output: the file and line in headers are the
    /// `#[track_caller]` location of the emitting call, whatever this is set to.
    pub fn caller_depth(&self) -> usize {
        self.caller_depth
    }

    pub fn writers(&self) -> &LeveledWriterSet {
        &self.writers
    }

    /// Flush all destinations. Does not wait for queued messages.
    pub fn flush(&self) -> Result<()> {
        self.writers.flush()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let failures = self.metrics.write_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger dropped after {} failed writes (failure rate: {:.2}%)",
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Warn)
///     .destination(Destination::new(MemorySink::new()))
///     .flags(LogFlags::STD | LogFlags::MICROSECONDS)
///     .workers(1)
///     .queue_capacity(10)
///     .on_write_error(Arc::new(|err: &LoggerError, count: u64| {
///         eprintln!("write failure #{}: {}", count, err);
///     }))
///     .build()
///     .unwrap();
/// assert_eq!(logger.level(), LogLevel::Warn);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    destination: Option<Destination>,
    standard: Option<Destination>,
    flags: LogFlags,
    workers: usize,
    queue_capacity: usize,
    caller_depth: i64,
    prefix: Option<String>,
    on_write_error: Option<WriteErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            destination: None,
            standard: None,
            flags: LogFlags::STD,
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            caller_depth: DEFAULT_CALLER_DEPTH as i64,
            prefix: None,
            on_write_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Destination of the four severity writers (stdout if not set)
    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Destination of the standard writer (stdout if not set)
    #[must_use = "builder methods return a new value"]
    pub fn standard(mut self, destination: Destination) -> Self {
        self.standard = Some(destination);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: LogFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Stored and reported by [`Logger::caller_depth`]; `<= 0` becomes 2.
    /// Does not change the reported call site.
    #[must_use = "builder methods return a new value"]
    pub fn caller_depth(mut self, depth: i64) -> Self {
        self.caller_depth = depth;
        self
    }

    /// Replace the default `[Err] `-style tags of the severity writers
    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_write_error(mut self, callback: WriteErrorCallback) -> Self {
        self.on_write_error = Some(callback);
        self
    }

    /// Build the Logger, spawning its workers
    pub fn build(self) -> Result<Logger> {
        let metrics = Arc::new(LoggerMetrics::new());
        let pool = DispatchPool::new(self.workers, self.queue_capacity, Arc::clone(&metrics))?;

        let destination = self.destination.unwrap_or_else(Destination::stdout);
        let standard = self.standard.unwrap_or_else(Destination::stdout);
        let writers = LeveledWriterSet::new(destination, standard, self.flags);
        if let Some(prefix) = &self.prefix {
            writers.set_prefix(prefix);
        }

        Ok(Logger {
            filter: SeverityFilter::new(self.level),
            writers: Arc::new(writers),
            pool,
            metrics,
            caller_depth: normalize_caller_depth(self.caller_depth),
            on_write_error: self.on_write_error,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
