//! Process-wide default logger
//!
//! Created lazily on first use from [`LoggerConfig::default`], or installed
//! explicitly with [`init_default`] before anything logs. It lives until the
//! process exits.
//!
//! If the default logger cannot be built at all (no worker thread could be
//! spawned), every function here is a no-op.

use crate::core::{
    Destination, LogFlags, LogLevel, Logger, LoggerConfig, LoggerError, PoolStats, Result,
};
use std::fmt::{self, Display};
use std::path::Path;
use std::sync::OnceLock;

static DEFAULT: OnceLock<Option<Logger>> = OnceLock::new();

fn build_default() -> Option<Logger> {
    let config = LoggerConfig::default();
    let builder = match config.builder() {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!(
                "[LOGGER ERROR] Cannot open default log file, falling back to stderr: {}",
                e
            );
            Logger::builder()
                .level(config.log_level())
                .destination(Destination::stderr())
                .flags(config.flags)
                .workers(config.workers)
                .queue_capacity(config.queue_capacity)
                .caller_depth(config.caller_depth)
        }
    };

    match builder.build() {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("[LOGGER CRITICAL] Default logger unavailable: {}", e);
            None
        }
    }
}

/// Install `logger` as the default instance.
///
/// Must happen before the first use of any function in this module.
pub fn init_default(logger: Logger) -> Result<()> {
    DEFAULT
        .set(Some(logger))
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The default logger, creating it on first call
pub fn default_logger() -> Option<&'static Logger> {
    DEFAULT.get_or_init(build_default).as_ref()
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    if let Some(logger) = default_logger() {
        logger.log_error(args);
    }
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    if let Some(logger) = default_logger() {
        logger.log_warn(args);
    }
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    if let Some(logger) = default_logger() {
        logger.log_info(args);
    }
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    if let Some(logger) = default_logger() {
        logger.log_debug(args);
    }
}

#[track_caller]
pub fn error(values: &[&dyn Display]) {
    if let Some(logger) = default_logger() {
        logger.error(values);
    }
}

#[track_caller]
pub fn warn(values: &[&dyn Display]) {
    if let Some(logger) = default_logger() {
        logger.warn(values);
    }
}

#[track_caller]
pub fn info(values: &[&dyn Display]) {
    if let Some(logger) = default_logger() {
        logger.info(values);
    }
}

#[track_caller]
pub fn debug(values: &[&dyn Display]) {
    if let Some(logger) = default_logger() {
        logger.debug(values);
    }
}

/// Log through the default logger and exit with status 1.
///
/// Exits even when no default logger could be built.
#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) -> ! {
    match default_logger() {
        Some(logger) => logger.fatal(args),
        None => {
            eprintln!("{}", args);
            std::process::exit(crate::core::FATAL_EXIT_CODE)
        }
    }
}

pub fn set_destination(path: impl AsRef<Path>, max_size_mb: u64) -> Result<()> {
    match default_logger() {
        Some(logger) => logger.set_destination(path, max_size_mb),
        None => Ok(()),
    }
}

pub fn set_prefix(prefix: &str) {
    if let Some(logger) = default_logger() {
        logger.set_prefix(prefix);
    }
}

pub fn set_flags(flags: LogFlags) {
    if let Some(logger) = default_logger() {
        logger.set_flags(flags);
    }
}

pub fn set_level(level: LogLevel) {
    if let Some(logger) = default_logger() {
        logger.set_level(level);
    }
}

pub fn stats() -> Option<PoolStats> {
    default_logger().map(Logger::stats)
}

/// Set the default logger's level by name and announce it at warn level.
///
/// An empty name means "info". Unrecognized names select info but are
/// echoed back unchanged.
#[track_caller]
pub fn set_log_level(name: &str) -> String {
    let name = if name.is_empty() { "info" } else { name };
    if let Some(logger) = default_logger() {
        logger.set_level_name(name);
        logger.log_warn(format_args!("Set Log Level as {}", name));
    }
    name.to_string()
}
