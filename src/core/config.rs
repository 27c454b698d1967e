//! Logger configuration
//!
//! A serializable description of a logger, loadable from JSON. The default
//! value is the configuration of the process-wide default logger.

use super::error::{LoggerError, Result};
use super::flags::LogFlags;
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerBuilder};
use crate::sinks::{Destination, RotatingFileSink, RotationPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LOG_PATH: &str = "/tmp/message";

pub const DEFAULT_LOG_SIZE_MB: u64 = 512;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Threshold name; unrecognized names select `info`
    pub level: String,
    /// Log file. `None` writes the severity output to stdout.
    pub path: Option<PathBuf>,
    pub max_size_mb: u64,
    /// Age after which rotated segments are deleted
    pub max_age_days: Option<u64>,
    /// Rotated segments to keep; `None` keeps all of them
    pub max_backups: Option<usize>,
    pub compress: bool,
    pub flags: LogFlags,
    pub workers: usize,
    pub queue_capacity: usize,
    pub caller_depth: i64,
    pub prefix: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info.to_str().to_string(),
            path: Some(PathBuf::from(DEFAULT_LOG_PATH)),
            max_size_mb: DEFAULT_LOG_SIZE_MB,
            max_age_days: Some(1),
            max_backups: None,
            compress: true,
            flags: LogFlags::STD | LogFlags::MICROSECONDS,
            workers: 1,
            queue_capacity: 100,
            caller_depth: 1,
            prefix: None,
        }
    }
}

impl LoggerConfig {
    /// Console-only configuration with the default pool settings
    pub fn console() -> Self {
        Self {
            path: None,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading config", path.display().to_string(), e)
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(LoggerError::config("workers", "must be at least 1"));
        }
        if self.queue_capacity == 0 {
            return Err(LoggerError::config("queue_capacity", "must be at least 1"));
        }
        if self.max_backups == Some(0) {
            return Err(LoggerError::config("max_backups", "must be at least 1"));
        }
        Ok(())
    }

    /// Threshold derived from `level`
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_name_or_default(&self.level)
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        let mut policy = RotationPolicy::new()
            .with_max_size_mb(self.max_size_mb)
            .with_compression(self.compress);
        if let Some(count) = self.max_backups {
            policy = policy.with_max_backups(count);
        }
        if let Some(days) = self.max_age_days {
            // Huge ages saturate to "never expires"
            policy = policy.with_max_age(Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)));
        }
        policy
    }

    /// Builder preloaded with this configuration. Opens the log file.
    pub fn builder(&self) -> Result<LoggerBuilder> {
        self.validate()?;
        let destination = match &self.path {
            Some(path) => {
                Destination::new(RotatingFileSink::with_policy(path, self.rotation_policy())?)
            }
            None => Destination::stdout(),
        };

        let mut builder = Logger::builder()
            .level(self.log_level())
            .destination(destination)
            .flags(self.flags)
            .workers(self.workers)
            .queue_capacity(self.queue_capacity)
            .caller_depth(self.caller_depth);
        if let Some(prefix) = &self.prefix {
            builder = builder.prefix(prefix.clone());
        }
        Ok(builder)
    }

    pub fn build(&self) -> Result<Logger> {
        self.builder()?.build()
    }
}
