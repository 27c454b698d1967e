//! Log record captured at the call site

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::panic::Location;

/// A message that passed the severity gate.
///
/// The text is rendered before the record is queued; workers only add the
/// per-writer prefix and header.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub location: Option<&'static Location<'static>>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Drops a single trailing newline, then replaces newlines, carriage
    /// returns, and tabs with escape sequences so one record is one line.
    fn sanitize_message(message: &str) -> String {
        let message = message.strip_suffix('\n').unwrap_or(message);
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
