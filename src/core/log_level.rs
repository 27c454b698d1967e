//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered from least to most verbose.
///
/// A message is emitted when its level is less than or equal to the
/// configured threshold, so `Error` always passes and `Debug` only passes
/// when the logger is at its most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// All levels, least verbose first
    pub const ALL: [LogLevel; 4] = [LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Default line prefix of the writer for this level
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Error => "[Err] ",
            LogLevel::Warn => "[War] ",
            LogLevel::Info => "[Inf] ",
            LogLevel::Debug => "[Deb] ",
        }
    }

    #[inline]
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`LogLevel::as_u8`]; values above 3 saturate to `Debug`
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Parse a level name, falling back to `Info` for anything unrecognized.
    ///
    /// ```
    /// use rust_leveled_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::from_name_or_default("DEBUG"), LogLevel::Debug);
    /// assert_eq!(LogLevel::from_name_or_default("BADVALUE"), LogLevel::Info);
    /// assert_eq!(LogLevel::from_name_or_default(""), LogLevel::Info);
    /// ```
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
