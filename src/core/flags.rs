//! Output flags controlling the header written before every message
//!
//! Bit values match the classic `log` package flags so configurations
//! carried over from other services keep their meaning.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::panic::Location;
use std::path::Path;

/// Header flag set
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::LogFlags;
///
/// let flags = LogFlags::STD | LogFlags::MICROSECONDS;
/// assert!(flags.contains(LogFlags::DATE));
/// assert!(!flags.contains(LogFlags::SHORT_FILE));
/// assert_eq!(flags.bits(), 7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogFlags(u32);

impl LogFlags {
    /// No header at all
    pub const NONE: LogFlags = LogFlags(0);
    /// Local date: `2009/01/23`
    pub const DATE: LogFlags = LogFlags(1);
    /// Local time: `01:23:23`
    pub const TIME: LogFlags = LogFlags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`, implies `TIME`
    pub const MICROSECONDS: LogFlags = LogFlags(1 << 2);
    /// Full file path and line number: `/a/b/c/main.rs:23`
    pub const LONG_FILE: LogFlags = LogFlags(1 << 3);
    /// Final file name element and line number: `main.rs:23`, overrides `LONG_FILE`
    pub const SHORT_FILE: LogFlags = LogFlags(1 << 4);
    /// Render date and time in UTC rather than the local zone
    pub const UTC: LogFlags = LogFlags(1 << 5);
    /// Move the prefix from the start of the line to just before the message
    pub const MSG_PREFIX: LogFlags = LogFlags(1 << 6);
    /// Date and time
    pub const STD: LogFlags = LogFlags(1 | 1 << 1);

    const ALL_BITS: u32 = (1 << 7) - 1;

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Build from raw bits, discarding unknown ones
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        LogFlags(bits & Self::ALL_BITS)
    }

    #[inline]
    pub const fn contains(&self, other: LogFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(&self, other: LogFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Append the header for these flags to `buf`.
    pub fn write_header(
        &self,
        buf: &mut String,
        timestamp: &DateTime<Utc>,
        location: Option<&Location<'static>>,
    ) {
        use std::fmt::Write;

        if self.intersects(LogFlags::DATE | LogFlags::TIME | LogFlags::MICROSECONDS) {
            if self.contains(LogFlags::UTC) {
                self.write_time(buf, timestamp);
            } else {
                self.write_time(buf, &timestamp.with_timezone(&Local));
            }
        }

        if self.intersects(LogFlags::SHORT_FILE | LogFlags::LONG_FILE) {
            match location {
                Some(location) => {
                    let file = if self.contains(LogFlags::SHORT_FILE) {
                        Path::new(location.file())
                            .file_name()
                            .and_then(|name| name.to_str())
                            .unwrap_or(location.file())
                    } else {
                        location.file()
                    };
                    let _ = write!(buf, "{}:{}: ", file, location.line());
                }
                None => buf.push_str("???:0: "),
            }
        }
    }

    fn write_time<Tz: chrono::TimeZone>(&self, buf: &mut String, timestamp: &DateTime<Tz>)
    where
        Tz::Offset: fmt::Display,
    {
        use std::fmt::Write;

        if self.contains(LogFlags::DATE) {
            let _ = write!(buf, "{} ", timestamp.format("%Y/%m/%d"));
        }
        if self.intersects(LogFlags::TIME | LogFlags::MICROSECONDS) {
            let _ = write!(buf, "{}", timestamp.format("%H:%M:%S"));
            if self.contains(LogFlags::MICROSECONDS) {
                let _ = write!(buf, "{}", timestamp.format("%.6f"));
            }
            buf.push(' ');
        }
    }
}

impl BitOr for LogFlags {
    type Output = LogFlags;

    fn bitor(self, rhs: LogFlags) -> LogFlags {
        LogFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogFlags {
    fn bitor_assign(&mut self, rhs: LogFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LogFlags {
    type Output = LogFlags;

    fn bitand(self, rhs: LogFlags) -> LogFlags {
        LogFlags(self.0 & rhs.0)
    }
}

impl From<u32> for LogFlags {
    fn from(bits: u32) -> Self {
        LogFlags::from_bits_truncate(bits)
    }
}
