//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The message is
//! only rendered when the logger's threshold lets it through.
//!
//! # Examples
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//! use rust_leveled_logger::info;
//!
//! let logger = Logger::builder().build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```
//!
//! The `*f!` variants write through the process-wide default logger:
//!
//! ```no_run
//! use rust_leveled_logger::warnf;
//!
//! warnf!("disk usage at {}%", 91);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use rust_leveled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().level(LogLevel::Debug).build().unwrap();
/// use rust_leveled_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use rust_leveled_logger::warn;
/// warn!(logger, "Memory usage high: {}%", 85);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log an error-level message and terminate the process with status 1.
///
/// Bypasses the threshold.
///
/// ```no_run
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use rust_leveled_logger::fatal;
/// fatal!(logger, "cannot bind {}", "0.0.0.0:80");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::global::errorf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::global::warnf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::global::infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::global::debugf(::std::format_args!($($arg)+))
    };
}

/// Fatal through the default logger
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::global::fatal(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::sinks::MemorySink;
    use std::time::{Duration, Instant};

    fn settle(logger: &Logger, completed: u64) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while logger.metrics().completed() < completed && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_level_macros() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .level(LogLevel::Debug)
            .destination(Destination::new(sink.clone()))
            .standard(Destination::new(MemorySink::new()))
            .flags(LogFlags::NONE)
            .workers(1)
            .build()
            .unwrap();

        crate::error!(logger, "e{}", 1);
        crate::warn!(logger, "w{}", 2);
        crate::info!(logger, "i{}", 3);
        crate::debug!(logger, "d{}", 4);
        crate::log!(logger, LogLevel::Info, "plain");

        settle(&logger, 5);
        assert_eq!(
            sink.lines(),
            vec!["[Err] e1", "[War] w2", "[Inf] i3", "[Deb] d4", "[Inf] plain"]
        );
    }

    #[test]
    fn test_macro_records_invocation_site() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .destination(Destination::new(sink.clone()))
            .standard(Destination::new(MemorySink::new()))
            .flags(LogFlags::SHORT_FILE)
            .build()
            .unwrap();

        crate::info!(logger, "here");
        settle(&logger, 1);
        assert!(sink.lines()[0].starts_with("[Inf] macros.rs:"));
    }
}
