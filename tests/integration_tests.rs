//! Integration tests for the leveled logger
//!
//! These tests verify:
//! - Threshold filtering at call time
//! - Fan-out to the severity and standard writers
//! - Formatted and value variants producing identical output
//! - Runtime reconfiguration of destination, prefix and flags
//! - Rotating file destinations
//! - Fatal termination

use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{error, info};
use std::fs;
use std::process::Command;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const FATAL_CHILD_ENV: &str = "LEVELED_LOGGER_FATAL_CHILD";

fn wait_for_completed(logger: &Logger, count: u64) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while logger.metrics().completed() < count {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {} jobs ({} completed)",
            count,
            logger.metrics().completed()
        );
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn memory_logger(level: LogLevel, workers: usize, capacity: usize) -> (Logger, MemorySink, MemorySink) {
    let sink = MemorySink::new();
    let standard = MemorySink::new();
    let logger = Logger::builder()
        .level(level)
        .destination(Destination::new(sink.clone()))
        .standard(Destination::new(standard.clone()))
        .flags(LogFlags::NONE)
        .workers(workers)
        .queue_capacity(capacity)
        .build()
        .expect("Failed to build logger");
    (logger, sink, standard)
}

#[test]
fn test_warn_threshold_scenario() {
    let (logger, sink, standard) = memory_logger(LogLevel::Warn, 1, 10);

    logger.log_info(format_args!("hello"));
    assert_eq!(logger.stats().length, 0);
    assert_eq!(logger.metrics().submitted(), 0);

    error!(logger, "boom {}", 5);
    wait_for_completed(&logger, 1);

    assert_eq!(sink.lines(), vec!["[Err] boom 5"]);
    assert_eq!(standard.lines(), vec!["[Std] boom 5"]);
}

#[test]
fn test_every_dispatched_message_written_twice() {
    let (logger, sink, standard) = memory_logger(LogLevel::Debug, 2, 16);

    for level in LogLevel::ALL {
        logger.log(level, format_args!("at {}", level));
    }
    wait_for_completed(&logger, 4);

    assert_eq!(logger.metrics().physical_writes(), 8);
    assert_eq!(sink.write_count(), 4);
    assert_eq!(standard.write_count(), 4);
}

#[test]
fn test_level_change_not_retroactive() {
    // Block the single worker so the first message stays queued
    let gate = std::sync::Arc::new(std::sync::Barrier::new(2));
    let (logger, sink, _standard) = memory_logger(LogLevel::Info, 1, 10);

    logger.set_sink(Destination::new(GatedSink {
        inner: sink.clone(),
        gate: std::sync::Arc::clone(&gate),
        gated: true,
    }));
    logger.log_info(format_args!("queued before the change"));
    logger.set_level(LogLevel::Error);
    logger.log_info(format_args!("filtered after the change"));

    gate.wait();
    wait_for_completed(&logger, 1);

    assert_eq!(sink.lines(), vec!["[Inf] queued before the change"]);
    assert_eq!(logger.metrics().filtered(), 1);
}

#[test]
fn test_bad_level_name_falls_back_to_info() {
    let (logger, _sink, _standard) = memory_logger(LogLevel::Error, 1, 10);
    assert_eq!(logger.set_level_name("BADVALUE"), LogLevel::Info);
    assert_eq!(logger.level(), LogLevel::Info);
}

#[test]
fn test_value_variant_equals_formatted_variant() {
    let (logger, sink, standard) = memory_logger(LogLevel::Debug, 1, 10);

    logger.error(&[&"x", &1, &"y"]);
    logger.log_error(format_args!("{} {} {}", "x", 1, "y"));
    wait_for_completed(&logger, 2);

    let lines = sink.lines();
    assert_eq!(lines[0], lines[1]);
    let mirrored = standard.lines();
    assert_eq!(mirrored[0], mirrored[1]);
    assert_eq!(mirrored[0], "[Std] x 1 y");
}

#[test]
fn test_prefix_and_flags_apply_to_severity_writers_only() {
    let (logger, sink, standard) = memory_logger(LogLevel::Info, 1, 10);

    logger.set_prefix("[svc] ");
    logger.set_flags(LogFlags::SHORT_FILE | LogFlags::MSG_PREFIX);
    info!(logger, "ready");
    wait_for_completed(&logger, 1);

    let line = &sink.lines()[0];
    assert!(line.starts_with("integration_tests.rs:"), "got {}", line);
    assert!(line.ends_with(": [svc] ready"), "got {}", line);
    assert_eq!(standard.lines(), vec!["[Std] ready"]);
}

#[test]
fn test_multiline_message_stays_on_one_line() {
    let (logger, sink, _standard) = memory_logger(LogLevel::Info, 1, 10);

    logger.log_warn(format_args!("User login\nERROR fake entry"));
    wait_for_completed(&logger, 1);

    assert_eq!(sink.lines(), vec!["[War] User login\\nERROR fake entry"]);
}

#[test]
fn test_set_destination_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("redirected.log");
    let (logger, sink, standard) = memory_logger(LogLevel::Info, 1, 10);

    info!(logger, "to memory");
    wait_for_completed(&logger, 1);

    logger.set_destination(&log_file, 10).expect("Failed to open file");
    info!(logger, "to file");
    wait_for_completed(&logger, 2);

    assert_eq!(sink.lines(), vec!["[Inf] to memory"]);
    assert_eq!(standard.lines().len(), 2);
    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "[Inf] to file\n");
}

#[test]
fn test_set_destination_keeps_every_rotated_segment() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("kept.log");
    let (logger, _sink, _standard) = memory_logger(LogLevel::Info, 1, 64);

    // 1 MB limit; about 7.5 MB of output rotates seven times
    logger.set_destination(&log_file, 1).expect("Failed to open file");
    let payload = "x".repeat(1000);
    for i in 0..7500 {
        logger.log_info(format_args!("{:04} {}", i, payload));
    }
    wait_for_completed(&logger, 7500);
    logger.flush().expect("Failed to flush");

    for index in 1..=7 {
        let backup = temp_dir.path().join(format!("kept.log.{}", index));
        assert!(backup.exists(), "missing {}", backup.display());
    }
    assert!(!temp_dir.path().join("kept.log.1.gz").exists());

    let oldest = fs::read_to_string(temp_dir.path().join("kept.log.7")).expect("read backup");
    assert!(oldest.starts_with("[Inf] 0000 "));
}

#[test]
fn test_rotating_file_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let policy = RotationPolicy::new().with_max_size(64).with_max_backups(2);
    let logger = Logger::builder()
        .destination(Destination::new(
            RotatingFileSink::with_policy(&log_file, policy).expect("Failed to create sink"),
        ))
        .standard(Destination::new(MemorySink::new()))
        .flags(LogFlags::NONE)
        .build()
        .expect("Failed to build logger");

    for i in 0..10 {
        logger.log_info(format_args!("message number {:02} padded to rotate", i));
    }
    wait_for_completed(&logger, 10);
    logger.flush().expect("Failed to flush");

    assert!(log_file.exists());
    assert!(temp_dir.path().join("app.log.1").exists());
    assert!(temp_dir.path().join("app.log.2").exists());
    assert!(!temp_dir.path().join("app.log.3").exists());

    let current = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(current.ends_with("message number 09 padded to rotate\n"));
}

#[test]
fn test_with_rotating_file_constructor() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("nested").join("service.log");

    let logger = Logger::with_rotating_file(&log_file, 1, LogFlags::STD, 1, 10, 0)
        .expect("Failed to create logger");
    assert_eq!(logger.caller_depth(), 2);
    assert!(log_file.exists());
}

#[test]
fn test_config_built_logger_writes_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");
    let json = format!(
        r#"{{"level": "warn", "path": {:?}, "flags": 0, "prefix": "[cfg] "}}"#,
        log_file.to_str().expect("utf-8 path")
    );

    let config = LoggerConfig::from_json(&json).expect("Failed to parse config");
    let logger = config
        .builder()
        .expect("Failed to open file")
        .standard(Destination::new(MemorySink::new()))
        .build()
        .expect("Failed to build logger");

    logger.log_info(format_args!("dropped"));
    logger.log_warn(format_args!("kept"));
    wait_for_completed(&logger, 1);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "[cfg] kept\n");
}

#[test]
fn test_header_contains_date_and_time() {
    let (logger, sink, _standard) = memory_logger(LogLevel::Info, 1, 10);
    logger.set_flags(LogFlags::STD | LogFlags::MICROSECONDS);
    logger.log_info(format_args!("stamped"));
    wait_for_completed(&logger, 1);

    // [Inf] YYYY/MM/DD HH:MM:SS.uuuuuu stamped
    let line = &sink.lines()[0];
    let header = line
        .strip_prefix("[Inf] ")
        .and_then(|rest| rest.strip_suffix(" stamped"))
        .expect("unexpected line layout");
    assert_eq!(header.len(), "2026/10/19 12:00:00.123456".len());
    assert_eq!(&header[4..5], "/");
    assert_eq!(&header[10..11], " ");
    assert_eq!(&header[19..20], ".");
}

#[test]
fn test_fatal_exits_with_status_one() {
    if std::env::var_os(FATAL_CHILD_ENV).is_some() {
        let logger = Logger::builder()
            .level(LogLevel::Error)
            .destination(Destination::new(MemorySink::new()))
            .standard(Destination::new(MemorySink::new()))
            .build()
            .expect("Failed to build logger");
        logger.fatal(format_args!("unrecoverable: {}", "disk gone"));
    }

    let exe = std::env::current_exe().expect("Failed to locate test binary");
    let output = Command::new(exe)
        .args(["--exact", "test_fatal_exits_with_status_one", "--nocapture"])
        .env(FATAL_CHILD_ENV, "1")
        .output()
        .expect("Failed to run child");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecoverable: disk gone"), "stderr: {}", stderr);
}

/// Sink that holds its first write until the test releases it
struct GatedSink {
    inner: MemorySink,
    gate: std::sync::Arc<std::sync::Barrier>,
    gated: bool,
}

impl Sink for GatedSink {
    fn write_line(&mut self, line: &[u8]) -> rust_leveled_logger::Result<()> {
        if self.gated {
            self.gated = false;
            self.gate.wait();
        }
        self.inner.write_line(line)
    }

    fn flush(&mut self) -> rust_leveled_logger::Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        "gated"
    }
}
