//! File logging example
//!
//! Writes to a size-rotated file, then re-points the logger to a second
//! file at runtime.
//!
//! Run with: cargo run --example file_logging

use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{error, info};
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_leveled_logger_demo");
    let first = dir.join("app.log");
    let second = dir.join("app-redirected.log");

    let logger = Logger::with_rotating_file(
        &first,
        10,
        LogFlags::STD | LogFlags::MICROSECONDS,
        1,
        100,
        2,
    )?;

    for i in 0..5 {
        info!(logger, "File log entry {}", i);
    }
    error!(logger, "Something failed: {}", "disk quota");

    thread::sleep(Duration::from_millis(50));
    logger.set_destination(&second, 10)?;
    info!(logger, "Now writing to {}", second.display());

    thread::sleep(Duration::from_millis(50));
    logger.flush()?;

    println!("\nLogs written to:");
    println!("  {}", first.display());
    println!("  {}", second.display());

    // The same settings, loaded from JSON
    let config = LoggerConfig::from_json(&format!(
        r#"{{"level": "debug", "path": {:?}, "max_size_mb": 1, "compress": true}}"#,
        dir.join("configured.log").display().to_string()
    ))?;
    let configured = config.build()?;
    configured.log_debug(format_args!("configured logger at level {}", configured.level()));
    thread::sleep(Duration::from_millis(50));

    Ok(())
}
