//! Basic logger usage example
//!
//! Demonstrates console logging, the four levels, and changing the level at
//! runtime.
//!
//! Run with: cargo run --example basic_usage

use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{debug, error, info, warn};
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - Basic Usage Example ===\n");

    let logger = Logger::console(LogFlags::STD | LogFlags::SHORT_FILE, 1, 100, 2)?;
    logger.set_level(LogLevel::Debug);

    println!("1. Logging at different levels:");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    settle();

    println!("\n2. Value lists:");
    logger.info(&[&"user", &42, &"logged in"]);
    settle();

    println!("\n3. Raising the threshold to warn:");
    logger.set_level_name("warn");
    info!(logger, "This info message is filtered out");
    warn!(logger, "This warning still shows");
    settle();

    println!("\n4. Custom prefix:");
    logger.set_prefix("[demo] ");
    error!(logger, "Prefixed error, code {}", 500);
    settle();

    let stats = logger.stats();
    println!("\nQueue: {}/{} with {} worker(s)", stats.length, stats.capacity, stats.workers);
    println!("Messages written: {}", logger.metrics().completed());

    Ok(())
}

// Writes are asynchronous; give the worker a moment so output stays in order
fn settle() {
    thread::sleep(Duration::from_millis(50));
}
