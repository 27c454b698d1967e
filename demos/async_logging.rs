//! Asynchronous logging example
//!
//! Several producer threads share one logger. A small queue makes producers
//! wait for the workers instead of dropping messages.
//!
//! Run with: cargo run --example async_logging

use rust_leveled_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - Async Logging Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .level(LogLevel::Info)
            .destination(Destination::new(WriterSink::new("null", std::io::sink())))
            .standard(Destination::new(WriterSink::new("null", std::io::sink())))
            .workers(4)
            .queue_capacity(16)
            .on_write_error(Arc::new(|err: &LoggerError, count: u64| {
                eprintln!("write failure #{}: {}", count, err);
            }))
            .build()?,
    );

    let start = Instant::now();
    let handles: Vec<_> = (0..4)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..2500 {
                    logger.log_info(format_args!("producer {} message {}", id, i));
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    while logger.metrics().in_flight() > 0 {
        thread::sleep(Duration::from_millis(1));
    }

    let metrics = logger.metrics();
    println!("Logged {} messages in {:?}", metrics.completed(), start.elapsed());
    println!("Physical writes: {}", metrics.physical_writes());
    println!("Producers blocked on a full queue {} times", metrics.block_events());

    Ok(())
}
