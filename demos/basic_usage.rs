//! Basic logger usage example
//!
//! Demonstrates console logging, severity and detail filters, the enabled
//! latch and a custom handler.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_facade::prelude::*;
use rust_logger_facade::{debug, error, fatal, info, trace, warn};

fn main() -> Result<()> {
    println!("=== Rust Logger Facade - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level(LevelFilter::TRACE)
        .console("%H:%M:%S")
        .build()?;

    println!("1. Logging at different levels:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    fatal!(logger, "This is a fatal message");

    println!("\n2. Warning and above only:");
    logger.set_level(LevelFilter::WARNING);
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");

    println!("\n3. Detail presets:");
    logger.set_level(LevelFilter::TRACE);
    for (name, details) in [
        ("all", DetailsFilter::ALL),
        ("without source", DetailsFilter::MESSAGE_WITHOUT_SOURCE_CODE),
        ("message with level", DetailsFilter::MESSAGE_WITH_LEVEL),
        ("message only", DetailsFilter::MESSAGE_ONLY),
    ] {
        logger.set_details(details);
        info!(logger, "details preset: {}", name);
    }

    println!("\n4. Locked output:");
    logger.lock();
    error!(logger, "Error while locked (hidden)");
    logger.unlock();
    info!(logger, "Unlocked again");

    println!("\n5. Custom handler:");
    logger.add_handler("stderr", |message, _details| {
        eprintln!("custom handler got: {}", message.text());
    });
    info!(logger, "Delivered to both destinations");

    let metrics = logger.metrics();
    println!(
        "\nwritten={} filtered={} suppressed={}",
        metrics.written_count(),
        metrics.filtered_count(),
        metrics.suppressed_count()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
