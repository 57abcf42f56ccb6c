//! File logging example
//!
//! Demonstrates writing lines to a file sink with a custom prefix.
//!
//! Run with: cargo run --example file_logging

use rust_leveled_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - File Logging Example ===\n");

    let sink = FileSink::new("application.log")?.with_prefix(LinePrefix {
        timestamp: TimestampFormat::Iso8601Micros,
        utc: true,
        caller: CallerInfo::Short,
    });

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .format("${level} | ${labels} | ${msg}")
        .labels(["app:demo"])
        .upper_case_names()
        .sink(Arc::new(sink))
        .build();

    println!("1. Logging to 'application.log':");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    let worker = logger.with_labels(["worker:1"]);
    for i in 1..=5 {
        worker.infof(format_args!("Processing item {}/5", i));
        if i == 3 {
            worker.warn("Item 3 took longer than expected");
        }
    }

    logger.info("All operations completed");
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
