//! Basic logger usage example
//!
//! Demonstrates the default console logger, level gating and labels.
//!
//! Run with: cargo run --example basic_usage

use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - Basic Usage Example ===\n");

    // Info level, "[${level}] ${labels} ${msg}", timestamped lines on stderr
    let logger = Logger::new();

    println!("1. Logging at different levels (trace and debug are gated):");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.notice("This is a notice");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Raising verbosity returns a new logger:");
    let verbose = logger.with_level(LogLevel::Trace);
    verbose.trace("Trace message (visible)");
    verbose.debug("Debug message (visible)");
    logger.debug("Debug message on the original (hidden)");

    println!("\n3. Arguments and formatting:");
    logger.info(("items=", 3, " elapsed=", 1.5));
    info!(logger, "Listening on port {}", 8080);
    warn!(logger, "Disk usage at {}%", 91);

    println!("\n4. Labels:");
    let request = logger.with_labels(["request:42", "user:alice"]);
    request.info("Handling request");
    request
        .with_labels_format("{${labels}}")
        .with_label_separator(",")
        .info("Same request, different label style");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
