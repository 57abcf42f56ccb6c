//! Derived loggers example
//!
//! Demonstrates configuring a logger from JSON, resolving a level by name,
//! passing loggers through a context and recovering from a panic-level call.
//!
//! Run with: cargo run --example derived_loggers

use rust_leveled_logger::prelude::*;

fn handle_request(ctx: &Context, id: u32) -> Result<()> {
    let logger = context::from_context(ctx)?.with_labels([format!("request:{}", id)]);
    logger.debugf(format_args!("parsing request {}", id));
    logger.info("request handled");
    Ok(())
}

fn nested_work() {
    if let Ok(logger) = context::current() {
        logger.info("running inside a scope");
    }
}

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - Derived Loggers Example ===\n");

    let options = LoggerOptions::from_json(
        r#"{
            "format": "[example] ${labels} ${level}: ${msg}",
            "labels": ["worker-1"],
            "level_names": { "trace": "trc", "debug": "dbg", "info": "inf" },
            "upper_case": true,
            "timestamp": "None"
        }"#,
    )?;

    println!("1. Level resolved by name:");
    let logger = Logger::by_level_name("DBG", LoggerBuilder::from_options(options));
    logger.debug("debug is enabled");
    logger.trace("trace stays hidden");

    println!("\n2. Context propagation:");
    let ctx = context::to_context(&Context::background(), &logger);
    handle_request(&ctx, 7)?;
    if let Err(err) = handle_request(&Context::background(), 8) {
        println!("   without a logger: {}", err);
    }

    {
        let _guard = context::scope(&logger.with_labels(["scoped"]));
        nested_work();
    }

    println!("\n3. Panic-level calls write the line, then unwind:");
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panic("cannot continue");
    }));
    println!("   recovered: {}", result.is_err());

    println!("\n4. Inspecting an outcome without aborting:");
    let outcome = logger.emit(Severity::Terminate, "would exit with status 1");
    println!("   rendered: {:?}", outcome.line());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
