//! Integration tests for the leveled logger
//!
//! These tests verify:
//! - Level gating and the default line shape
//! - Immutable derivation of loggers
//! - Label rendering and template escaping
//! - File and writer sinks with line prefixes
//! - Abort behaviour and context propagation
//! - Thread safety

use rust_leveled_logger::core::context;
use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{error, info, warn};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn capture() -> (Logger, BufferSink) {
    let buffer = BufferSink::new();
    let logger = Logger::builder().sink(Arc::new(buffer.clone())).build();
    (logger, buffer)
}

#[test]
fn test_default_scenario() {
    let (logger, buffer) = capture();

    logger.debug("x");
    assert!(buffer.is_empty(), "debug must be gated at info level");

    logger.info("y");
    assert_eq!(buffer.take(), "[info] y\n");

    let user = logger.with_labels(["user:1"]);
    user.info("z");
    assert_eq!(buffer.take(), "[info] user:1 z\n");

    logger.info("w");
    assert_eq!(buffer.take(), "[info] w\n");
}

#[test]
fn test_gate_for_every_level() {
    let (logger, buffer) = capture();
    for configured in LogLevel::ALL {
        let logger = logger.with_level(configured);
        for call in LogLevel::ALL {
            buffer.take();
            logger.log(call, "m");
            assert_eq!(
                !buffer.is_empty(),
                configured >= call,
                "configured {:?}, call {:?}",
                configured,
                call
            );
        }
    }
}

#[test]
fn test_custom_configuration() {
    let buffer = BufferSink::new();
    let logger = Logger::by_level_name(
        "TRC",
        Logger::builder()
            .level_names([
                (LogLevel::Trace, "trc"),
                (LogLevel::Debug, "dbg"),
                (LogLevel::Info, "inf"),
                (LogLevel::Warn, "wrn"),
                (LogLevel::Error, "err"),
            ])
            .upper_case_names()
            .format("[example] ${labels} ${level}: ${msg}")
            .labels(["worker-1", "user=2000"])
            .sink(Arc::new(buffer.clone())),
    );

    assert_eq!(logger.level(), LogLevel::Trace);
    logger.trace("custom log");
    let outcome = logger.emit(Severity::Terminate, "fatal log");

    assert_eq!(
        buffer.lines(),
        vec![
            "[example] worker-1 user=2000 TRC: custom log",
            "[example] worker-1 user=2000 FATAL: fatal log",
        ]
    );
    assert!(matches!(outcome, Outcome::Terminate(_)));
}

#[test]
fn test_labels_format_and_separator() {
    let buffer = BufferSink::new();
    let logger = Logger::builder()
        .labels(["A", "", "B", "C"])
        .labels_format("(${labels})")
        .labels_separator(", ")
        .sink(Arc::new(buffer.clone()))
        .build();

    logger.info("msg");
    logger.clear_labels().info("bare");
    assert_eq!(buffer.lines(), vec!["[info] (A, B, C) msg", "[info] bare"]);
}

#[test]
fn test_percent_sequences_render_literally() {
    let buffer = BufferSink::new();
    let logger = Logger::builder()
        .format("%s ${level} %[2]s ${labels} ${msg}")
        .labels(["%d", "100%"])
        .sink(Arc::new(buffer.clone()))
        .build();

    logger.info("%v");
    info!(logger, "{}%", 99);
    assert_eq!(
        buffer.lines(),
        vec!["%s info %[2]s %d 100% %v", "%s info %[2]s %d 100% 99%"]
    );
}

#[test]
fn test_file_sink_with_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let sink = FileSink::new(&log_file)
        .expect("Failed to create sink")
        .with_prefix(LinePrefix::bare());
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .sink(Arc::new(sink))
        .build();

    logger.debug("first");
    warn!(logger, "second {}", 2);
    logger.trace("hidden");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "[debug] first\n[warn] second 2\n");
}

#[test]
fn test_writer_with_caller_info() {
    #[derive(Clone, Default)]
    struct Shared(Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let shared = Shared::default();
    let logger = Logger::builder()
        .timestamp(TimestampFormat::None)
        .file_and_line()
        .writer(shared.clone())
        .build();

    let line = line!() + 1;
    logger.error("with caller");

    let written = String::from_utf8(shared.0.lock().unwrap().clone()).unwrap();
    assert_eq!(
        written,
        format!("integration_tests.rs:{}: [error] with caller\n", line)
    );
}

#[test]
fn test_invalid_timestamp_pattern_never_breaks_emit() {
    let options = LoggerOptions::from_json(r#"{ "timestamp": { "Custom": "%Q" } }"#);
    assert!(matches!(options, Err(LoggerError::InvalidConfiguration { .. })));

    let buffer = BufferSink::with_prefix(LinePrefix {
        timestamp: TimestampFormat::Custom("%Q".to_string()),
        utc: true,
        caller: CallerInfo::None,
    });
    let logger = Logger::builder().sink(Arc::new(buffer.clone())).build();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| logger.info("hello")));
    assert!(result.is_ok());

    // Falls back to the default `YYYY/MM/DD HH:MM:SS.ffffff ` header.
    let written = buffer.contents();
    assert!(written.ends_with(" [info] hello\n"), "got {:?}", written);
    assert_eq!(written.len(), "2025/01/08 10:30:45.123456 [info] hello\n".len());
}

#[test]
fn test_macro_reports_call_site() {
    let buffer = BufferSink::with_prefix(LinePrefix {
        timestamp: TimestampFormat::None,
        utc: false,
        caller: CallerInfo::Short,
    });
    let logger = Logger::builder().sink(Arc::new(buffer.clone())).build();

    let line = line!() + 1;
    error!(logger, "code {}", 500);

    assert_eq!(
        buffer.contents(),
        format!("integration_tests.rs:{}: [error] code 500\n", line)
    );
}

#[test]
fn test_panic_writes_then_unwinds() {
    let (logger, buffer) = capture();
    let logger = logger.with_labels(["job:7"]);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panicf(format_args!("cannot continue: {}", "disk full"));
    }));

    let payload = result.expect_err("panic must unwind");
    let message = payload
        .downcast_ref::<String>()
        .expect("payload is the rendered line");
    assert_eq!(message, "[fatal] job:7 cannot continue: disk full\n");
    assert_eq!(buffer.contents(), *message);
}

#[test]
fn test_context_propagation() {
    let (logger, buffer) = capture();
    let logger = logger.with_level(LogLevel::Trace);

    fn handle(ctx: &Context) -> Result<()> {
        let logger = context::from_context(ctx)?;
        logger.debugf(format_args!("log from context: {}", "log message"));
        Ok(())
    }

    let ctx = context::to_context(&Context::background(), &logger);
    handle(&ctx).expect("logger attached");
    assert!(matches!(
        handle(&Context::background()),
        Err(LoggerError::MissingLogger)
    ));

    {
        let _guard = context::scope(&logger);
        context::current().expect("scoped logger").info("ambient");
    }

    assert_eq!(
        buffer.lines(),
        vec!["[debug] log from context: log message", "[info] ambient"]
    );
}

#[test]
fn test_options_from_json() {
    let options = LoggerOptions::from_json(
        r#"{
            "min_level": "warn",
            "format": "${level}|${labels}|${msg}",
            "labels": ["svc"],
            "labels_separator": "/"
        }"#,
    )
    .expect("valid options");

    let buffer = BufferSink::new();
    let logger = Logger::from_options(LoggerOptions {
        sink: Some(Arc::new(buffer.clone())),
        ..options
    });

    logger.info("hidden");
    logger.with_labels(["api"]).warn("shown");
    assert_eq!(buffer.contents(), "warn|svc/api|shown\n");
}

#[test]
fn test_concurrent_logging() {
    let (logger, buffer) = capture();
    let mut handles = Vec::new();

    for t in 0..8 {
        let logger = logger.with_labels([format!("thread:{}", t)]);
        handles.push(thread::spawn(move || {
            for i in 0..100 {
                logger.infof(format_args!("message {}", i));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), 800);
    assert!(lines
        .iter()
        .all(|line| line.starts_with("[info] thread:") && line.contains(" message ")));
}
