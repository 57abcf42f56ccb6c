//! Main logger implementation
//!
//! A [`Logger`] is an immutable handle. Every `with_*` method returns a new
//! logger and leaves the receiver untouched; parts that did not change (the
//! level-name table, the sink, unchanged labels or format) are shared through
//! `Arc`, never copied.

use super::{
    error::Result,
    format::Format,
    labels::{parse_labels_format, Labels},
    log_level::{LevelNames, LogLevel},
    message::Message,
    options::{LoggerBuilder, LoggerOptions},
    sink::{Record, Sink},
};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// What a call asks for beyond writing its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Write only.
    Plain(LogLevel),
    /// Write, then unwind with the line as panic payload.
    Abort,
    /// Write, then exit the process with status 1.
    Terminate,
}

impl Severity {
    /// Level compared against the logger's minimum level.
    pub fn gate_level(self) -> LogLevel {
        match self {
            Severity::Plain(level) => level,
            Severity::Abort => LogLevel::Panic,
            Severity::Terminate => LogLevel::Fatal,
        }
    }

    /// Level whose display name is rendered. Abort and terminate both print
    /// the fatal name.
    pub fn name_level(self) -> LogLevel {
        match self {
            Severity::Plain(level) => level,
            Severity::Abort | Severity::Terminate => LogLevel::Fatal,
        }
    }
}

/// Result of an emit, before any abort or exit is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an abort or terminate outcome does nothing until resolved"]
pub enum Outcome {
    /// Gated out, or a plain call without arguments.
    Suppressed,
    Written(String),
    Unwind(String),
    Terminate(String),
}

impl Outcome {
    /// The rendered line, if one was written.
    pub fn line(&self) -> Option<&str> {
        match self {
            Outcome::Suppressed => None,
            Outcome::Written(line) | Outcome::Unwind(line) | Outcome::Terminate(line) => {
                Some(line)
            }
        }
    }

    /// Carry out the side effect: panic with the line as payload, or exit.
    pub fn resolve(self) {
        match self {
            Outcome::Suppressed | Outcome::Written(_) => {}
            Outcome::Unwind(line) => std::panic::panic_any(line),
            Outcome::Terminate(_) => std::process::exit(1),
        }
    }
}

struct LoggerInner {
    level: LogLevel,
    format: Arc<Format>,
    level_names: Arc<LevelNames>,
    labels: Arc<Labels>,
    sink: Arc<dyn Sink>,
}

/// Leveled, template-driven logger.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let buffer = BufferSink::new();
/// let logger = Logger::builder().sink(Arc::new(buffer.clone())).build();
///
/// logger.debug("hidden");
/// logger.info("y");
/// let user = logger.with_labels(["user:1"]);
/// user.info("z");
/// logger.info("w");
///
/// assert_eq!(buffer.contents(), "[info] y\n[info] user:1 z\n[info] w\n");
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// A logger with the default configuration, writing to stderr.
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build from an options struct merged over the defaults.
    #[must_use]
    pub fn from_options(options: LoggerOptions) -> Self {
        LoggerBuilder::from_options(options).build()
    }

    /// Build with the level given by its display name, e.g. from a config
    /// file. See [`LoggerBuilder::build_with_level_name`].
    #[must_use]
    pub fn by_level_name(level_name: &str, builder: LoggerBuilder) -> Self {
        builder.build_with_level_name(level_name)
    }

    pub(crate) fn from_parts(
        level: LogLevel,
        format: &str,
        level_names: LevelNames,
        labels: Labels,
        sink: Arc<dyn Sink>,
    ) -> Self {
        let format = Format::compile(format, !labels.is_empty());
        Self {
            inner: Arc::new(LoggerInner {
                level,
                format: Arc::new(format),
                level_names: Arc::new(level_names),
                labels: Arc::new(labels),
                sink,
            }),
        }
    }

    fn derive(&self, level: LogLevel, format: Arc<Format>, labels: Arc<Labels>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                level,
                format,
                level_names: Arc::clone(&self.inner.level_names),
                labels,
                sink: Arc::clone(&self.inner.sink),
            }),
        }
    }

    /// Whether both handles are the very same logger.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn level(&self) -> LogLevel {
        self.inner.level
    }

    pub fn format(&self) -> &Format {
        &self.inner.format
    }

    pub fn labels(&self) -> &Labels {
        &self.inner.labels
    }

    pub fn level_names(&self) -> &LevelNames {
        &self.inner.level_names
    }

    pub fn sink_name(&self) -> &str {
        self.inner.sink.name()
    }

    /// Whether a call at `level` would be written.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.inner.level.enables(level)
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.sink.flush()
    }

    // Derivations

    /// Same logger at another level; returns `self` when the level is
    /// unchanged.
    #[must_use]
    pub fn with_level(&self, level: LogLevel) -> Self {
        if self.inner.level == level {
            return self.clone();
        }
        self.derive(
            level,
            Arc::clone(&self.inner.format),
            Arc::clone(&self.inner.labels),
        )
    }

    /// Add labels; empty values are ignored.
    #[must_use]
    pub fn with_labels<I, S>(&self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = self.inner.labels.add(labels);
        if Arc::ptr_eq(&labels, &self.inner.labels) {
            return self.clone();
        }
        let format = self.inner.format.with_labels(!labels.is_empty());
        self.derive(self.inner.level, format, labels)
    }

    #[must_use]
    pub fn clear_labels(&self) -> Self {
        let labels = self.inner.labels.clear();
        if Arc::ptr_eq(&labels, &self.inner.labels) {
            return self.clone();
        }
        self.derive(self.inner.level, self.inner.format.clear_labels(), labels)
    }

    #[must_use]
    pub fn with_label_separator(&self, separator: &str) -> Self {
        let labels = self.inner.labels.set_separator(separator);
        if Arc::ptr_eq(&labels, &self.inner.labels) {
            return self.clone();
        }
        self.derive(self.inner.level, Arc::clone(&self.inner.format), labels)
    }

    /// Change how labels are wrapped, e.g. `"(${labels})"`.
    #[must_use]
    pub fn with_labels_format(&self, format: &str) -> Self {
        let labels = self.inner.labels.set_format(&parse_labels_format(format));
        if Arc::ptr_eq(&labels, &self.inner.labels) {
            return self.clone();
        }
        self.derive(self.inner.level, Arc::clone(&self.inner.format), labels)
    }

    /// Replace the message format, compiled against the current labels.
    #[must_use]
    pub fn with_format(&self, format: &str) -> Self {
        let format = Format::compile(format, !self.inner.labels.is_empty());
        self.derive(
            self.inner.level,
            Arc::new(format),
            Arc::clone(&self.inner.labels),
        )
    }

    // Emitting

    /// Gate, render and write one call without carrying out abort or exit.
    #[track_caller]
    pub fn emit(&self, severity: Severity, message: impl Message) -> Outcome {
        self.emit_at(severity, &message, Location::caller())
    }

    fn emit_at(
        &self,
        severity: Severity,
        message: &impl Message,
        location: &'static Location<'static>,
    ) -> Outcome {
        if !self.enabled(severity.gate_level()) {
            return Outcome::Suppressed;
        }
        if matches!(severity, Severity::Plain(_)) && message.is_absent() {
            return Outcome::Suppressed;
        }

        let mut text = String::new();
        message.write_message(&mut text);
        let line = self.inner.format.render(
            self.inner.level_names.name(severity.name_level()),
            self.inner.labels.rendered(),
            &text,
        );

        if let Err(e) = self.inner.sink.output(&Record::new(&line, location)) {
            eprintln!(
                "[LOGGER ERROR] Sink '{}' failed: {}",
                self.inner.sink.name(),
                e
            );
        }

        match severity {
            Severity::Plain(_) => Outcome::Written(line),
            Severity::Abort => Outcome::Unwind(line),
            Severity::Terminate => Outcome::Terminate(line),
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Message) {
        let _ = self.emit_at(Severity::Plain(level), &message, Location::caller());
    }

    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let _ = self.emit_at(Severity::Plain(level), &args, Location::caller());
    }

    #[track_caller]
    pub fn trace(&self, message: impl Message) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Trace), &message, Location::caller());
    }

    #[track_caller]
    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Trace), &args, Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl Message) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Debug), &message, Location::caller());
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Debug), &args, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl Message) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Info), &message, Location::caller());
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Info), &args, Location::caller());
    }

    /// Alias of [`Logger::info`].
    #[track_caller]
    pub fn notice(&self, message: impl Message) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Info), &message, Location::caller());
    }

    #[track_caller]
    pub fn noticef(&self, args: fmt::Arguments<'_>) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Info), &args, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: impl Message) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Warn), &message, Location::caller());
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Warn), &args, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl Message) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Error), &message, Location::caller());
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        let _ = self.emit_at(Severity::Plain(LogLevel::Error), &args, Location::caller());
    }

    /// Write the line, then panic with it as payload. Does nothing when the
    /// logger is below the panic level.
    #[track_caller]
    pub fn panic(&self, message: impl Message) {
        self.emit_at(Severity::Abort, &message, Location::caller())
            .resolve();
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Severity::Abort, &args, Location::caller())
            .resolve();
    }

    /// Write the line, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, message: impl Message) {
        self.emit_at(Severity::Terminate, &message, Location::caller())
            .resolve();
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Severity::Terminate, &args, Location::caller())
            .resolve();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.inner.level)
            .field("format", &self.inner.format.value())
            .field("labels", &self.inner.labels.rendered())
            .field("sink", &self.inner.sink.name())
            .finish()
    }
}
