//! Logger configuration: a serde-loadable options struct and a fluent builder

use super::error::{LoggerError, Result};
use super::format::DEFAULT_FORMAT;
use super::labels::{parse_labels_format, Labels, DEFAULT_LABELS_FORMAT, DEFAULT_LABELS_SEPARATOR};
use super::log_level::{LevelNames, LogLevel};
use super::logger::Logger;
use super::sink::{CallerInfo, LinePrefix, Sink};
use super::timestamp::TimestampFormat;
use crate::sinks::{ConsoleSink, WriterSink};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Arc;

/// Every recognised configuration option.
///
/// Unset fields (`None`, empty) fall back to the defaults when the options
/// are merged over them, so a partially filled struct or a JSON document
/// only needs to name what it changes.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let options = LoggerOptions::from_json(r#"{
///     "min_level": "debug",
///     "labels": ["worker-1"],
///     "labels_format": "<${labels}>"
/// }"#).unwrap();
/// let logger = Logger::from_options(options);
/// assert_eq!(logger.level(), LogLevel::Debug);
/// assert_eq!(logger.labels().rendered(), "<worker-1>");
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerOptions {
    pub min_level: Option<LogLevel>,
    pub format: Option<String>,
    pub labels: Vec<String>,
    pub labels_format: Option<String>,
    pub labels_separator: Option<String>,
    pub level_names: HashMap<LogLevel, String>,
    pub upper_case: bool,
    pub timestamp: Option<TimestampFormat>,
    pub caller_info: Option<CallerInfo>,
    pub utc: bool,
    /// Replaces the default console sink; timestamp and caller options are
    /// then up to the sink itself.
    #[serde(skip)]
    pub sink: Option<Arc<dyn Sink>>,
}

impl LoggerOptions {
    /// The default configuration with every field populated.
    pub fn defaults() -> Self {
        Self {
            min_level: Some(LogLevel::Info),
            format: Some(DEFAULT_FORMAT.to_string()),
            labels: Vec::new(),
            labels_format: Some(DEFAULT_LABELS_FORMAT.to_string()),
            labels_separator: Some(DEFAULT_LABELS_SEPARATOR.to_string()),
            level_names: LogLevel::ALL
                .into_iter()
                .map(|level| (level, level.default_name().to_string()))
                .collect(),
            upper_case: false,
            timestamp: Some(TimestampFormat::DateTimeMicros),
            caller_info: Some(CallerInfo::None),
            utc: false,
            sink: None,
        }
    }

    /// Parse options from JSON and [`validate`](Self::validate) them.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that, once merged over the defaults, every level has a
    /// non-empty display name that no other level shares, and that a custom
    /// timestamp pattern parses.
    pub fn validate(&self) -> Result<()> {
        if let Some(timestamp) = &self.timestamp {
            timestamp.validate()?;
        }
        let names = LoggerOptions::defaults()
            .merge(self.clone())
            .build_level_names();
        let mut seen = HashSet::new();
        for level in LogLevel::ALL {
            let name = names.name(level);
            if name.is_empty() {
                return Err(LoggerError::config(
                    "level_names",
                    format!("empty name for level {}", level),
                ));
            }
            if !seen.insert(name) {
                return Err(LoggerError::config(
                    "level_names",
                    format!("'{}' names more than one level", name),
                ));
            }
        }
        Ok(())
    }

    /// Overlay `update` on `self`; only non-empty fields of `update` win.
    #[must_use]
    pub fn merge(mut self, update: LoggerOptions) -> Self {
        if let Some(level) = update.min_level {
            self.min_level = Some(level);
        }
        if let Some(format) = update.format.filter(|f| !f.is_empty()) {
            self.format = Some(format);
        }
        if !update.labels.is_empty() {
            self.labels = update.labels;
        }
        if let Some(format) = update.labels_format.filter(|f| !f.is_empty()) {
            self.labels_format = Some(format);
        }
        if let Some(sep) = update.labels_separator.filter(|s| !s.is_empty()) {
            self.labels_separator = Some(sep);
        }
        self.level_names.extend(update.level_names);
        if update.upper_case {
            self.upper_case = true;
        }
        if let Some(timestamp) = update.timestamp {
            self.timestamp = Some(timestamp);
        }
        if let Some(caller) = update.caller_info {
            self.caller_info = Some(caller);
        }
        if update.utc {
            self.utc = true;
        }
        if update.sink.is_some() {
            self.sink = update.sink;
        }
        self
    }

    fn line_prefix(&self) -> LinePrefix {
        let timestamp = match self.timestamp.clone().unwrap_or_default() {
            timestamp if timestamp.validate().is_ok() => timestamp,
            invalid => {
                eprintln!(
                    "[LOGGER ERROR] Invalid timestamp format {:?}, using default",
                    invalid
                );
                TimestampFormat::default()
            }
        };
        LinePrefix {
            timestamp,
            utc: self.utc,
            caller: self.caller_info.unwrap_or_default(),
        }
    }

    fn build_level_names(&self) -> LevelNames {
        let names = LevelNames::new(&self.level_names);
        if self.upper_case {
            names.upper_case()
        } else {
            names
        }
    }

    fn build_labels(&self) -> Labels {
        let format = self.labels_format.as_deref().unwrap_or(DEFAULT_LABELS_FORMAT);
        let separator = self
            .labels_separator
            .as_deref()
            .unwrap_or(DEFAULT_LABELS_SEPARATOR);
        Labels::new(
            parse_labels_format(format),
            self.labels.iter().cloned(),
            separator,
        )
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .format("<main> [${level}] ${labels} ${msg}")
///     .labels(["user:1000"])
///     .upper_case_names()
///     .build();
/// assert_eq!(logger.format().value(), "<main> [%[1]s] %[2]s %[3]s\n");
/// ```
pub struct LoggerBuilder {
    options: LoggerOptions,
    writer: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            options: LoggerOptions::defaults(),
            writer: None,
        }
    }

    /// Start from defaults overlaid with `options`.
    pub fn from_options(options: LoggerOptions) -> Self {
        Self {
            options: LoggerOptions::defaults().merge(options),
            writer: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.options.min_level = Some(level);
        self
    }

    /// Set the message format. Recognised placeholders are `${level}`,
    /// `${labels}` and `${msg}`; an empty format prints only the message.
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.options.format = Some(format.into());
        self
    }

    /// Replace the initial labels.
    #[must_use = "builder methods return a new value"]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set how the joined labels are wrapped, e.g. `"(${labels})"`.
    #[must_use = "builder methods return a new value"]
    pub fn labels_format(mut self, format: impl Into<String>) -> Self {
        self.options.labels_format = Some(format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn labels_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.labels_separator = Some(separator.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_name(mut self, level: LogLevel, name: impl Into<String>) -> Self {
        self.options.level_names.insert(level, name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (LogLevel, S)>,
        S: Into<String>,
    {
        self.options
            .level_names
            .extend(names.into_iter().map(|(level, name)| (level, name.into())));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn upper_case_names(mut self) -> Self {
        self.options.upper_case = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, format: TimestampFormat) -> Self {
        self.options.timestamp = Some(format);
        self
    }

    /// Print `file:line: ` of the call site in front of each line.
    #[must_use = "builder methods return a new value"]
    pub fn file_and_line(mut self) -> Self {
        self.options.caller_info = Some(CallerInfo::Short);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_info(mut self, caller: CallerInfo) -> Self {
        self.options.caller_info = Some(caller);
        self
    }

    /// Use UTC instead of local time for timestamps.
    #[must_use = "builder methods return a new value"]
    pub fn utc(mut self) -> Self {
        self.options.utc = true;
        self
    }

    /// Write lines to `writer` using the configured prefix.
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Replace the line writer entirely; prefix options no longer apply.
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.options.sink = Some(sink);
        self
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let level = self.options.min_level.unwrap_or_default();
        self.build_at(|_| level)
    }

    /// Build a Logger whose level is looked up by display name.
    ///
    /// The name is matched against the configured level names (upper-cased
    /// first when upper-case names are on). Unknown names fall back to the
    /// configured minimum level.
    pub fn build_with_level_name(self, level_name: &str) -> Logger {
        let fallback = self.options.min_level.unwrap_or_default();
        let upper_case = self.options.upper_case;
        self.build_at(|names| {
            let name = if upper_case {
                level_name.to_uppercase()
            } else {
                level_name.to_string()
            };
            names.find(&name).unwrap_or(fallback)
        })
    }

    fn build_at(self, level: impl FnOnce(&LevelNames) -> LogLevel) -> Logger {
        let level_names = self.options.build_level_names();
        let level = level(&level_names);
        let labels = self.options.build_labels();
        let format = self.options.format.as_deref().unwrap_or(DEFAULT_FORMAT);
        let prefix = self.options.line_prefix();

        let sink: Arc<dyn Sink> = match (self.options.sink.clone(), self.writer) {
            (Some(sink), _) => sink,
            (None, Some(writer)) => Arc::new(WriterSink::with_prefix(writer, prefix)),
            (None, None) => Arc::new(ConsoleSink::with_prefix(prefix)),
        };

        Logger::from_parts(level, format, level_names, labels, sink)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let logger = LoggerBuilder::new().build();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.format().original(), DEFAULT_FORMAT);
        assert_eq!(logger.labels().separator(), " ");
        assert!(logger.labels().is_empty());
        assert_eq!(logger.level_names().name(LogLevel::Warn), "warn");
    }

    #[test]
    fn test_merge_level_names() {
        let mut update = LoggerOptions::default();
        update.level_names.insert(LogLevel::Warn, "warning".to_string());
        update.level_names.insert(LogLevel::Info, "information".to_string());

        let merged = LoggerOptions::defaults().merge(update);
        assert_eq!(merged.level_names[&LogLevel::Warn], "warning");
        assert_eq!(merged.level_names[&LogLevel::Info], "information");
        assert_eq!(merged.level_names[&LogLevel::Fatal], "fatal");
        assert_eq!(merged.level_names.len(), 7);
    }

    #[test]
    fn test_merge_ignores_empty_fields() {
        let update = LoggerOptions {
            format: Some(String::new()),
            labels_format: Some(String::new()),
            labels_separator: Some(String::new()),
            ..LoggerOptions::default()
        };
        let merged = LoggerOptions::defaults().merge(update);
        assert_eq!(merged.format.as_deref(), Some(DEFAULT_FORMAT));
        assert_eq!(merged.labels_format.as_deref(), Some(DEFAULT_LABELS_FORMAT));
        assert_eq!(merged.labels_separator.as_deref(), Some(" "));
        assert_eq!(merged.min_level, Some(LogLevel::Info));
    }

    #[test]
    fn test_merge_overrides() {
        let update = LoggerOptions {
            min_level: Some(LogLevel::Debug),
            format: Some("${msg}".to_string()),
            labels: vec!["a".to_string()],
            upper_case: true,
            utc: true,
            caller_info: Some(CallerInfo::Long),
            ..LoggerOptions::default()
        };
        let merged = LoggerOptions::defaults().merge(update);
        assert_eq!(merged.min_level, Some(LogLevel::Debug));
        assert_eq!(merged.format.as_deref(), Some("${msg}"));
        assert_eq!(merged.labels, vec!["a".to_string()]);
        assert!(merged.upper_case);
        assert!(merged.utc);
        assert_eq!(merged.caller_info, Some(CallerInfo::Long));
    }

    #[test]
    fn test_empty_format_through_builder_is_kept() {
        let logger = LoggerBuilder::new().format("").build();
        assert_eq!(logger.format().value(), "%[3]s\n");
    }

    #[test]
    fn test_from_json() {
        let options = LoggerOptions::from_json(
            r#"{
                "min_level": "trace",
                "format": "${level}: ${msg}",
                "level_names": { "trace": "trc" },
                "upper_case": true,
                "timestamp": "None"
            }"#,
        )
        .unwrap();
        let logger = Logger::from_options(options);
        assert_eq!(logger.level(), LogLevel::Trace);
        assert_eq!(logger.level_names().name(LogLevel::Trace), "TRC");
        assert_eq!(logger.level_names().name(LogLevel::Info), "INFO");
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        assert!(matches!(
            LoggerOptions::from_json(r#"{ "colour": true }"#),
            Err(LoggerError::JsonError(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_ambiguous_level_names() {
        let duplicate = LoggerOptions::from_json(r#"{ "level_names": { "debug": "warn" } }"#);
        assert!(matches!(
            duplicate,
            Err(LoggerError::InvalidConfiguration { ref component, .. }) if component == "level_names"
        ));

        // Names that differ only in case collide once upper-cased.
        let folded = LoggerOptions::from_json(
            r#"{ "level_names": { "debug": "Info" }, "upper_case": true }"#,
        );
        assert!(folded.is_err());

        let empty = LoggerOptions::from_json(r#"{ "level_names": { "trace": "" } }"#);
        assert!(empty.is_err());
    }

    #[test]
    fn test_invalid_custom_timestamp() {
        let result = LoggerOptions::from_json(r#"{ "timestamp": { "Custom": "%Q" } }"#);
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { ref component, .. }) if component == "timestamp"
        ));

        let options = LoggerOptions {
            timestamp: Some(TimestampFormat::Custom("%Q".to_string())),
            ..LoggerOptions::default()
        };
        assert!(options.validate().is_err());
        assert_eq!(
            LoggerOptions::defaults().merge(options).line_prefix().timestamp,
            TimestampFormat::DateTimeMicros
        );
    }

    #[test]
    fn test_build_with_level_name() {
        let builder = || {
            LoggerBuilder::new()
                .level_names([(LogLevel::Trace, "trc"), (LogLevel::Debug, "dbg")])
                .upper_case_names()
        };
        assert_eq!(builder().build_with_level_name("TRC").level(), LogLevel::Trace);
        assert_eq!(builder().build_with_level_name("dbg").level(), LogLevel::Debug);
        assert_eq!(builder().build_with_level_name("nope").level(), LogLevel::Info);

        let plain = LoggerBuilder::new()
            .min_level(LogLevel::Error)
            .build_with_level_name("DEBUG");
        assert_eq!(plain.level(), LogLevel::Error);
    }

    #[test]
    fn test_writer_uses_prefix() {
        let logger = LoggerBuilder::new()
            .timestamp(TimestampFormat::None)
            .writer(std::io::sink())
            .build();
        assert_eq!(logger.sink_name(), "writer");
        assert_eq!(LoggerBuilder::new().build().sink_name(), "console");
    }
}
