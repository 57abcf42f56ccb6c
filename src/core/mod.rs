//! Core logger types and traits

pub mod context;
pub mod error;
pub mod format;
pub mod labels;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod options;
pub mod sink;
pub mod timestamp;

pub use context::{Context, ScopeGuard};
pub use error::{LoggerError, Result};
pub use format::{Format, DEFAULT_FORMAT, LABELS_PLACEHOLDER, LEVEL_PLACEHOLDER, MESSAGE_PLACEHOLDER};
pub use labels::{parse_labels_format, Labels};
pub use log_level::{LevelNames, LogLevel};
pub use logger::{Logger, Outcome, Severity};
pub use message::Message;
pub use options::{LoggerBuilder, LoggerOptions};
pub use sink::{CallerInfo, LinePrefix, Record, Sink};
pub use timestamp::TimestampFormat;
