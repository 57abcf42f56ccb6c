//! # Rust Leveled Logger
//!
//! A leveled, template-driven logging facade.
//!
//! ## Features
//!
//! - **Templates**: `"[${level}] ${labels} ${msg}"` compiled once into a positional form
//! - **Labels**: contextual values rendered into every line, wrapped and joined as configured
//! - **Immutable derivation**: `with_level`, `with_labels`, `with_format`... return new loggers
//! - **Thread Safe**: loggers are `Send + Sync` and cheap to clone

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::context::{self, Context};
    pub use crate::core::{
        CallerInfo, Format, Labels, LevelNames, LinePrefix, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggerOptions, Message, Outcome, Record, Result, Severity, Sink,
        TimestampFormat,
    };
    pub use crate::sinks::{BufferSink, ConsoleSink, FileSink, WriterSink};
}

pub use core::{
    CallerInfo, Context, Format, Labels, LevelNames, LinePrefix, LogLevel, Logger, LoggerBuilder,
    LoggerError, LoggerOptions, Message, Outcome, Record, Result, Severity, Sink, TimestampFormat,
};
pub use sinks::{BufferSink, ConsoleSink, FileSink, WriterSink};
