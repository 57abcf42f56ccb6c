//! Sink trait for log output destinations

use super::error::Result;
use super::timestamp::TimestampFormat;
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::panic::Location;

/// A fully rendered line together with the call site that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub line: &'a str,
    pub location: &'static Location<'static>,
}

impl<'a> Record<'a> {
    pub fn new(line: &'a str, location: &'static Location<'static>) -> Self {
        Self { line, location }
    }
}

/// Accepts finished lines. Shared by every logger derived from the one that
/// created it, so implementations must tolerate concurrent calls.
pub trait Sink: Send + Sync {
    fn output(&self, record: &Record<'_>) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// How much of the call site to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerInfo {
    #[default]
    None,
    /// File name and line, e.g. `main.rs:41: `
    Short,
    /// Full path and line
    Long,
}

/// Header written in front of each line by the built-in sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePrefix {
    pub timestamp: TimestampFormat,
    pub utc: bool,
    pub caller: CallerInfo,
}

impl Default for LinePrefix {
    fn default() -> Self {
        Self {
            timestamp: TimestampFormat::DateTimeMicros,
            utc: false,
            caller: CallerInfo::None,
        }
    }
}

impl LinePrefix {
    /// No timestamp, no caller: lines are written verbatim.
    pub fn bare() -> Self {
        Self {
            timestamp: TimestampFormat::None,
            utc: false,
            caller: CallerInfo::None,
        }
    }

    /// Format `record` into a complete output line, newline-terminated.
    pub fn format(&self, record: &Record<'_>) -> String {
        let mut out = String::with_capacity(record.line.len() + 40);

        if self.timestamp != TimestampFormat::None {
            let stamp = if self.utc {
                self.timestamp.format(&Utc::now())
            } else {
                self.timestamp.format(&Local::now())
            };
            out.push_str(&stamp);
            out.push(' ');
        }

        match self.caller {
            CallerInfo::None => {}
            CallerInfo::Short | CallerInfo::Long => {
                let file = record.location.file();
                let file = if self.caller == CallerInfo::Short {
                    file.rsplit(['/', '\\']).next().unwrap_or(file)
                } else {
                    file
                };
                out.push_str(file);
                out.push(':');
                out.push_str(&record.location.line().to_string());
                out.push_str(": ");
            }
        }

        out.push_str(record.line);
        if !record.line.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}
