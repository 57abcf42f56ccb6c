//! Log level definitions and the level-name table

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call.
///
/// `Fatal` is the narrowest visibility, `Trace` the widest. A logger
/// configured at level `L` emits every call whose level is `<= L`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Fatal = 1,
    Panic = 2,
    Error = 3,
    Warn = 4,
    #[default]
    Info = 5,
    Debug = 6,
    Trace = 7,
}

impl LogLevel {
    /// Every level, from the least to the most verbose.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Fatal,
        LogLevel::Panic,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Clamp an arbitrary integer severity into `[Fatal, Trace]`.
    #[must_use]
    pub fn normalize(value: i64) -> Self {
        match value {
            i64::MIN..=1 => LogLevel::Fatal,
            2 => LogLevel::Panic,
            3 => LogLevel::Error,
            4 => LogLevel::Warn,
            5 => LogLevel::Info,
            6 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn default_name(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Whether a logger configured at `self` lets a call at `call` through.
    #[inline]
    #[must_use]
    pub fn enables(&self, call: LogLevel) -> bool {
        *self >= call
    }

    fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "panic" => Ok(LogLevel::Panic),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Display names for every level, shared by all loggers derived from the
/// same configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelNames {
    names: [String; 7],
}

impl LevelNames {
    /// Build a table from overrides; levels without an override keep their
    /// default name.
    pub fn new<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a LogLevel, &'a String)>,
    {
        let mut names = LogLevel::ALL.map(|level| level.default_name().to_string());
        for (level, name) in overrides {
            names[level.index()] = name.clone();
        }
        Self { names }
    }

    #[must_use]
    pub fn upper_case(mut self) -> Self {
        for name in self.names.iter_mut() {
            *name = name.to_uppercase();
        }
        self
    }

    pub fn name(&self, level: LogLevel) -> &str {
        &self.names[level.index()]
    }

    /// Resolve a display name back to its level.
    ///
    /// The table is scanned from `Fatal` to `Trace`, so when several levels
    /// share a name the least verbose one wins.
    pub fn find(&self, name: &str) -> Option<LogLevel> {
        LogLevel::ALL
            .into_iter()
            .find(|level| self.name(*level) == name)
    }
}

impl Default for LevelNames {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}
