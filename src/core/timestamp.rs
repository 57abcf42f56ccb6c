//! Timestamp formatting for sink line prefixes
//!
//! The default mirrors the classic `date time.micros` header:
//! `2025/01/08 10:30:45.123456`.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};

/// Timestamp format options for the line prefix
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::DateTimeMicros;
/// let timestamp = format.format(&Utc::now());
/// assert_eq!(timestamp.len(), "2025/01/08 10:30:45.123456".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// No timestamp at all
    None,

    /// Date only: `2025/01/08`
    Date,

    /// Date and time: `2025/01/08 10:30:45`
    DateTime,

    /// Date and time with microseconds: `2025/01/08 10:30:45.123456`
    #[default]
    DateTimeMicros,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_leveled_logger::core::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Reject a `Custom` pattern that chrono cannot parse.
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(pattern) = self {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "timestamp",
                    format!("invalid strftime pattern '{}'", pattern),
                ));
            }
        }
        Ok(())
    }

    /// Format a timestamp in any time zone according to this format
    ///
    /// An unparsable `Custom` pattern falls back to the default format.
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            TimestampFormat::None => String::new(),
            TimestampFormat::Date => datetime.format("%Y/%m/%d").to_string(),
            TimestampFormat::DateTime => datetime.format("%Y/%m/%d %H:%M:%S").to_string(),
            TimestampFormat::DateTimeMicros => {
                datetime.format("%Y/%m/%d %H:%M:%S%.6f").to_string()
            }
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::default().format(datetime),
                }
            }
        }
    }
}
