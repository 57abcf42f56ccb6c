//! Console sink implementation

use crate::core::{LinePrefix, LoggerError, Record, Result, Sink};
use std::io::Write;

/// Writes to the process's standard error. This is the default sink of every
/// logger built without an explicit one.
pub struct ConsoleSink {
    prefix: LinePrefix,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            prefix: LinePrefix::default(),
        }
    }

    pub fn with_prefix(prefix: LinePrefix) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &LinePrefix {
        &self.prefix
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn output(&self, record: &Record<'_>) -> Result<()> {
        let output = self.prefix.format(record);
        // Locking stderr keeps the line in one piece across threads.
        std::io::stderr()
            .lock()
            .write_all(output.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing log line", "stderr unavailable", e))
    }

    fn flush(&self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
