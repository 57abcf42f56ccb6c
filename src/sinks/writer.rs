//! Sink over any `io::Write`

use crate::core::{LinePrefix, LoggerError, Record, Result, Sink};
use parking_lot::Mutex;
use std::io::Write;

/// Writes each line, prefixed, to a wrapped writer. The writer is guarded by
/// a mutex so concurrent loggers never interleave partial lines.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    prefix: LinePrefix,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_prefix(writer, LinePrefix::default())
    }

    pub fn with_prefix(writer: W, prefix: LinePrefix) -> Self {
        Self {
            writer: Mutex::new(writer),
            prefix,
        }
    }

    pub fn prefix(&self) -> &LinePrefix {
        &self.prefix
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn output(&self, record: &Record<'_>) -> Result<()> {
        let output = self.prefix.format(record);
        self.writer
            .lock()
            .write_all(output.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing log line", "writer rejected line", e))
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}
