//! File sink implementation

use crate::core::{LinePrefix, LoggerError, Record, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends lines to a file.
///
/// Every line is flushed as soon as it is written: `fatal` terminates the
/// process right after the write, so nothing may stay buffered.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    prefix: LinePrefix,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            prefix: LinePrefix::default(),
        })
    }

    /// Set the line prefix for this sink
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_leveled_logger::sinks::{FileSink, LinePrefix};
    ///
    /// let sink = FileSink::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_prefix(LinePrefix::bare());
    /// ```
    #[must_use]
    pub fn with_prefix(mut self, prefix: LinePrefix) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn output(&self, record: &Record<'_>) -> Result<()> {
        let output = self.prefix.format(record);
        let mut writer = self.writer.lock();
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.get_mut().flush();
    }
}
