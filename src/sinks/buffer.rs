//! In-memory sink that captures output

use crate::core::{LinePrefix, Record, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects lines in a shared buffer. Clones share the same buffer, so one
/// clone can be handed to a logger while another inspects what was written.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let buffer = BufferSink::new();
/// let logger = Logger::builder().sink(Arc::new(buffer.clone())).build();
/// logger.info("ready");
/// assert_eq!(buffer.contents(), "[info] ready\n");
/// ```
#[derive(Clone)]
pub struct BufferSink {
    buffer: Arc<Mutex<String>>,
    prefix: LinePrefix,
}

impl BufferSink {
    /// A buffer that records lines verbatim, without timestamps.
    pub fn new() -> Self {
        Self::with_prefix(LinePrefix::bare())
    }

    pub fn with_prefix(prefix: LinePrefix) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(String::new())),
            prefix,
        }
    }

    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(String::from).collect()
    }

    /// Return everything captured so far and empty the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for BufferSink {
    fn output(&self, record: &Record<'_>) -> Result<()> {
        let output = self.prefix.format(record);
        self.buffer.lock().push_str(&output);
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}
