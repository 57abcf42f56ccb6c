//! Sink implementations

pub mod buffer;
pub mod console;
pub mod file;
pub mod writer;

pub use buffer::BufferSink;
pub use console::ConsoleSink;
pub use file::FileSink;
pub use writer::WriterSink;

pub use crate::core::{CallerInfo, LinePrefix, Record, Sink};
