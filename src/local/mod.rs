//! Local console output: the fallback and dual-write sink.

pub mod format;
pub mod sink;

pub use format::{TIMESTAMP_FORMAT, format_line};
pub use sink::{LocalSink, MemorySink, StdoutSink};
