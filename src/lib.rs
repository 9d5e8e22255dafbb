// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Millisecond counters fit in u64
    clippy::cast_sign_loss,           // Timeouts are normalized to >= 1 first
    clippy::missing_errors_doc,       // Internal API
    clippy::missing_panics_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. DispatchError in dispatcher module
    clippy::must_use_candidate,       // Annotated selectively on critical APIs
    clippy::doc_markdown              // Internal API
)]

pub mod app;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod global;
pub mod local;
pub mod sender;

// Re-export main types for easy access
pub use config::{ConfigError, DispatcherOptions};
pub use dispatcher::{Binding, DispatcherBuilder, LogDispatcher, ProcessExit, Terminator};
pub use domain::{DispatchError, LogRecord, NO_DATA, Severity};
pub use local::{LocalSink, MemorySink, StdoutSink};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
