//! Domain layer for rask-log-client.
//!
//! Contains the record model shared by the dispatcher, the sender and the
//! local sink. Nothing here performs I/O.

pub mod error;
pub mod record;
pub mod severity;

pub use error::DispatchError;
pub use record::{LogRecord, NO_DATA};
pub use severity::Severity;
