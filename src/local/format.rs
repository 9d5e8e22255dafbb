use crate::domain::LogRecord;
use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `YYYY-MM-DD HH:MM:SS SEVERITY - [tag tag] - message`.
///
/// The record's data is remote-only and never appears here.
/// The layout is fixed byte for byte; stdout consumers parse it.
pub fn format_line<D: ?Sized>(timestamp: &DateTime<Local>, record: &LogRecord<'_, D>) -> String {
    format!(
        "{} {} - [{}] - {}",
        timestamp.format(TIMESTAMP_FORMAT),
        record.severity,
        record.tags.join(" "),
        record.message
    )
}
