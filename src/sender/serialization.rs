use crate::domain::LogRecord;
use bytes::Bytes;
use serde::Serialize;

// Initial buffer size; most records are a short message plus a few tags
const ESTIMATED_RECORD_SIZE: usize = 256;

/// Encodes a record as the JSON body posted to the collector.
///
/// Fails only when the caller's payload cannot be represented in JSON, e.g.
/// a map with non-string keys or a `Serialize` impl that reports an error.
pub fn encode_record<D>(record: &LogRecord<'_, D>) -> Result<Bytes, serde_json::Error>
where
    D: Serialize + ?Sized,
{
    let capacity = ESTIMATED_RECORD_SIZE
        .saturating_add(record.message.len())
        .saturating_add(record.tags.iter().map(String::len).sum());

    let mut buffer = Vec::with_capacity(capacity);
    serde_json::to_writer(&mut buffer, record)?;
    Ok(Bytes::from(buffer))
}
