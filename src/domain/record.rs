use super::severity::Severity;
use serde::Serialize;

/// Placeholder payload for records that carry no `data`.
///
/// ```
/// # async fn demo(dispatcher: &rask_log_client::LogDispatcher) {
/// dispatcher.info(["startup"], "ready", rask_log_client::NO_DATA).await;
/// # }
/// ```
pub const NO_DATA: Option<&'static ()> = None;

/// A single log event as it travels to the collector.
///
/// Records have no identity: one is built per emitter call, dispatched and
/// dropped. The payload is borrowed from the caller, so its concrete type is
/// resolved at the call site. Absent data serializes as `null`.
#[derive(Debug, Serialize)]
pub struct LogRecord<'a, D: ?Sized> {
    pub severity: Severity,
    pub tags: Vec<String>,
    pub message: String,
    pub data: Option<&'a D>,
}

impl<'a, D> LogRecord<'a, D>
where
    D: Serialize + ?Sized,
{
    /// Builds a record whose tag list starts with `system`, followed by the
    /// caller's tags in order.
    pub fn new<I, S>(
        severity: Severity,
        system: &str,
        tags: I,
        message: impl Into<String>,
        data: Option<&'a D>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter();
        let mut all_tags = Vec::with_capacity(tags.size_hint().0 + 1);
        all_tags.push(system.to_string());
        all_tags.extend(tags.map(Into::into));

        Self {
            severity,
            tags: all_tags,
            message: message.into(),
            data,
        }
    }
}
