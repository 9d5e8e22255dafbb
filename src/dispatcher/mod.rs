mod binding;
mod terminator;

pub use binding::Binding;
pub use terminator::{FATAL_EXIT_STATUS, ProcessExit, Terminator};

use crate::config::DispatcherOptions;
use crate::domain::{DispatchError, LogRecord, NO_DATA, Severity};
use crate::local::{LocalSink, StdoutSink, format_line};
use crate::sender::{
    DeliveryStats, DeliveryStatsSnapshot, HttpClient, RecordTransmitter, encode_record,
};
use bytes::Bytes;
use chrono::Local;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

/// Tag attached to records the dispatcher emits about itself.
pub const LOGGING_TAG: &str = "logging";

/// Message of the startup warning emitted when no host is configured.
pub const HOST_NOT_SET_MESSAGE: &str = "Host is not set, logging locally only";

/// Builds records, posts them to the collector and writes local lines.
///
/// Every emitter awaits a single bounded round trip. Delivery failures are
/// never returned; they turn into local lines instead. Spawn the call on its
/// own task if the caller must not wait for the network.
pub struct LogDispatcher {
    options: DispatcherOptions,
    transmitter: RecordTransmitter,
    local: Arc<dyn LocalSink>,
    terminator: Arc<dyn Terminator>,
    stats: Arc<DeliveryStats>,
}

pub struct DispatcherBuilder {
    options: DispatcherOptions,
    local: Arc<dyn LocalSink>,
    terminator: Arc<dyn Terminator>,
}

impl DispatcherBuilder {
    pub fn local_sink(mut self, sink: impl LocalSink + 'static) -> Self {
        self.local = Arc::new(sink);
        self
    }

    /// Replaces what `fatal` does once the record is logged.
    pub fn terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.terminator = Arc::new(terminator);
        self
    }

    pub fn build(self) -> Result<LogDispatcher, DispatchError> {
        let mut options = self.options;
        options.normalize();
        options.validate()?;

        let client = if options.remote_enabled() {
            Some(HttpClient::new(&options)?)
        } else {
            None
        };

        let stats = Arc::new(DeliveryStats::new());
        let transmitter = RecordTransmitter::new(client, stats.clone());

        Ok(LogDispatcher {
            options,
            transmitter,
            local: self.local,
            terminator: self.terminator,
            stats,
        })
    }
}

impl LogDispatcher {
    pub fn builder(options: DispatcherOptions) -> DispatcherBuilder {
        DispatcherBuilder {
            options,
            local: Arc::new(StdoutSink),
            terminator: Arc::new(ProcessExit),
        }
    }

    pub fn options(&self) -> &DispatcherOptions {
        &self.options
    }

    pub fn stats(&self) -> DeliveryStatsSnapshot {
        self.stats.snapshot()
    }

    /// Builds a record tagged with this dispatcher's system name.
    pub fn record<'a, I, S, D>(
        &self,
        severity: Severity,
        tags: I,
        message: impl Into<String>,
        data: Option<&'a D>,
    ) -> LogRecord<'a, D>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        LogRecord::new(severity, &self.options.system, tags, message, data)
    }

    pub async fn critical<I, S, D>(&self, tags: I, message: impl Into<String>, data: Option<&D>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        self.log(Severity::Critical, tags, message, data).await;
    }

    pub async fn debug<I, S, D>(&self, tags: I, message: impl Into<String>, data: Option<&D>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        self.log(Severity::Debug, tags, message, data).await;
    }

    pub async fn error<I, S, D>(&self, tags: I, message: impl Into<String>, data: Option<&D>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        self.log(Severity::Error, tags, message, data).await;
    }

    pub async fn info<I, S, D>(&self, tags: I, message: impl Into<String>, data: Option<&D>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        self.log(Severity::Info, tags, message, data).await;
    }

    pub async fn warning<I, S, D>(&self, tags: I, message: impl Into<String>, data: Option<&D>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        self.log(Severity::Warning, tags, message, data).await;
    }

    /// Emits a record at `severity`, discarding the delivery outcome.
    pub async fn log<I, S, D>(
        &self,
        severity: Severity,
        tags: I,
        message: impl Into<String>,
        data: Option<&D>,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        let record = self.record(severity, tags, message, data);
        // Failures already produced their local lines
        let _ = self.dispatch(&record).await;
    }

    /// Logs a CRITICAL record and terminates through the configured
    /// [`Terminator`].
    ///
    /// With the default [`ProcessExit`] this never returns; the
    /// `Infallible` result lets callers write `match d.fatal(..).await {}`.
    pub async fn fatal<I, S, D>(
        &self,
        tags: I,
        message: impl Into<String>,
        data: Option<&D>,
    ) -> Infallible
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        let _ = self.log_fatal(tags, message, data).await;
        self.terminator.terminate(FATAL_EXIT_STATUS)
    }

    /// The logging half of [`fatal`](Self::fatal), for hosts that own
    /// process termination.
    ///
    /// Guarantees at least one local CRITICAL line: when remote delivery
    /// succeeded and dual-write is off, a local copy is written here.
    pub async fn log_fatal<I, S, D>(
        &self,
        tags: I,
        message: impl Into<String>,
        data: Option<&D>,
    ) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        let record = self.record(Severity::Critical, tags, message, data);
        let result = self.dispatch(&record).await;
        if result.is_ok() && !self.options.local_also {
            self.write_local(&record);
        }
        result
    }

    /// Serializes, delivers and writes the local fallback for one record.
    ///
    /// Returns the delivery error, or the serialization error when the
    /// payload could not be encoded. In both cases the record has already
    /// been written locally.
    pub async fn dispatch<D>(&self, record: &LogRecord<'_, D>) -> Result<(), DispatchError>
    where
        D: Serialize + ?Sized,
    {
        self.stats.record_dispatch();

        match encode_record(record) {
            Ok(body) => self.deliver(record, body).await,
            Err(e) => {
                self.stats.record_serialization_failure();
                self.write_local(record);
                self.report_unencodable(&e).await;
                Err(DispatchError::Serialization(e))
            }
        }
    }

    async fn deliver<D>(&self, record: &LogRecord<'_, D>, body: Bytes) -> Result<(), DispatchError>
    where
        D: ?Sized,
    {
        let result = self.transmitter.deliver(body).await;

        if let Err(e) = &result
            && e.is_transport()
        {
            self.write_transport_warning(e);
        }

        if result.is_err() || self.options.local_also {
            self.write_local(record);
        }

        result
    }

    // The notice has no data, so encoding it cannot fail the same way
    async fn report_unencodable(&self, error: &serde_json::Error) {
        let notice = self.record(
            Severity::Error,
            [LOGGING_TAG],
            format!("Could not post log because its data is not encodable, see local log: {error}"),
            NO_DATA,
        );
        self.stats.record_dispatch();

        match encode_record(&notice) {
            Ok(body) => {
                let _ = self.deliver(&notice, body).await;
            }
            Err(_) => self.write_local(&notice),
        }
    }

    // Local only: re-entering dispatch here would loop while the host is down
    fn write_transport_warning(&self, error: &DispatchError) {
        let warning = self.record(
            Severity::Warning,
            [LOGGING_TAG],
            format!("Could not deliver log to {}: {}", self.options.host, error),
            NO_DATA,
        );
        self.write_local(&warning);
    }

    fn write_local<D: ?Sized>(&self, record: &LogRecord<'_, D>) {
        self.local.write_line(&format_line(&Local::now(), record));
        self.stats.record_local_line();
    }
}

impl fmt::Debug for LogDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogDispatcher")
            .field("host", &self.options.host)
            .field("system", &self.options.system)
            .field("local_also", &self.options.local_also)
            .field("timeout_secs", &self.options.timeout_secs)
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemorySink;
    use crate::local::sink::MockLocalSink;
    use mockall::predicate::function;
    use serde::ser::{Error as _, Serializer};

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refuses to serialize"))
        }
    }

    fn local_only(sink: &MemorySink) -> LogDispatcher {
        LogDispatcher::builder(DispatcherOptions::new("", "svc"))
            .local_sink(sink.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_normalizes_timeout() {
        let dispatcher = LogDispatcher::builder(DispatcherOptions::new("", "svc").with_timeout_secs(-5))
            .build()
            .unwrap();
        assert_eq!(dispatcher.options().timeout_secs, 10);
    }

    #[test]
    fn test_build_rejects_missing_system() {
        let result = LogDispatcher::builder(DispatcherOptions::new("", "")).build();
        assert!(matches!(result, Err(DispatchError::Config(_))));
    }

    #[tokio::test]
    async fn test_local_only_writes_one_line_per_record() {
        let sink = MemorySink::new();
        let dispatcher = local_only(&sink);

        dispatcher.info(["startup"], "ready", NO_DATA).await;

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("INFO - [svc startup] - ready"));
    }

    #[tokio::test]
    async fn test_host_not_configured_is_returned_by_dispatch() {
        let sink = MemorySink::new();
        let dispatcher = local_only(&sink);

        let record = dispatcher.record(Severity::Debug, ["x"], "m", NO_DATA);
        let result = dispatcher.dispatch(&record).await;

        assert!(matches!(result, Err(DispatchError::HostNotConfigured)));
        assert_eq!(sink.len(), 1);
        assert_eq!(dispatcher.stats().remote_failed, 0);
    }

    #[tokio::test]
    async fn test_unencodable_data_is_kept_locally_and_reported() {
        let sink = MemorySink::new();
        let dispatcher = local_only(&sink);

        let record = dispatcher.record(Severity::Info, ["orders"], "placed", Some(&Unencodable));
        let result = dispatcher.dispatch(&record).await;

        assert!(matches!(result, Err(DispatchError::Serialization(_))));

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO - [svc orders] - placed"));
        assert!(lines[1].contains("ERROR - [svc logging] - Could not post log"));

        let stats = dispatcher.stats();
        assert_eq!(stats.serialization_failures, 1);
        assert_eq!(stats.records_dispatched, 2);
    }

    #[tokio::test]
    async fn test_every_severity_emitter_writes_its_level() {
        let sink = MemorySink::new();
        let dispatcher = local_only(&sink);

        dispatcher.critical(["t"], "c", NO_DATA).await;
        dispatcher.debug(["t"], "d", NO_DATA).await;
        dispatcher.error(["t"], "e", NO_DATA).await;
        dispatcher.info(["t"], "i", NO_DATA).await;
        dispatcher.warning(["t"], "w", NO_DATA).await;

        let levels: Vec<String> = sink
            .lines()
            .iter()
            .map(|line| line.split(' ').nth(2).unwrap_or_default().to_string())
            .collect();
        assert_eq!(levels, vec!["CRITICAL", "DEBUG", "ERROR", "INFO", "WARNING"]);
    }

    #[tokio::test]
    async fn test_log_fatal_without_host_writes_single_line() {
        let sink = MemorySink::new();
        let dispatcher = local_only(&sink);

        let result = dispatcher.log_fatal(["db"], "gone", NO_DATA).await;

        assert!(matches!(result, Err(DispatchError::HostNotConfigured)));
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("CRITICAL - [svc db] - gone"));
    }

    #[tokio::test]
    async fn test_local_sink_receives_formatted_line() {
        let mut mock = MockLocalSink::new();
        mock.expect_write_line()
            .with(function(|line: &str| line.ends_with("WARNING - [svc disk] - 90% full")))
            .times(1)
            .return_const(());

        let dispatcher = LogDispatcher::builder(DispatcherOptions::new("", "svc"))
            .local_sink(mock)
            .build()
            .unwrap();

        dispatcher.warning(["disk"], "90% full", NO_DATA).await;
    }
}
