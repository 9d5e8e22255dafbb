use super::{HOST_NOT_SET_MESSAGE, LOGGING_TAG, LogDispatcher};
use crate::config::DispatcherOptions;
use crate::domain::{DispatchError, NO_DATA};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

static GLOBAL: Binding = Binding::new();

/// A slot holding at most one dispatcher for its whole lifetime.
///
/// Binding is first-write-wins and atomic: concurrent initializers race, the
/// losers get `AlreadyInitialized` and the winner's dispatcher stays active.
/// A bound slot never becomes unbound.
#[derive(Debug, Default)]
pub struct Binding {
    slot: OnceLock<Arc<LogDispatcher>>,
}

impl Binding {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// The process-wide slot behind [`crate::global`].
    pub fn global() -> &'static Binding {
        &GLOBAL
    }

    /// Builds a dispatcher writing to stdout and binds it.
    ///
    /// Fails with `AlreadyInitialized` when the slot is taken, or with
    /// `Config` when `options` do not validate (empty system, bad host URL,
    /// token or header name).
    pub async fn initialize(
        &self,
        options: DispatcherOptions,
    ) -> Result<Arc<LogDispatcher>, DispatchError> {
        if let Some(active) = self.slot.get() {
            return Err(Self::reject(active).await);
        }

        self.bind(LogDispatcher::builder(options).build()?).await
    }

    /// Binds an already built dispatcher.
    ///
    /// When the slot is taken, the rejection is logged through the active
    /// dispatcher and `dispatcher` is dropped. When the bound dispatcher has
    /// no host, a startup warning is logged.
    pub async fn bind(&self, dispatcher: LogDispatcher) -> Result<Arc<LogDispatcher>, DispatchError> {
        let candidate = Arc::new(dispatcher);

        if self.slot.set(candidate.clone()).is_err() {
            let active = self.slot.get().ok_or(DispatchError::NotInitialized)?;
            return Err(Self::reject(active).await);
        }

        debug!(
            "Log dispatcher bound (system={}, remote={})",
            candidate.options().system,
            candidate.options().remote_enabled()
        );

        if !candidate.options().remote_enabled() {
            candidate
                .warning([LOGGING_TAG], HOST_NOT_SET_MESSAGE, NO_DATA)
                .await;
        }

        Ok(candidate)
    }

    async fn reject(active: &LogDispatcher) -> DispatchError {
        let error = DispatchError::AlreadyInitialized;
        warn!("Rejected second initialization of the log dispatcher");
        active
            .error([LOGGING_TAG], error.to_string(), NO_DATA)
            .await;
        error
    }

    pub fn dispatcher(&self) -> Result<Arc<LogDispatcher>, DispatchError> {
        self.slot.get().cloned().ok_or(DispatchError::NotInitialized)
    }

    /// Like [`dispatcher`](Self::dispatcher), treating an unbound slot as
    /// unrecoverable.
    ///
    /// # Panics
    ///
    /// Panics when nothing has been bound yet.
    pub fn require(&self) -> Arc<LogDispatcher> {
        match self.dispatcher() {
            Ok(dispatcher) => dispatcher,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemorySink;

    fn dispatcher(system: &str, sink: &MemorySink) -> LogDispatcher {
        LogDispatcher::builder(DispatcherOptions::new("", system))
            .local_sink(sink.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_unbound_slot_reports_not_initialized() {
        let binding = Binding::new();
        assert!(!binding.is_initialized());
        assert!(matches!(
            binding.dispatcher(),
            Err(DispatchError::NotInitialized)
        ));
    }

    #[test]
    #[should_panic(expected = "not initialized")]
    fn test_require_panics_when_unbound() {
        Binding::new().require();
    }

    #[tokio::test]
    async fn test_second_bind_is_rejected_against_active_dispatcher() {
        let binding = Binding::new();
        let first_sink = MemorySink::new();
        let second_sink = MemorySink::new();

        binding.bind(dispatcher("first", &first_sink)).await.unwrap();
        let result = binding.bind(dispatcher("second", &second_sink)).await;

        assert!(matches!(result, Err(DispatchError::AlreadyInitialized)));
        assert_eq!(binding.require().options().system, "first");

        // Startup warning plus the rejection, both through the first dispatcher
        let lines = first_sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("ERROR - [first logging] - Log dispatcher is already initialized"));
        assert!(second_sink.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_rejects_before_validating_new_options() {
        let binding = Binding::new();
        let sink = MemorySink::new();
        binding.bind(dispatcher("svc", &sink)).await.unwrap();

        // Invalid options still observe the active binding first
        let result = binding.initialize(DispatcherOptions::new("", "")).await;
        assert!(matches!(result, Err(DispatchError::AlreadyInitialized)));
    }

    #[tokio::test]
    async fn test_local_only_bind_emits_startup_warning() {
        let binding = Binding::new();
        let sink = MemorySink::new();

        binding.bind(dispatcher("svc", &sink)).await.unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARNING - [svc logging] - Host is not set"));
    }
}
