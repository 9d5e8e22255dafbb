use rask_log_client::{
    Binding, DispatchError, DispatcherOptions, LogDispatcher, MemorySink, NO_DATA,
};
use std::sync::Arc;

fn local_dispatcher(system: &str, sink: &MemorySink) -> LogDispatcher {
    LogDispatcher::builder(DispatcherOptions::new("", system))
        .local_sink(sink.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_local_only_startup_and_first_record() {
    let binding = Binding::new();
    let sink = MemorySink::new();

    let dispatcher = binding.bind(local_dispatcher("svc", &sink)).await.unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("WARNING"));
    assert!(lines[0].contains("Host is not set"));

    sink.clear();
    dispatcher.info(["startup"], "ready", NO_DATA).await;

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("[svc startup]"));
    assert!(lines[0].ends_with("- ready"));
}

#[tokio::test]
async fn test_second_initialization_keeps_first_configuration() {
    let binding = Binding::new();
    let sink = MemorySink::new();

    let first = LogDispatcher::builder(
        DispatcherOptions::new("http://127.0.0.1:1/logs", "first")
            .with_token("t1")
            .with_timeout_secs(3),
    )
    .local_sink(sink.clone())
    .build()
    .unwrap();
    binding.bind(first).await.unwrap();
    let active_before = binding.require().options().clone();

    let result = binding
        .initialize(DispatcherOptions::new("", "second").with_local_also(true))
        .await;

    assert!(matches!(result, Err(DispatchError::AlreadyInitialized)));
    assert_eq!(binding.require().options(), &active_before);
    assert_eq!(binding.require().options().system, "first");

    // The rejection is logged through the active dispatcher
    assert!(
        sink.lines()
            .iter()
            .any(|line| line.contains("ERROR - [first logging]"))
    );
}

#[tokio::test]
async fn test_concurrent_initialization_has_one_winner() {
    let binding = Arc::new(Binding::new());
    let sink = MemorySink::new();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let binding = binding.clone();
            let dispatcher = local_dispatcher(&format!("svc-{i}"), &sink);
            tokio::spawn(async move { binding.bind(dispatcher).await.map(|_| ()) })
        })
        .collect();

    let mut winners = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => winners += 1,
            Err(DispatchError::AlreadyInitialized) => rejected += 1,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(rejected, 15);

    // Every line, including each rejection, carries the winner's system tag
    let winner = binding.require().options().system.clone();
    let lines = sink.lines();
    assert_eq!(lines.len(), 16);
    assert!(lines.iter().all(|line| line.contains(&format!("[{winner} logging]"))));
}

#[tokio::test]
async fn test_invalid_options_are_reported_before_binding() {
    let binding = Binding::new();

    let result = binding
        .initialize(DispatcherOptions::new("not a url", "svc"))
        .await;

    assert!(matches!(result, Err(DispatchError::Config(_))));
    assert!(!binding.is_initialized());
}
