use futures::future::join_all;
use rask_log_client::{DispatcherOptions, LogDispatcher, MemorySink, NO_DATA};
use std::sync::Arc;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

#[tokio::test]
async fn test_concurrent_emitters_each_deliver_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(50)
        .mount(&mock_server)
        .await;

    let sink = MemorySink::new();
    let dispatcher = LogDispatcher::builder(
        DispatcherOptions::new(mock_server.uri(), "svc").with_local_also(true),
    )
    .local_sink(sink.clone())
    .build()
    .unwrap();

    let calls = (0..50).map(|i| {
        let dispatcher = &dispatcher;
        async move {
            let payload = serde_json::json!({ "request": i });
            dispatcher
                .info(["worker"], format!("request {i}"), Some(&payload))
                .await;
        }
    });
    join_all(calls).await;

    assert_eq!(sink.len(), 50);
    assert_eq!(dispatcher.stats().remote_delivered, 50);
}

#[tokio::test]
async fn test_spawned_emitters_share_one_dispatcher() {
    let sink = MemorySink::new();
    let dispatcher = Arc::new(
        LogDispatcher::builder(DispatcherOptions::new("", "svc"))
            .local_sink(sink.clone())
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .debug(vec![format!("task-{i}")], "tick", NO_DATA)
                    .await;
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 20);
    assert!(lines.iter().all(|line| line.contains("DEBUG - [svc task-")));
}
