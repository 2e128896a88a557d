//! Integration tests driving the sync worker the way a message-feed UI does:
//! an initial full load, then fresh batches prepended as they arrive.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use modelsync::model::ListModel;
use modelsync::sync::{ListSyncWorker, SyncOp, SyncRequest, WorkerBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Message {
    author: String,
    text: String,
}

impl Message {
    fn new(author: &str, text: &str) -> Self {
        Self {
            author: author.to_string(),
            text: text.to_string(),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn initial_load_then_incremental_prepends() {
    init_tracing();

    let model = Arc::new(ListModel::new());
    let worker = WorkerBuilder::new()
        .name("feed-sync")
        .build::<Message>();

    // Full history load replaces whatever was there
    worker
        .submit_blocking(SyncRequest::replace(
            vec![
                Message::new("alice", "hello"),
                Message::new("bob", "hi there"),
            ],
            model.clone(),
        ))
        .unwrap();

    assert_eq!(model.len(), 2);
    assert_eq!(model.snapshot()[0], Message::new("alice", "hello"));

    // Two new messages arrive; they become the new head, newest-batch order
    // preserved, history untouched below them
    worker
        .submit_blocking(SyncRequest::prepend(
            vec![
                Message::new("carol", "just joined"),
                Message::new("dave", "me too"),
            ],
            model.clone(),
        ))
        .unwrap();

    let snapshot = model.snapshot();
    assert_eq!(
        snapshot,
        vec![
            Message::new("carol", "just joined"),
            Message::new("dave", "me too"),
            Message::new("alice", "hello"),
            Message::new("bob", "hi there"),
        ]
    );

    worker.stop_and_join();
}

#[test]
fn every_request_commits_and_acknowledges() {
    init_tracing();

    let model = Arc::new(ListModel::<Message>::new());
    let commits = Arc::new(AtomicUsize::new(0));

    let counter = commits.clone();
    model.signals().synced.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let worker = ListSyncWorker::new();

    // A request with an op name this worker has never heard of still gets
    // committed (as a no-op) and acknowledged with that same name
    let response = worker
        .submit_blocking(SyncRequest::new(
            SyncOp::parse("archive"),
            vec![Message::new("eve", "ignored")],
            model.clone(),
        ))
        .unwrap();

    assert_eq!(response.op.name(), "archive");
    assert!(model.is_empty());
    assert_eq!(commits.load(Ordering::SeqCst), 1);

    worker.stop_and_join();
}

#[test]
fn observer_sees_consistent_snapshots_during_rebuild() {
    init_tracing();

    let model = Arc::new(ListModel::with_items(vec![Message::new("old", "state")]));
    let worker = ListSyncWorker::new();

    // While the worker stages a replace, readers keep seeing the previous
    // committed snapshot until the commit lands
    let seen_during = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let seen = seen_during.clone();
    let reader_model = model.clone();
    model.signals().model_about_to_reset.connect(move |_| {
        seen.lock().push(reader_model.snapshot());
    });

    worker
        .submit_blocking(SyncRequest::replace(
            vec![Message::new("new", "state")],
            model.clone(),
        ))
        .unwrap();

    // The pre-commit observer saw the old contents, not the staged ones
    assert_eq!(
        *seen_during.lock(),
        vec![vec![Message::new("old", "state")]]
    );
    assert_eq!(model.snapshot(), vec![Message::new("new", "state")]);

    worker.stop_and_join();
}
