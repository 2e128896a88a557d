//! The list-sync worker.
//!
//! This module provides [`ListSyncWorker`], a dedicated background thread
//! that applies bulk mutations to a [`ListModel`] and acknowledges each
//! request by echoing its operation name. Requests are processed strictly in
//! arrival order, one at a time, and each one runs to completion before the
//! next is accepted.
//!
//! # Protocol
//!
//! A [`SyncRequest`] names an operation, carries a batch of items, and hands
//! the worker a reference to the model to mutate:
//!
//! - [`SyncOp::Replace`]: clear the model, then append the batch in order.
//! - [`SyncOp::Prepend`]: insert the batch at the head, preserving batch
//!   order ahead of the existing entries.
//! - [`SyncOp::Other`]: no mutation. The unrecognized name is still echoed
//!   and the model still synced, so callers waiting on an acknowledgement
//!   are never left hanging.
//!
//! Whatever the operation, the worker calls [`ListModel::sync`] exactly once
//! and then emits one [`SyncResponse`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use modelsync::model::ListModel;
//! use modelsync::sync::{ListSyncWorker, SyncRequest};
//!
//! let model = Arc::new(ListModel::new());
//! let worker = ListSyncWorker::new();
//!
//! // Fire-and-forget: responses arrive on the signal
//! worker.on_response().connect(|response| {
//!     println!("completed: {}", response.op);
//! });
//! worker.submit(SyncRequest::replace(
//!     vec!["a".to_string(), "b".to_string()],
//!     model.clone(),
//! ))?;
//!
//! // Or wait for the acknowledgement
//! let response = worker.submit_blocking(SyncRequest::prepend(
//!     vec!["head".to_string()],
//!     model.clone(),
//! ))?;
//! assert_eq!(response.op.name(), "prepend");
//!
//! worker.stop_and_join();
//! # Ok::<(), modelsync::SyncError>(())
//! ```
//!
//! # Model Exclusivity
//!
//! The model reference inside a request is a capability handed to the worker
//! for the duration of that request. The caller must not mutate the model's
//! staged side while a request touching it is outstanding; the worker does
//! not lock callers out. Reading the committed side is always safe.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use parking_lot::{Condvar, Mutex};

use modelsync_core::{CancellationToken, Signal};

use crate::error::SyncError;
use crate::model::ListModel;

/// Default capacity for the worker's request queue.
const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// A bulk mutation the worker can apply to a list model.
///
/// The wire form of an operation is its name string; [`SyncOp::parse`] maps
/// names onto the known variants and preserves anything else verbatim in
/// [`SyncOp::Other`], so unrecognized names can still be echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOp {
    /// Clear the model, then append the batch in its given order.
    Replace,
    /// Insert the batch at the head of the model, preserving batch order.
    Prepend,
    /// An unrecognized operation name. Applied as a no-op mutation.
    Other(String),
}

impl SyncOp {
    /// Parse an operation name.
    ///
    /// Unknown names are preserved in [`SyncOp::Other`] rather than
    /// rejected, matching the echo contract.
    pub fn parse(name: &str) -> Self {
        match name {
            "replace" => Self::Replace,
            "prepend" => Self::Prepend,
            other => Self::Other(other.to_string()),
        }
    }

    /// The operation's wire name.
    pub fn name(&self) -> &str {
        match self {
            Self::Replace => "replace",
            Self::Prepend => "prepend",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One unit of work for the sync worker.
///
/// The request owns its item batch and holds the model by `Arc`; the model
/// itself stays owned by the caller and outlives the request.
pub struct SyncRequest<T> {
    /// The operation to apply.
    pub op: SyncOp,
    /// The item batch, in significant order. May be empty.
    pub items: Vec<T>,
    /// The model to mutate. Handed to the worker exclusively for the
    /// duration of this request.
    pub model: Arc<ListModel<T>>,
}

impl<T: Clone + Send + Sync + 'static> SyncRequest<T> {
    /// Creates a request with an explicit operation.
    pub fn new(op: SyncOp, items: Vec<T>, model: Arc<ListModel<T>>) -> Self {
        Self { op, items, model }
    }

    /// Creates a request that replaces the model contents with `items`.
    pub fn replace(items: Vec<T>, model: Arc<ListModel<T>>) -> Self {
        Self::new(SyncOp::Replace, items, model)
    }

    /// Creates a request that prepends `items` to the model.
    pub fn prepend(items: Vec<T>, model: Arc<ListModel<T>>) -> Self {
        Self::new(SyncOp::Prepend, items, model)
    }
}

/// Acknowledgement for one processed request.
///
/// Carries the request's operation back verbatim, including unrecognized
/// names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResponse {
    /// Echo of the request's operation.
    pub op: SyncOp,
}

/// Applies one request to its model and produces the acknowledgement.
///
/// This is the whole mutation contract in one place, usable without a
/// worker thread:
///
/// - `Replace`: clear, then append every item in batch order.
/// - `Prepend`: insert items at the head so the batch order becomes the new
///   leading run of the list.
/// - `Other`: leave the model untouched.
///
/// The model is synced exactly once afterwards, whichever branch ran.
pub fn apply_request<T: Clone + Send + Sync + 'static>(request: SyncRequest<T>) -> SyncResponse {
    let SyncRequest { op, items, model } = request;
    tracing::trace!(
        target: "modelsync::sync",
        op = %op,
        batch_len = items.len(),
        "applying request"
    );

    match &op {
        SyncOp::Replace => {
            model.clear();
            for item in items {
                model.append(item);
            }
        }
        SyncOp::Prepend => {
            // Inserting at index 0 while iterating forward would land the
            // batch in reverse; walking it backwards restores the original
            // order at the head.
            for item in items.into_iter().rev() {
                model.insert_at(0, item);
            }
        }
        SyncOp::Other(name) => {
            tracing::debug!(
                target: "modelsync::sync",
                op = %name,
                "unrecognized operation, leaving model untouched"
            );
        }
    }

    model.sync();
    SyncResponse { op }
}

/// Configuration for creating a [`ListSyncWorker`].
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Name for the worker thread.
    pub name: String,
    /// Stack size for the worker thread in bytes. `None` uses the default.
    pub stack_size: Option<usize>,
    /// Capacity of the request queue.
    pub queue_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "modelsync-worker".to_string(),
            stack_size: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl WorkerConfig {
    /// Create a new configuration with the given thread name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Builder for creating workers with custom configuration.
#[derive(Debug, Default)]
pub struct WorkerBuilder {
    config: WorkerConfig,
}

impl WorkerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thread name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the stack size for the worker thread.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    /// Set the request queue capacity.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Build and start the worker.
    pub fn build<T: Clone + Send + Sync + 'static>(self) -> ListSyncWorker<T> {
        ListSyncWorker::with_config(self.config)
    }
}

/// Internal state shared between the worker handle and worker thread.
struct WorkerState {
    /// Whether the worker is accepting requests.
    running: AtomicBool,
    /// Cancellation token for cooperative shutdown.
    cancellation: CancellationToken,
    /// Count of requests queued but not yet processed.
    pending_requests: AtomicUsize,
    /// Condvar for waiting on shutdown.
    shutdown_condvar: Condvar,
    /// Mutex for the condvar.
    shutdown_mutex: Mutex<()>,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            cancellation: CancellationToken::new(),
            pending_requests: AtomicUsize::new(0),
            shutdown_condvar: Condvar::new(),
            shutdown_mutex: Mutex::new(()),
        }
    }

    fn signal_shutdown(&self) {
        let _guard = self.shutdown_mutex.lock();
        self.shutdown_condvar.notify_all();
    }
}

/// A message sent to the worker thread.
enum WorkerMessage<T> {
    /// Apply a request. When `reply` is set, the response goes to that
    /// channel instead of the response signal.
    Request {
        request: SyncRequest<T>,
        reply: Option<Sender<SyncResponse>>,
    },
    /// Shutdown signal.
    Shutdown,
}

/// A dedicated worker thread that applies sync requests to list models.
///
/// The worker is stateless across requests: each request carries its own
/// model reference, and nothing is retained between invocations. A single
/// worker processes requests strictly in arrival order with no internal
/// parallelism.
///
/// # Thread Safety
///
/// `ListSyncWorker<T>` is `Send + Sync` and can be shared between threads;
/// multiple threads may submit concurrently (their requests interleave at
/// queue granularity).
pub struct ListSyncWorker<T: Clone + Send + Sync + 'static> {
    /// Channel sender for submitting requests.
    sender: Sender<WorkerMessage<T>>,
    /// Thread handle for joining.
    handle: Mutex<Option<JoinHandle<()>>>,
    /// Shared state with the worker thread.
    state: Arc<WorkerState>,
    /// Signal emitted for every processed fire-and-forget request.
    response_signal: Arc<Signal<SyncResponse>>,
}

impl<T: Clone + Send + Sync + 'static> ListSyncWorker<T> {
    /// Create a new worker with default configuration.
    ///
    /// The worker thread starts immediately and begins processing requests.
    pub fn new() -> Self {
        Self::with_config(WorkerConfig::default())
    }

    /// Create a new worker with custom configuration.
    pub fn with_config(config: WorkerConfig) -> Self {
        let (sender, receiver) = bounded(config.queue_capacity);
        let state = Arc::new(WorkerState::new());
        let response_signal = Arc::new(Signal::new());

        let thread_state = state.clone();
        let thread_signal = response_signal.clone();

        let mut builder = thread::Builder::new().name(config.name.clone());
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let handle = builder
            .spawn(move || {
                tracing::debug!(target: "modelsync::sync", "worker thread started");
                worker_loop(receiver, thread_state.clone(), thread_signal);
                tracing::debug!(target: "modelsync::sync", "worker thread exiting");
                thread_state.running.store(false, Ordering::Release);
                thread_state.signal_shutdown();
            })
            .expect("Failed to spawn sync worker thread");

        Self {
            sender,
            handle: Mutex::new(Some(handle)),
            state,
            response_signal,
        }
    }

    /// Check if the worker is still accepting requests.
    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Acquire)
    }

    /// Get the number of requests queued but not yet processed.
    pub fn pending_requests(&self) -> usize {
        self.state.pending_requests.load(Ordering::Acquire)
    }

    /// Get a reference to the response signal.
    ///
    /// One response is emitted per request submitted with [`submit`]
    /// (blocking submissions deliver through their reply channel instead).
    /// Slots run on the worker thread.
    ///
    /// [`submit`]: Self::submit
    pub fn on_response(&self) -> &Signal<SyncResponse> {
        &self.response_signal
    }

    /// Get the cancellation token for this worker.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.state.cancellation
    }

    /// Queue a request for processing.
    ///
    /// The acknowledgement is emitted on [`on_response`](Self::on_response)
    /// once the mutation has been applied and the model synced.
    pub fn submit(&self, request: SyncRequest<T>) -> Result<(), SyncError> {
        self.enqueue(request, None)
    }

    /// Queue a request and block until its acknowledgement arrives.
    ///
    /// The response is delivered directly instead of via the response
    /// signal. Returns [`SyncError::Disconnected`] if the worker shuts down
    /// before replying.
    pub fn submit_blocking(&self, request: SyncRequest<T>) -> Result<SyncResponse, SyncError> {
        let (reply_sender, reply_receiver) = bounded(1);
        self.enqueue(request, Some(reply_sender))?;
        reply_receiver.recv().map_err(|_| SyncError::Disconnected)
    }

    fn enqueue(
        &self,
        request: SyncRequest<T>,
        reply: Option<Sender<SyncResponse>>,
    ) -> Result<(), SyncError> {
        if !self.is_running() {
            return Err(SyncError::Stopped);
        }

        self.state.pending_requests.fetch_add(1, Ordering::AcqRel);

        match self.sender.try_send(WorkerMessage::Request { request, reply }) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.state.pending_requests.fetch_sub(1, Ordering::AcqRel);
                Err(SyncError::QueueFull)
            }
            Err(TrySendError::Disconnected(_)) => {
                self.state.pending_requests.fetch_sub(1, Ordering::AcqRel);
                Err(SyncError::Stopped)
            }
        }
    }

    /// Request the worker to stop after processing remaining requests.
    ///
    /// This is a non-blocking call. The worker finishes all pending
    /// requests before shutting down; use [`join`](Self::join) to wait.
    /// After `stop()`, submissions fail with [`SyncError::Stopped`].
    pub fn stop(&self) {
        // Mark as not running immediately so new submissions are rejected
        self.state.running.store(false, Ordering::Release);
        self.state.cancellation.cancel();
        // Send shutdown signal (ignore errors if already disconnected)
        let _ = self.sender.try_send(WorkerMessage::Shutdown);
    }

    /// Wait for the worker thread to finish.
    ///
    /// Blocks until the worker has processed all pending requests and
    /// exited. Call [`stop`](Self::stop) first to initiate shutdown.
    ///
    /// Returns `true` if the worker was joined successfully, `false` if
    /// already joined or the thread panicked.
    pub fn join(&self) -> bool {
        let mut handle = self.handle.lock();
        if let Some(h) = handle.take() {
            h.join().is_ok()
        } else {
            false
        }
    }

    /// Stop the worker and wait for it to finish.
    pub fn stop_and_join(&self) -> bool {
        self.stop();
        self.join()
    }

    /// Wait for the worker to finish with a timeout.
    ///
    /// Returns `true` if the worker finished within the timeout, `false`
    /// if the timeout elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        if !self.is_running() {
            return true;
        }

        let guard = self.state.shutdown_mutex.lock();
        let result = self
            .state
            .shutdown_condvar
            .wait_for(&mut { guard }, timeout);
        !result.timed_out() || !self.is_running()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ListSyncWorker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for ListSyncWorker<T> {
    fn drop(&mut self) {
        self.stop();
        // Don't block in drop - just request shutdown
    }
}

/// The main worker loop that processes requests.
fn worker_loop<T: Clone + Send + Sync + 'static>(
    receiver: Receiver<WorkerMessage<T>>,
    state: Arc<WorkerState>,
    response_signal: Arc<Signal<SyncResponse>>,
) {
    while !state.cancellation.is_cancelled() || state.pending_requests.load(Ordering::Acquire) > 0 {
        // Use a timeout so we can check cancellation periodically
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(WorkerMessage::Request { request, reply }) => {
                process(request, reply, &response_signal);
                state.pending_requests.fetch_sub(1, Ordering::AcqRel);
            }
            Ok(WorkerMessage::Shutdown) => {
                // Process remaining requests before exiting
                while let Ok(message) = receiver.try_recv() {
                    match message {
                        WorkerMessage::Request { request, reply } => {
                            process(request, reply, &response_signal);
                            state.pending_requests.fetch_sub(1, Ordering::AcqRel);
                        }
                        WorkerMessage::Shutdown => continue,
                    }
                }
                break;
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                // Check if we should exit
                if state.cancellation.is_cancelled()
                    && state.pending_requests.load(Ordering::Acquire) == 0
                {
                    break;
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }
}

/// Apply one request and deliver its acknowledgement.
fn process<T: Clone + Send + Sync + 'static>(
    request: SyncRequest<T>,
    reply: Option<Sender<SyncResponse>>,
    response_signal: &Signal<SyncResponse>,
) {
    let response = apply_request(request);
    match reply {
        // Receiver may have given up waiting; nothing to do then
        Some(sender) => {
            let _ = sender.send(response);
        }
        None => response_signal.emit(response),
    }
}
