//! Background synchronization for ordered list models.
//!
//! modelsync keeps a UI-facing list model in step with data produced off the
//! UI thread. A caller hands the [`ListSyncWorker`](sync::ListSyncWorker) a
//! batch of items, an operation name, and a reference to a
//! [`ListModel`](model::ListModel); the worker applies the mutation on its
//! dedicated thread, commits it in one atomic `sync()`, and acknowledges by
//! echoing the operation.
//!
//! # Components
//!
//! - [`model`] - The staged list model: mutations accumulate invisibly and
//!   are published to observers in one commit
//! - [`sync`] - The worker: operation protocol, request application, and the
//!   dedicated processing thread
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
//! // Rebuild the list from scratch
//! let response = worker.submit_blocking(SyncRequest::replace(
//!     vec!["newest".to_string(), "older".to_string()],
//!     model.clone(),
//! ))?;
//! assert_eq!(response.op.name(), "replace");
//!
//! // Later, push a fresh batch onto the head
//! worker.submit_blocking(SyncRequest::prepend(
//!     vec!["breaking".to_string()],
//!     model.clone(),
//! ))?;
//!
//! assert_eq!(model.len(), 3);
//! worker.stop_and_join();
//! # Ok::<(), modelsync::SyncError>(())
//! ```
//!
//! # Threading Contract
//!
//! A single worker processes requests strictly in arrival order, each run to
//! completion. The model reference in a request is handed to the worker for
//! the exclusive duration of that request: the caller must not mutate the
//! model's staged side while the request is outstanding. No internal locking
//! enforces this; it is a caller-side contract. The committed side of the
//! model may be read at any time from any thread.

pub mod error;
pub mod model;
pub mod sync;

pub use error::{Result, SyncError};
pub use model::{ListModel, ModelSignals};
pub use sync::{
    ListSyncWorker, SyncOp, SyncRequest, SyncResponse, WorkerBuilder, WorkerConfig, apply_request,
};

// Re-export the signal primitives so downstream users don't need a direct
// modelsync-core dependency to connect slots.
pub use modelsync_core::{CancellationToken, ConnectionGuard, ConnectionId, Signal};
