//! Error types for the sync worker.

/// Result type alias for sync worker operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors reported when interacting with a [`ListSyncWorker`](crate::sync::ListSyncWorker).
///
/// Applying a request never fails on its own: an unrecognized operation name
/// is a silent no-op by contract. These errors cover the channel between the
/// caller and the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The worker has been stopped and no longer accepts requests.
    #[error("sync worker has been stopped")]
    Stopped,

    /// The worker's request queue is full.
    #[error("sync worker request queue is full")]
    QueueFull,

    /// The worker shut down before delivering a reply.
    #[error("sync worker shut down before replying")]
    Disconnected,
}
