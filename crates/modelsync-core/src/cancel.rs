//! Cooperative cancellation for background work.
//!
//! A [`CancellationToken`] signals that a worker should stop its work. The
//! worker must periodically check the token and exit gracefully when
//! cancelled; nothing is interrupted forcibly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cheaply cloneable flag for requesting cooperative shutdown.
///
/// All clones share the same underlying state: cancelling any clone cancels
/// them all.
///
/// # Example
///
/// ```
/// use modelsync_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let for_worker = token.clone();
///
/// let handle = std::thread::spawn(move || {
///     while !for_worker.is_cancelled() {
///         // Do a unit of work...
///         std::thread::sleep(std::time::Duration::from_millis(1));
///     }
/// });
///
/// token.cancel();
/// handle.join().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    /// Request cancellation.
    ///
    /// This sets the cancellation flag. Workers checking `is_cancelled()`
    /// will see the cancellation and should exit gracefully.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Release);
    }

    /// Reset the token to non-cancelled state.
    ///
    /// This allows reusing a token for multiple operations.
    pub fn reset(&self) {
        self.inner.store(false, Ordering::Release);
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(CancellationToken: Send, Sync);

    #[test]
    fn test_token_starts_clear() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_shared_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();

        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_reset() {
        let token = CancellationToken::new();
        token.cancel();
        assert!(token.is_cancelled());

        token.reset();
        assert!(!token.is_cancelled());
    }
}
