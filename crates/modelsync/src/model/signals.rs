//! Change-notification signals for staged list models.

use modelsync_core::Signal;

/// Collection of signals emitted by a [`ListModel`](super::ListModel).
///
/// Observers (typically views on the UI thread's side of the contract)
/// connect to these signals to stay in step with the committed contents.
/// Staged mutations are silent; only a commit emits.
///
/// # Signal Order
///
/// A commit emits `model_about_to_reset`, swaps the committed snapshot,
/// emits `model_reset`, then emits `synced` with the new row count.
pub struct ModelSignals {
    /// Emitted just before a commit replaces the committed snapshot.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after a commit has replaced the committed snapshot.
    pub model_reset: Signal<()>,

    /// Emitted once per `sync()` call with the committed row count.
    ///
    /// This fires exactly once per sync, even when the commit changed
    /// nothing, making it the signal to count for request accounting.
    pub synced: Signal<usize>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
            synced: Signal::new(),
        }
    }

    /// Emits signals for a commit.
    ///
    /// Calls the provided function between the about_to_reset and reset
    /// signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_model_signals_creation() {
        let signals = ModelSignals::new();
        assert_eq!(signals.model_reset.connection_count(), 0);
        assert_eq!(signals.synced.connection_count(), 0);
    }

    #[test]
    fn test_emit_reset_order() {
        let signals = ModelSignals::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let recv_about = events.clone();
        signals.model_about_to_reset.connect(move |_| {
            recv_about.lock().push("about");
        });

        let recv_done = events.clone();
        signals.model_reset.connect(move |_| {
            recv_done.lock().push("done");
        });

        let recv_swap = events.clone();
        signals.emit_reset(move || {
            recv_swap.lock().push("swap");
        });

        assert_eq!(*events.lock(), vec!["about", "swap", "done"]);
    }
}
