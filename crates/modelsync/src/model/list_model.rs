//! Staged list model with explicit commit.
//!
//! `ListModel<T>` is an ordered container with two buffers: a *staged* buffer
//! that background mutators edit, and a *committed* snapshot that observers
//! read. Mutations never reach observers until [`sync()`](ListModel::sync)
//! commits them, which is what lets a worker thread rebuild the list while a
//! view keeps reading a consistent snapshot.

use parking_lot::{Mutex, RwLock};

use super::signals::ModelSignals;

/// An ordered list of items with staged mutations and explicit commit.
///
/// The staged side (`clear`, `append`, `insert_at`) is intended for a single
/// mutator at a time: a caller hands the model to a sync worker for the
/// exclusive duration of one request, and must not touch the staged buffer
/// while that request is outstanding. This exclusivity is a caller-side
/// contract; the internal locks only keep individual operations atomic, they
/// do not serialize whole requests.
///
/// The committed side (`len`, `snapshot`, `items`) can be read from any
/// thread at any time and always observes the last synced state.
///
/// # Example
///
/// ```
/// use modelsync::model::ListModel;
///
/// let model = ListModel::new();
/// model.append("first".to_string());
/// model.append("second".to_string());
///
/// // Nothing visible yet
/// assert!(model.is_empty());
///
/// model.sync();
/// assert_eq!(model.snapshot(), vec!["first".to_string(), "second".to_string()]);
/// ```
pub struct ListModel<T> {
    /// Buffer that mutators edit. Invisible to observers until a sync.
    staged: Mutex<Vec<T>>,
    /// Snapshot published by the last sync. What observers read.
    committed: RwLock<Vec<T>>,
    signals: ModelSignals,
}

impl<T: Clone + Send + Sync + 'static> ListModel<T> {
    /// Creates an empty list model.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a list model whose staged and committed contents both start
    /// as `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            committed: RwLock::new(items.clone()),
            staged: Mutex::new(items),
            signals: ModelSignals::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Staged side (mutators)
    // -------------------------------------------------------------------------

    /// Removes all entries from the staged buffer.
    pub fn clear(&self) {
        self.staged.lock().clear();
    }

    /// Appends an item to the end of the staged buffer.
    pub fn append(&self, item: T) {
        self.staged.lock().push(item);
    }

    /// Inserts an item at the specified position in the staged buffer,
    /// shifting subsequent entries.
    ///
    /// # Panics
    ///
    /// Panics if `index > staged_len()`.
    pub fn insert_at(&self, index: usize, item: T) {
        self.staged.lock().insert(index, item);
    }

    /// Returns the number of entries in the staged buffer.
    pub fn staged_len(&self) -> usize {
        self.staged.lock().len()
    }

    /// Commits the staged buffer, publishing it to observers.
    ///
    /// Emits `model_about_to_reset` / `model_reset` around the swap and
    /// `synced` with the new row count after it. Exactly one commit happens
    /// per call, even when the staged buffer is unchanged.
    pub fn sync(&self) {
        let staged = self.staged.lock();
        tracing::debug!(
            target: "modelsync::model",
            rows = staged.len(),
            "committing staged contents"
        );
        self.signals.emit_reset(|| {
            *self.committed.write() = staged.clone();
        });
        self.signals.synced.emit(staged.len());
    }

    // -------------------------------------------------------------------------
    // Committed side (observers)
    // -------------------------------------------------------------------------

    /// Returns the number of committed entries.
    pub fn len(&self) -> usize {
        self.committed.read().len()
    }

    /// Returns `true` if the committed snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.committed.read().is_empty()
    }

    /// Returns a clone of the committed snapshot.
    pub fn snapshot(&self) -> Vec<T> {
        self.committed.read().clone()
    }

    /// Returns a read guard over the committed snapshot.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.committed.read()
    }

    /// Returns the signals for this model.
    pub fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ListModel<T> {
    fn default() -> Self {
        Self::new()
    }
}
