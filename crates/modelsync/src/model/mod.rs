//! Staged list models.
//!
//! This module provides the data side of modelsync: an ordered container
//! whose mutations are staged by a background mutator and published to
//! observers in one atomic commit.
//!
//! # Core Types
//!
//! - `ListModel<T>`: ordered container with staged mutations and `sync()`
//! - `ModelSignals`: change-notification signals observers connect to
//!
//! # Example
//!
//! ```
//! use modelsync::model::ListModel;
//!
//! let model = ListModel::with_items(vec!["Apple".to_string()]);
//!
//! // Connect to commit notifications
//! model.signals().synced.connect(|&rows| {
//!     println!("Model now has {} rows", rows);
//! });
//!
//! model.append("Banana".to_string());
//! model.sync();
//! assert_eq!(model.len(), 2);
//! ```

mod list_model;
mod signals;

pub use list_model::ListModel;
pub use signals::ModelSignals;
