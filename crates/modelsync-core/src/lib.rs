//! Core primitives for modelsync.
//!
//! This crate provides the foundational components shared by the modelsync
//! library:
//!
//! - **Signal/Slot System**: Type-safe change notification between objects
//! - **Cancellation**: Cooperative shutdown flags for background workers
//! - **Logging**: `tracing` target constants for per-subsystem filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use modelsync_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod cancel;
pub mod logging;
pub mod signal;

pub use cancel::CancellationToken;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
