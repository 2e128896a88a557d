//! Logging facilities for modelsync.
//!
//! modelsync uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! All log events carry an explicit target so individual subsystems can be
//! filtered with `tracing` directives, e.g.
//! `RUST_LOG=modelsync::sync=trace,modelsync_core::signal=off`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "modelsync_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "modelsync_core::signal";
    /// List model target.
    pub const MODEL: &str = "modelsync::model";
    /// Sync worker target.
    pub const SYNC: &str = "modelsync::sync";
}
