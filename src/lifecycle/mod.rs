//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → session event loop exits, chain watcher exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
