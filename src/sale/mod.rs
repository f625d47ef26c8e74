//! Sale state subsystem: the last read of on-chain totals.
//!
//! Refreshed when an account is bound or changes, and after every mint attempt.

pub mod snapshot;

pub use snapshot::{SaleSnapshot, SaleState};
