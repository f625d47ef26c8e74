//! Wallet connection subsystem.
//!
//! # Data Flow
//! ```text
//! connect():
//!     Disconnected → Connecting → request accounts → check chain ID
//!         → Connected { account, contract }   (success)
//!         → Error { message }                  (no wallet, rejected, wrong chain)
//!
//! wallet events (for the lifetime of the session):
//!     AccountsChanged → rebind / Disconnected
//!     ChainChanged    → Error when it leaves the sale's network
//!     from Error, back on the sale's network or new accounts → retry binding
//! ```

pub mod chain;
pub mod state;

pub use chain::ChainConnection;
pub use state::ConnectionState;
