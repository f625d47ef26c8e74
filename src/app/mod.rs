//! Application layer: ties config, connection, sale state and minting together.
//!
//! # Data Flow
//! ```text
//! mount()           → ConfigLoader → SaleConfig (once)
//! connect()         → ChainConnection → SaleState::refresh
//! disconnect()      → ChainConnection (binding dropped)
//! wallet events     → ChainConnection::apply_event → SaleState::refresh (account changed)
//! +/- quantity      → QuantitySelector (ignored while submitting)
//! mint()            → MintOrchestrator::submit → SaleState::refresh
//! view()            → SaleView (what the page shows)
//! ```

pub mod session;
pub mod view;

pub use session::MintSession;
pub use view::SaleView;
