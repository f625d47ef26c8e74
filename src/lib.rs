//! NFT mint client library.
//!
//! Loads a sale document, binds a wallet account, reads on-chain supply and
//! submits `mint` transactions to a fixed sale contract.

pub mod app;
pub mod blockchain;
pub mod config;
pub mod connection;
pub mod lifecycle;
pub mod minting;
pub mod observability;
pub mod sale;

pub use app::{MintSession, SaleView};
pub use config::schema::{ClientSettings, SaleConfig};
pub use lifecycle::Shutdown;
