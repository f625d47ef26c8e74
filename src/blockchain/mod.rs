//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variable (private key)
//!     → wallet.rs (key loading)
//!     → local.rs (wallet environment: accounts, chain, events)
//!     → contract.rs (totalSupply reads, mint sends)
//!     → transaction.rs (request building, receipt mapping)
//!     → client.rs (read-only RPC with failover and timeouts)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or raw chain errors to the user
//! - Read calls have configurable timeouts; mint sends wait for the receipt

pub mod client;
pub mod contract;
pub mod local;
pub mod provider;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use contract::OnchainSale;
pub use local::LocalWalletProvider;
pub use provider::{SaleContract, WalletEvent, WalletProvider};
pub use transaction::MintTransaction;
pub use types::{BlockchainError, ChainId, ConnectionError, MintOutcome, MintReceipt};
pub use wallet::Wallet;
