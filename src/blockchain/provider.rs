//! Seams to the wallet environment and the deployed sale contract.
//!
//! The session is generic over these traits. [`crate::blockchain::local`]
//! implements them with a local signer and JSON-RPC; tests use in-memory mocks.

use std::future::Future;

use alloy::primitives::{Address, U256};
use tokio::sync::broadcast;

use crate::blockchain::transaction::MintTransaction;
use crate::blockchain::types::{BlockchainResult, ConnectionError, MintOutcome};

/// Changes originating from the wallet environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// The selected accounts changed. The first entry is the active one.
    AccountsChanged(Vec<Address>),
    /// The wallet switched chains.
    ChainChanged(u64),
}

/// Handle to the deployed sale contract, bound to one account.
pub trait SaleContract: Clone + Send + Sync + 'static {
    /// Read-only `totalSupply()` query.
    fn total_supply(&self) -> impl Future<Output = BlockchainResult<U256>> + Send;

    /// Send a `mint(quantity)` transaction and wait for its receipt.
    ///
    /// Resolves only once the environment reports success or failure.
    fn mint(&self, tx: MintTransaction) -> impl Future<Output = MintOutcome> + Send;
}

/// The wallet environment that grants account access.
pub trait WalletProvider: Send + Sync + 'static {
    type Contract: SaleContract;

    /// Ask the wallet for account access.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, ConnectionError>> + Send;

    /// Chain the wallet is currently on.
    fn chain_id(&self) -> impl Future<Output = Result<u64, ConnectionError>> + Send;

    /// Bind the contract at `address` for transactions sent by `account`.
    fn contract(&self, address: Address, account: Address) -> Self::Contract;

    /// Subscribe to account and chain changes.
    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}
