//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Every provider timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Contract returned data we could not decode.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Blockchain client not initialized or disabled.
    #[error("Blockchain not available: {0}")]
    NotAvailable(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Errors raised while binding a wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The environment has no wallet to bind.
    #[error("no wallet provider available")]
    NoProvider,

    /// The wallet refused or returned no account.
    #[error("wallet rejected the connection: {0}")]
    Rejected(String),

    /// The wallet is on a different chain than the sale.
    #[error("wrong network: expected chain {expected}, wallet is on {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// No sale document to bind against.
    #[error("sale configuration not loaded")]
    NotConfigured,

    /// The configured contract address does not parse.
    #[error("invalid contract address '{0}'")]
    InvalidContract(String),

    /// Querying the wallet failed.
    #[error("RPC error: {0}")]
    Rpc(String),
}

impl From<BlockchainError> for ConnectionError {
    fn from(err: BlockchainError) -> Self {
        ConnectionError::Rpc(err.to_string())
    }
}

/// Confirmation record of an included mint transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Completion of a submitted mint transaction.
#[derive(Debug)]
pub enum MintOutcome {
    /// Receipt confirmed with a success status.
    Success(MintReceipt),
    /// The wallet, the transport or the chain reported an error.
    Error(BlockchainError),
}

impl From<BlockchainResult<MintReceipt>> for MintOutcome {
    fn from(result: BlockchainResult<MintReceipt>) -> Self {
        match result {
            Ok(receipt) => MintOutcome::Success(receipt),
            Err(e) => MintOutcome::Error(e),
        }
    }
}
