//! Mint transaction building and receipt mapping.
//!
//! # Responsibilities
//! - Turn a validated mint request into a transaction request
//! - Encode `mint(quantity)` call data
//! - Map receipts to mint outcomes

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol_types::SolCall;

use crate::blockchain::contract::ISaleContract;
use crate::blockchain::types::{BlockchainError, BlockchainResult, MintReceipt};

/// Parameters of one `mint` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintTransaction {
    /// Sale contract address.
    pub to: Address,
    /// Connected account paying for the mint.
    pub from: Address,
    /// Total cost in wei.
    pub value: U256,
    /// Total gas limit.
    pub gas_limit: u64,
    /// Number of tokens to mint.
    pub quantity: u8,
}

impl MintTransaction {
    /// ABI-encoded `mint(uint256)` call.
    pub fn calldata(&self) -> Bytes {
        ISaleContract::mintCall {
            _mintAmount: U256::from(self.quantity),
        }
        .abi_encode()
        .into()
    }

    /// Build the transaction request sent through the signing provider.
    ///
    /// Nonce, fees and chain ID are left to the provider's fillers.
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.to)
            .with_value(self.value)
            .with_gas_limit(self.gas_limit)
            .with_input(self.calldata())
    }
}

/// Map an included transaction's receipt to a mint result.
pub fn receipt_result(receipt: &TransactionReceipt) -> BlockchainResult<MintReceipt> {
    if !receipt.status() {
        return Err(BlockchainError::Reverted(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(MintReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}
