//! On-chain sale contract bindings.

use std::sync::Arc;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::provider::SaleContract;
use crate::blockchain::transaction::{receipt_result, MintTransaction};
use crate::blockchain::types::{BlockchainError, BlockchainResult, MintOutcome, MintReceipt};

sol! {
    /// Subset of the NFT sale contract used by the client.
    interface ISaleContract {
        function mint(uint256 _mintAmount) external payable;
        function totalSupply() external view returns (uint256);
    }
}

/// Sale contract reached through JSON-RPC.
///
/// Reads go through the failover client; mints go through the signing provider.
#[derive(Clone)]
pub struct OnchainSale {
    client: BlockchainClient,
    signer: Option<Arc<dyn Provider + Send + Sync>>,
    address: Address,
    account: Address,
}

impl OnchainSale {
    pub fn new(
        client: BlockchainClient,
        signer: Option<Arc<dyn Provider + Send + Sync>>,
        address: Address,
        account: Address,
    ) -> Self {
        Self {
            client,
            signer,
            address,
            account,
        }
    }

    async fn send_mint(&self, tx: MintTransaction) -> BlockchainResult<MintReceipt> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| BlockchainError::NotAvailable("no signing provider".to_string()))?;

        let pending = signer
            .send_transaction(tx.to_request())
            .await
            .map_err(|e| BlockchainError::Rpc(format!("send failed: {}", e)))?;

        tracing::info!(tx_hash = %pending.tx_hash(), quantity = tx.quantity, "Mint transaction sent");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| BlockchainError::Rpc(format!("receipt unavailable: {}", e)))?;

        receipt_result(&receipt)
    }
}

impl SaleContract for OnchainSale {
    async fn total_supply(&self) -> BlockchainResult<U256> {
        let request = TransactionRequest::default()
            .with_to(self.address)
            .with_input(ISaleContract::totalSupplyCall {}.abi_encode());

        let output = self.client.call(request).await?;
        ISaleContract::totalSupplyCall::abi_decode_returns(&output)
            .map_err(|e| BlockchainError::Decode(e.to_string()))
    }

    async fn mint(&self, tx: MintTransaction) -> MintOutcome {
        self.send_mint(tx).await.into()
    }
}

impl std::fmt::Debug for OnchainSale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnchainSale")
            .field("address", &self.address)
            .field("account", &self.account)
            .field("can_sign", &self.signer.is_some())
            .finish()
    }
}
