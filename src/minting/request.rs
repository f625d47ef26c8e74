//! Per-submission mint parameters.

use alloy::primitives::{Address, U256};

use crate::blockchain::transaction::MintTransaction;
use crate::config::schema::SaleConfig;
use crate::minting::quantity::QuantitySelector;

/// Cost and gas for minting `quantity` tokens. Built fresh for every submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintRequest {
    pub quantity: u8,
    pub total_cost_wei: U256,
    pub total_gas_limit: u64,
}

impl MintRequest {
    /// Integer (wei-scale) arithmetic only.
    ///
    /// `validate_sale_config` rejects gas limits that would overflow here.
    pub fn new(config: &SaleConfig, quantity: QuantitySelector) -> Self {
        let quantity = quantity.value();
        Self {
            quantity,
            total_cost_wei: config.wei_cost.saturating_mul(U256::from(quantity)),
            total_gas_limit: config.gas_limit.saturating_mul(quantity as u64),
        }
    }

    /// Transaction sending this request from `account` to `contract`.
    pub fn to_transaction(&self, contract: Address, account: Address) -> MintTransaction {
        MintTransaction {
            to: contract,
            from: account,
            value: self.total_cost_wei,
            gas_limit: self.total_gas_limit,
            quantity: self.quantity,
        }
    }
}
