//! Sale document validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (max supply, gas limit headroom)
//! - Check the contract address is a real address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SaleConfig → Result<(), Vec<ValidationError>>
//! - Runs before the document is accepted into the session

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::SaleConfig;
use crate::minting::quantity::MAX_QUANTITY;

/// A single semantic problem with the sale document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("MAX_SUPPLY must be at least 1")]
    ZeroMaxSupply,

    #[error("CONTRACT_ADDRESS '{0}' is not a valid address")]
    InvalidContractAddress(String),

    #[error("GAS_LIMIT {0} overflows when multiplied by the maximum quantity")]
    GasLimitTooLarge(u64),
}

/// Validate a parsed sale document.
pub fn validate_sale_config(config: &SaleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.max_supply == 0 {
        errors.push(ValidationError::ZeroMaxSupply);
    }

    if config.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidContractAddress(
            config.contract_address.clone(),
        ));
    }

    if config.gas_limit.checked_mul(MAX_QUANTITY as u64).is_none() {
        errors.push(ValidationError::GasLimitTooLarge(config.gas_limit));
    }

    // Comparison is against the lowercased account, so these can never match.
    for entry in &config.whitelist {
        if entry.chars().any(|c| c.is_ascii_uppercase()) {
            tracing::warn!(entry = %entry, "Whitelist entry is not lowercase and will never match");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SaleConfig {
        SaleConfig {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            max_supply: 100,
            gas_limit: 285_000,
            ..SaleConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_sale_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = SaleConfig {
            contract_address: "not-an-address".to_string(),
            max_supply: 0,
            gas_limit: u64::MAX,
            ..SaleConfig::default()
        };
        let errors = validate_sale_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroMaxSupply));
        assert!(errors.contains(&ValidationError::GasLimitTooLarge(u64::MAX)));
    }

    #[test]
    fn test_uppercase_whitelist_is_not_rejected() {
        let mut config = valid_config();
        config.whitelist.push("0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266".to_string());
        assert!(validate_sale_config(&config).is_ok());
    }
}
