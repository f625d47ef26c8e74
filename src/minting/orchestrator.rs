//! Mint transaction orchestration.
//!
//! # Responsibilities
//! - Enforce the precondition ladder before leaving Idle
//! - Allow at most one in-flight mint
//! - Build the transaction from the sale document and quantity
//! - Map the outcome to user feedback and refresh the sale state
//!
//! # Design Decisions
//! - Idle → Submitting → Idle; success and failure both return to Idle
//! - A submit while Submitting is a no-op, even if the UI failed to disable it
//! - No timeout: a transport that never resolves keeps the orchestrator Submitting

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy::primitives::Address;
use arc_swap::ArcSwap;

use crate::blockchain::provider::SaleContract;
use crate::blockchain::types::{BlockchainError, MintOutcome};
use crate::config::schema::SaleConfig;
use crate::connection::ConnectionState;
use crate::minting::gate::{self, MintGate};
use crate::minting::quantity::QuantitySelector;
use crate::minting::request::MintRequest;
use crate::observability::metrics;
use crate::sale::SaleState;

/// Feedback before any mint attempt.
pub const INITIAL_FEEDBACK: &str = "Click buy to mint your NFT.";

/// Feedback after a failed mint. Raw errors only go to the log.
pub const FAILURE_FEEDBACK: &str = "Sorry, something went wrong please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintPhase {
    Idle,
    Submitting,
}

/// Result of a [`MintOrchestrator::submit`] call.
#[derive(Debug)]
pub enum SubmitResult {
    /// A precondition failed; nothing was sent.
    Blocked(MintGate),
    /// Another submit is in flight; nothing was sent.
    Busy,
    /// The transaction completed.
    Completed(MintOutcome),
}

/// The mint state machine. Owns the feedback message.
#[derive(Debug)]
pub struct MintOrchestrator {
    submitting: AtomicBool,
    feedback: ArcSwap<String>,
}

impl MintOrchestrator {
    pub fn new() -> Self {
        Self {
            submitting: AtomicBool::new(false),
            feedback: ArcSwap::from_pointee(INITIAL_FEEDBACK.to_string()),
        }
    }

    pub fn phase(&self) -> MintPhase {
        if self.submitting.load(Ordering::Acquire) {
            MintPhase::Submitting
        } else {
            MintPhase::Idle
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == MintPhase::Submitting
    }

    /// Current user-facing message.
    pub fn feedback(&self) -> Arc<String> {
        self.feedback.load_full()
    }

    /// Attempt a mint of `quantity` tokens.
    ///
    /// On completion the sale state is refreshed for the bound account.
    pub async fn submit<C: SaleContract>(
        &self,
        config: &SaleConfig,
        connection: &ConnectionState<C>,
        sale: &SaleState,
        quantity: QuantitySelector,
    ) -> SubmitResult {
        let gate = gate::evaluate(Some(config), &sale.snapshot(), connection);
        let (account, contract) = match (&gate, connection) {
            (MintGate::Open { .. }, ConnectionState::Connected { account, contract }) => (*account, contract),
            _ => {
                metrics::record_mint_submission("blocked");
                tracing::debug!(?gate, "Mint blocked by precondition");
                return SubmitResult::Blocked(gate);
            }
        };

        let Some(guard) = SubmitGuard::acquire(&self.submitting) else {
            metrics::record_mint_submission("busy");
            tracing::debug!("Mint already in flight, ignoring submit");
            return SubmitResult::Busy;
        };

        let request = MintRequest::new(config, quantity);
        tracing::info!(
            account = %account,
            quantity = request.quantity,
            total_cost_wei = %request.total_cost_wei,
            total_gas_limit = request.total_gas_limit,
            "Submitting mint"
        );
        self.set_feedback(format!("Minting your {}...", config.nft_name));

        let outcome = match config.contract_address.parse::<Address>() {
            Ok(address) => contract.mint(request.to_transaction(address, account)).await,
            Err(e) => MintOutcome::Error(BlockchainError::NotAvailable(format!(
                "invalid contract address: {}",
                e
            ))),
        };

        self.complete(config, &outcome);
        drop(guard);

        sale.refresh(connection).await;
        SubmitResult::Completed(outcome)
    }

    /// Single completion handler for both outcomes.
    fn complete(&self, config: &SaleConfig, outcome: &MintOutcome) {
        match outcome {
            MintOutcome::Success(receipt) => {
                metrics::record_mint_submission("success");
                tracing::info!(
                    tx_hash = %receipt.tx_hash,
                    block_number = ?receipt.block_number,
                    gas_used = receipt.gas_used,
                    "Mint confirmed"
                );
                self.set_feedback(success_feedback(config));
            }
            MintOutcome::Error(e) => {
                metrics::record_mint_submission("error");
                tracing::error!(error = %e, "Mint transaction failed");
                self.set_feedback(FAILURE_FEEDBACK.to_string());
            }
        }
    }

    fn set_feedback(&self, message: String) {
        self.feedback.store(Arc::new(message));
    }
}

impl Default for MintOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn success_feedback(config: &SaleConfig) -> String {
    let marketplace = if config.marketplace_name.is_empty() {
        "the marketplace"
    } else {
        config.marketplace_name.as_str()
    };
    format!(
        "WOW, the {} is yours! Go visit {} to view it.",
        config.nft_name, marketplace
    )
}

/// Holds the Submitting flag; released on drop, including cancellation.
struct SubmitGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let guard = SubmitGuard::acquire(&flag).unwrap();
        assert!(SubmitGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(SubmitGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_starts_idle_with_initial_feedback() {
        let orchestrator = MintOrchestrator::new();
        assert_eq!(orchestrator.phase(), MintPhase::Idle);
        assert_eq!(orchestrator.feedback().as_str(), INITIAL_FEEDBACK);
    }

    #[test]
    fn test_success_feedback_names_collection() {
        let config = SaleConfig {
            nft_name: "Pablo Pieces".to_string(),
            marketplace_name: "Opensea".to_string(),
            ..SaleConfig::default()
        };
        assert_eq!(
            success_feedback(&config),
            "WOW, the Pablo Pieces is yours! Go visit Opensea to view it."
        );
    }
}
