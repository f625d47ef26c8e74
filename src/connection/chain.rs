//! Wallet connection management.
//!
//! # Responsibilities
//! - Bind a wallet account and contract handle on explicit connect
//! - Re-validate an existing binding on repeated connect
//! - Fold account and chain changes from the wallet back into the state

use std::sync::Arc;

use alloy::primitives::Address;
use arc_swap::ArcSwap;
use tokio::sync::broadcast;

use crate::blockchain::provider::{WalletEvent, WalletProvider};
use crate::blockchain::types::ConnectionError;
use crate::config::schema::SaleConfig;
use crate::connection::state::ConnectionState;

/// Owner of the [`ConnectionState`]. No other component mutates it.
pub struct ChainConnection<P: WalletProvider> {
    provider: Arc<P>,
    state: ArcSwap<ConnectionState<P::Contract>>,
}

impl<P: WalletProvider> ChainConnection<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            state: ArcSwap::from_pointee(ConnectionState::Disconnected),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> Arc<ConnectionState<P::Contract>> {
        self.state.load_full()
    }

    pub fn current_account(&self) -> Option<Address> {
        self.state.load().account()
    }

    pub fn current_contract_handle(&self) -> Option<P::Contract> {
        self.state.load().contract().cloned()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.provider.subscribe()
    }

    /// Request a binding from the wallet.
    ///
    /// When already connected to the same account on the right chain, the
    /// existing binding is kept untouched.
    pub async fn connect(&self, config: &SaleConfig) -> Result<Address, ConnectionError> {
        let previous = self.state.load_full();
        if !previous.is_connected() {
            self.state.store(Arc::new(ConnectionState::Connecting));
        }

        let result = match self.resolve_account(config).await {
            Ok(account) if previous.account() == Some(account) => {
                tracing::debug!(account = %account, "Existing wallet binding still valid");
                Ok(account)
            }
            Ok(account) => self.bind(config, account).map(|()| account),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Wallet connection failed");
            self.state.store(Arc::new(ConnectionState::Error {
                message: user_message(e, config),
            }));
        }

        result
    }

    /// Drop the current binding.
    pub fn disconnect(&self) {
        if self.state.load().is_connected() {
            tracing::info!("Wallet disconnected");
        }
        self.state.store(Arc::new(ConnectionState::Disconnected));
    }

    /// Apply a change reported by the wallet environment.
    ///
    /// Returns true when the bound account changed. From the `Error` state a
    /// change that could fix the failure (right chain, new accounts) retries
    /// the binding; `Disconnected` waits for an explicit connect.
    pub async fn apply_event(&self, config: &SaleConfig, event: &WalletEvent) -> bool {
        let current = self.state.load_full();
        match &*current {
            ConnectionState::Connected { account, .. } => self.update_binding(config, *account, event),
            ConnectionState::Error { .. } => self.recover(config, event).await,
            ConnectionState::Disconnected | ConnectionState::Connecting => {
                tracing::debug!(?event, "Ignoring wallet event while not connected");
                false
            }
        }
    }

    fn update_binding(&self, config: &SaleConfig, bound: Address, event: &WalletEvent) -> bool {
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.first() {
                None => {
                    tracing::info!("Wallet removed all accounts");
                    self.state.store(Arc::new(ConnectionState::Disconnected));
                    true
                }
                Some(account) if *account == bound => false,
                Some(account) => {
                    tracing::info!(from = %bound, to = %account, "Wallet account changed");
                    if let Err(e) = self.bind(config, *account) {
                        self.state.store(Arc::new(ConnectionState::Error {
                            message: user_message(&e, config),
                        }));
                    }
                    true
                }
            },
            WalletEvent::ChainChanged(chain_id) if *chain_id != config.network.id => {
                tracing::warn!(chain_id, expected = config.network.id, "Wallet switched to another chain");
                let err = ConnectionError::WrongNetwork {
                    expected: config.network.id,
                    actual: *chain_id,
                };
                self.state.store(Arc::new(ConnectionState::Error {
                    message: user_message(&err, config),
                }));
                true
            }
            WalletEvent::ChainChanged(_) => false,
        }
    }

    async fn recover(&self, config: &SaleConfig, event: &WalletEvent) -> bool {
        match event {
            WalletEvent::AccountsChanged(accounts) if accounts.is_empty() => {
                self.state.store(Arc::new(ConnectionState::Disconnected));
                false
            }
            WalletEvent::ChainChanged(chain_id) if *chain_id != config.network.id => false,
            _ => {
                tracing::info!(?event, "Wallet changed after a failed connection, retrying");
                let result = match self.resolve_account(config).await {
                    Ok(account) => self.bind(config, account),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(error = %e, "Wallet still unusable");
                        self.state.store(Arc::new(ConnectionState::Error {
                            message: user_message(&e, config),
                        }));
                        false
                    }
                }
            }
        }
    }

    async fn resolve_account(&self, config: &SaleConfig) -> Result<Address, ConnectionError> {
        let accounts = self.provider.request_accounts().await?;
        let account = accounts
            .first()
            .copied()
            .ok_or_else(|| ConnectionError::Rejected("wallet returned no accounts".to_string()))?;

        let chain_id = self.provider.chain_id().await?;
        if chain_id != config.network.id {
            return Err(ConnectionError::WrongNetwork {
                expected: config.network.id,
                actual: chain_id,
            });
        }

        Ok(account)
    }

    fn bind(&self, config: &SaleConfig, account: Address) -> Result<(), ConnectionError> {
        let address: Address = config
            .contract_address
            .parse()
            .map_err(|_| ConnectionError::InvalidContract(config.contract_address.clone()))?;

        let contract = self.provider.contract(address, account);
        self.state.store(Arc::new(ConnectionState::Connected { account, contract }));

        tracing::info!(account = %account, contract = %address, "Wallet connected");
        Ok(())
    }
}

/// Message shown to the user for a failed connection.
pub fn user_message(err: &ConnectionError, config: &SaleConfig) -> String {
    match err {
        ConnectionError::NoProvider => "Install a wallet to continue.".to_string(),
        ConnectionError::WrongNetwork { .. } => {
            format!("Change network to {}.", config.network.name)
        }
        ConnectionError::NotConfigured => "Sale configuration unavailable.".to_string(),
        _ => "Something went wrong.".to_string(),
    }
}
