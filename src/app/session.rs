//! Composition root for one client session.
//!
//! Two independent triggers drive the session:
//! - on mount: the sale document is loaded once
//! - on account change: the sale state is refreshed for the new account

use std::sync::{Arc, Mutex, OnceLock};

use alloy::primitives::Address;
use tokio::sync::broadcast;

use crate::app::view::SaleView;
use crate::blockchain::provider::{WalletEvent, WalletProvider};
use crate::blockchain::types::ConnectionError;
use crate::config::loader::{ConfigError, ConfigLoader};
use crate::config::schema::SaleConfig;
use crate::connection::ChainConnection;
use crate::minting::gate::{self, MintGate};
use crate::minting::orchestrator::{MintOrchestrator, SubmitResult};
use crate::minting::quantity::QuantitySelector;
use crate::sale::{SaleSnapshot, SaleState};

/// A browser-session equivalent: config, wallet binding, sale state and minting.
pub struct MintSession<P: WalletProvider> {
    loader: ConfigLoader,
    config: OnceLock<Arc<SaleConfig>>,
    connection: ChainConnection<P>,
    sale: SaleState,
    quantity: Mutex<QuantitySelector>,
    orchestrator: MintOrchestrator,
}

impl<P: WalletProvider> MintSession<P> {
    pub fn new(loader: ConfigLoader, provider: Arc<P>) -> Self {
        Self {
            loader,
            config: OnceLock::new(),
            connection: ChainConnection::new(provider),
            sale: SaleState::new(),
            quantity: Mutex::new(QuantitySelector::new()),
            orchestrator: MintOrchestrator::new(),
        }
    }

    /// Load the sale document. On failure the session stays in its safe state.
    pub async fn mount(&self) -> Result<Arc<SaleConfig>, ConfigError> {
        if let Some(config) = self.config.get() {
            tracing::warn!("Sale configuration already loaded, ignoring mount");
            return Ok(config.clone());
        }

        match self.loader.load().await {
            Ok(config) => Ok(self.config.get_or_init(|| Arc::new(config)).clone()),
            Err(e) => {
                tracing::error!(
                    source = %self.loader.source(),
                    error = %e,
                    "Failed to load sale configuration, sale actions disabled"
                );
                Err(e)
            }
        }
    }

    /// The loaded sale document, if any.
    pub fn config(&self) -> Option<Arc<SaleConfig>> {
        self.config.get().cloned()
    }

    pub fn connection(&self) -> &ChainConnection<P> {
        &self.connection
    }

    pub fn sale(&self) -> &SaleState {
        &self.sale
    }

    pub fn orchestrator(&self) -> &MintOrchestrator {
        &self.orchestrator
    }

    /// Connect the wallet, then refresh the sale state.
    pub async fn connect(&self) -> Result<Address, ConnectionError> {
        let Some(config) = self.config() else {
            tracing::warn!("Connect requested before the sale configuration loaded");
            return Err(ConnectionError::NotConfigured);
        };

        let account = self.connection.connect(&config).await?;
        self.refresh().await;
        Ok(account)
    }

    /// Drop the wallet binding. The sale snapshot is kept for display.
    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    /// Refresh the sale state for the bound account.
    pub async fn refresh(&self) -> SaleSnapshot {
        self.sale.refresh(&self.connection.state()).await
    }

    pub fn quantity(&self) -> QuantitySelector {
        *self.lock_quantity()
    }

    /// Ignored while a mint is in flight.
    pub fn increment_quantity(&self) -> u8 {
        let mut quantity = self.lock_quantity();
        if !self.orchestrator.is_submitting() {
            quantity.increment();
        }
        quantity.value()
    }

    /// Ignored while a mint is in flight.
    pub fn decrement_quantity(&self) -> u8 {
        let mut quantity = self.lock_quantity();
        if !self.orchestrator.is_submitting() {
            quantity.decrement();
        }
        quantity.value()
    }

    /// Ignored while a mint is in flight; clamps into range.
    pub fn set_quantity(&self, value: u8) -> u8 {
        let mut quantity = self.lock_quantity();
        if !self.orchestrator.is_submitting() {
            quantity.set(value);
        }
        quantity.value()
    }

    /// Current precondition status.
    pub fn gate(&self) -> MintGate {
        let config = self.config();
        gate::evaluate(config.as_deref(), &self.sale.snapshot(), &self.connection.state())
    }

    /// Mint the selected quantity for the bound account.
    pub async fn mint(&self) -> SubmitResult {
        let Some(config) = self.config() else {
            return SubmitResult::Blocked(MintGate::ConfigUnavailable);
        };
        let connection = self.connection.state();
        self.orchestrator
            .submit(&config, &connection, &self.sale, self.quantity())
            .await
    }

    /// Subscribe to the wallet's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.connection.subscribe()
    }

    /// Fold one wallet event into the session. Refreshes on account change.
    pub async fn handle_event(&self, event: WalletEvent) {
        let Some(config) = self.config() else {
            tracing::debug!(?event, "Ignoring wallet event before configuration loaded");
            return;
        };

        if self.connection.apply_event(&config, &event).await {
            self.refresh().await;
        }
    }

    /// Process wallet events until shutdown or until the stream closes.
    pub async fn run_events(
        &self,
        mut events: broadcast::Receiver<WalletEvent>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => self.handle_event(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Wallet event stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Wallet event stream closed");
                        break;
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!("Session received shutdown signal, exiting event loop");
                    break;
                }
            }
        }
    }

    /// Everything the UI needs to render the sale.
    pub fn view(&self) -> SaleView {
        let config = self.config();
        SaleView::build(
            config.as_deref(),
            self.sale.snapshot(),
            self.gate(),
            self.orchestrator.feedback().as_str(),
            self.quantity().value(),
            self.orchestrator.is_submitting(),
        )
    }

    fn lock_quantity(&self) -> std::sync::MutexGuard<'_, QuantitySelector> {
        // The selector is always valid, so a poisoned lock is still usable.
        self.quantity.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
