//! Wallet environment backed by a local key and JSON-RPC.
//!
//! The key plays the role of the injected browser wallet: a missing key is
//! "no provider". Chain switches are detected by polling the RPC chain ID.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::contract::OnchainSale;
use crate::blockchain::provider::{WalletEvent, WalletProvider};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConnectionError};
use crate::blockchain::wallet::Wallet;

const EVENT_CAPACITY: usize = 16;

/// [`WalletProvider`] over a [`Wallet`] and a [`BlockchainClient`].
pub struct LocalWalletProvider {
    client: BlockchainClient,
    wallet: Option<Wallet>,
    signer: Option<Arc<dyn Provider + Send + Sync>>,
    events: broadcast::Sender<WalletEvent>,
}

impl LocalWalletProvider {
    /// Create a provider. `wallet = None` models an environment without a wallet.
    pub fn new(client: BlockchainClient, wallet: Option<Wallet>) -> BlockchainResult<Self> {
        let signer = match &wallet {
            Some(w) => {
                let url: url::Url = client.config().rpc_url.parse().map_err(|e| {
                    BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", client.config().rpc_url, e))
                })?;
                let provider = ProviderBuilder::new()
                    .wallet(w.ethereum_wallet())
                    .connect_http(url);
                Some(Arc::new(provider) as Arc<dyn Provider + Send + Sync>)
            }
            None => None,
        };

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            client,
            wallet,
            signer,
            events,
        })
    }

    /// Create a provider with the key from the environment, if any.
    pub fn from_env(client: BlockchainClient) -> BlockchainResult<Self> {
        let wallet = match Wallet::from_env() {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "No wallet available, minting disabled");
                None
            }
        };
        Self::new(client, wallet)
    }

    /// Publish an event to subscribers.
    pub fn emit(&self, event: WalletEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Poll the RPC chain ID and emit [`WalletEvent::ChainChanged`] on change.
    pub fn spawn_chain_watcher(
        &self,
        interval: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        let client = self.client.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            let mut last: Option<u64> = None;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match client.get_chain_id().await {
                            Ok(id) => {
                                if last.is_some_and(|prev| prev != id.0) {
                                    tracing::info!(chain_id = id.0, "Chain change detected");
                                    let _ = events.send(WalletEvent::ChainChanged(id.0));
                                }
                                last = Some(id.0);
                            }
                            Err(e) => tracing::debug!(error = %e, "Chain watcher poll failed"),
                        }
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("Chain watcher received shutdown signal, exiting loop");
                        break;
                    }
                }
            }
        })
    }
}

impl WalletProvider for LocalWalletProvider {
    type Contract = OnchainSale;

    async fn request_accounts(&self) -> Result<Vec<Address>, ConnectionError> {
        match &self.wallet {
            Some(w) => Ok(vec![w.address()]),
            None => Err(ConnectionError::NoProvider),
        }
    }

    async fn chain_id(&self) -> Result<u64, ConnectionError> {
        Ok(self.client.get_chain_id().await?.0)
    }

    fn contract(&self, address: Address, account: Address) -> OnchainSale {
        OnchainSale::new(self.client.clone(), self.signer.clone(), address, account)
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}
