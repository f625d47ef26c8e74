//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoints (primary + failovers)
//! - Query chain state (chain ID, contract reads)
//! - Handle timeouts and network errors gracefully

use alloy::primitives::Bytes;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::schema::ChainConfig;

/// Read-only RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: ChainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is made here; an unreachable endpoint surfaces on first use.
    pub fn new(config: ChainConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(Arc::new(ProviderBuilder::new().connect_http(primary_url)) as Arc<dyn Provider + Send + Sync>);

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        tracing::info!(
            rpc_url = %config.rpc_url,
            failovers = providers.len() - 1,
            "Blockchain client initialized"
        );

        Ok(Self {
            providers,
            config,
            timeout_duration,
        })
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        let mut timed_out = 0;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    timed_out += 1;
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(self.exhausted(timed_out, "All RPC providers failed"))
    }

    /// Execute a read-only `eth_call`.
    pub async fn call(&self, tx: TransactionRequest) -> BlockchainResult<Bytes> {
        let mut timed_out = 0;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.call(tx.clone());
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => {
                    timed_out += 1;
                    tracing::warn!(provider_idx = i, "RPC timeout");
                }
            }
        }
        Err(self.exhausted(timed_out, "All providers failed to execute call"))
    }

    /// Error once every provider has been tried.
    fn exhausted(&self, timed_out: usize, message: &str) -> BlockchainError {
        if timed_out == self.providers.len() {
            BlockchainError::Timeout(self.config.rpc_timeout_secs)
        } else {
            BlockchainError::Rpc(message.to_string())
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("providers", &self.providers.len())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            rpc_timeout_secs: 2,
            chain_poll_interval_secs: 1,
        }
    }

    #[test]
    fn test_invalid_primary_url() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let err = BlockchainClient::new(config).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[test]
    fn test_invalid_failover_is_skipped() {
        let mut config = test_config();
        config.failover_urls.push("::::".to_string());
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        let client = BlockchainClient::new(config).unwrap();
        assert_eq!(client.providers.len(), 2);
    }

    #[tokio::test]
    async fn test_rpc_failover_exhausted() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());

        let client = BlockchainClient::new(config).unwrap();
        let result = client.get_chain_id().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("All RPC providers failed"));
    }

    #[tokio::test]
    async fn test_unresponsive_provider_times_out() {
        // Accepted by the kernel backlog but never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let mut config = test_config();
        config.rpc_url = format!("http://{}", listener.local_addr().unwrap());
        config.rpc_timeout_secs = 1;

        let client = BlockchainClient::new(config).unwrap();
        let err = client.get_chain_id().await.unwrap_err();
        assert!(matches!(err, BlockchainError::Timeout(1)));
    }
}
