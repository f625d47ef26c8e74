//! Configuration schema definitions.
//!
//! Two documents are described here:
//! - [`SaleConfig`]: the remote sale document (upper-case JSON field names).
//! - [`ClientSettings`]: the local TOML file that tells the client where to
//!   find the sale document and the chain.

use alloy::primitives::U256;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

/// Static sale configuration fetched once at startup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SaleConfig {
    /// Address of the deployed NFT contract.
    pub contract_address: String,

    /// Block explorer link for the contract.
    #[serde(default)]
    pub scan_link: String,

    /// Network the contract lives on.
    pub network: NetworkConfig,

    /// Collection name shown in feedback messages.
    pub nft_name: String,

    /// Token symbol.
    #[serde(default)]
    pub symbol: String,

    /// Maximum number of tokens that can ever be minted.
    pub max_supply: u64,

    /// Price of a single token in wei.
    #[serde(deserialize_with = "deserialize_wei")]
    pub wei_cost: U256,

    /// Price of a single token in whole units, for display only.
    #[serde(default)]
    pub display_cost: f64,

    /// Gas limit for minting a single token.
    pub gas_limit: u64,

    /// Marketplace name shown once the sale has ended.
    #[serde(default, rename = "MARKETPLACE")]
    pub marketplace_name: String,

    /// Marketplace link shown once the sale has ended.
    #[serde(default)]
    pub marketplace_link: String,

    #[serde(default)]
    pub show_background: bool,

    /// Minting is disabled while paused.
    #[serde(default = "default_paused")]
    pub paused: bool,

    /// Lowercase addresses allowed to mint. Empty means public sale.
    #[serde(default)]
    pub whitelist: Vec<String>,
}

/// Network description from the sale document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NetworkConfig {
    /// Human readable network name (e.g., "Ethereum").
    pub name: String,

    /// Native currency symbol (e.g., "ETH").
    pub symbol: String,

    /// EIP-155 chain ID.
    pub id: u64,
}

fn default_paused() -> bool {
    true
}

/// Safe state used until a document has been loaded: paused, nothing to sell.
impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            contract_address: String::new(),
            scan_link: String::new(),
            network: NetworkConfig::default(),
            nft_name: String::new(),
            symbol: String::new(),
            max_supply: 1,
            wei_cost: U256::ZERO,
            display_cost: 0.0,
            gas_limit: 0,
            marketplace_name: String::new(),
            marketplace_link: String::new(),
            show_background: false,
            paused: true,
            whitelist: Vec::new(),
        }
    }
}

/// Accepts a JSON integer of any size or a decimal/hex string.
///
/// The integer is read from its source text, so amounts above `u64::MAX`
/// keep full precision. Fractions, exponents and negatives are rejected.
fn deserialize_wei<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = Box::<RawValue>::deserialize(deserializer)?;
    parse_wei(raw.get()).map_err(D::Error::custom)
}

fn parse_wei(raw: &str) -> Result<U256, String> {
    let raw = raw.trim();

    if raw.starts_with('"') {
        let text: String = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        return text
            .trim()
            .parse::<U256>()
            .map_err(|e| format!("invalid WEI_COST '{}': {}", text, e));
    }

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("WEI_COST must be a non-negative integer or string, got {}", raw));
    }
    U256::from_str_radix(raw, 10).map_err(|e| format!("WEI_COST {} is out of range: {}", raw, e))
}

/// Root settings for the client process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientSettings {
    /// Where the sale document lives.
    pub sale: SaleSourceConfig,

    /// JSON-RPC access.
    pub chain: ChainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Location of the sale document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SaleSourceConfig {
    /// `http(s)://` URL, `file://` URL or plain filesystem path.
    pub config_source: String,

    /// Timeout for fetching the document in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for SaleSourceConfig {
    fn default() -> Self {
        Self {
            config_source: "http://localhost:3000/config/config.json".to_string(),
            fetch_timeout_secs: 10,
        }
    }
}

/// Chain access configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Timeout for read-only RPC requests in seconds.
    pub rpc_timeout_secs: u64,

    /// How often the chain watcher polls the chain ID.
    pub chain_poll_interval_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
            chain_poll_interval_secs: 15,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
