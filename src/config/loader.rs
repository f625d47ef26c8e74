//! Configuration loading.
//!
//! - [`load_settings`] reads the local TOML settings file.
//! - [`ConfigLoader`] fetches the sale document over HTTP or from disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::config::schema::{ClientSettings, SaleConfig, SaleSourceConfig};
use crate::config::validation::{validate_sale_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Http(reqwest::Error),
    Parse(serde_json::Error),
    Settings(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Http(e) => write!(f, "HTTP error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Settings(e) => write!(f, "Settings error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load client settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<ClientSettings, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Settings)
}

/// Where the sale document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Http(Url),
    File(PathBuf),
}

impl ConfigSource {
    /// Interpret a settings string as a URL or a filesystem path.
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => ConfigSource::Http(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => ConfigSource::File(path),
                Err(()) => ConfigSource::File(PathBuf::from(url.path())),
            },
            _ => ConfigSource::File(PathBuf::from(source)),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Http(url) => write!(f, "{}", url),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and validates the sale document.
///
/// No retries: a failed load leaves the session in its safe default state.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    source: ConfigSource,
    client: reqwest::Client,
}

impl ConfigLoader {
    /// Create a loader for the configured source.
    pub fn new(config: &SaleSourceConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(ConfigError::Http)?;

        Ok(Self {
            source: ConfigSource::parse(&config.config_source),
            client,
        })
    }

    /// The source this loader reads from.
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Fetch, parse and validate the sale document.
    pub async fn load(&self) -> Result<SaleConfig, ConfigError> {
        let body = match &self.source {
            ConfigSource::Http(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .header(CONTENT_TYPE, "application/json")
                    .header(ACCEPT, "application/json")
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(ConfigError::Http)?;
                response.text().await.map_err(ConfigError::Http)?
            }
            ConfigSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(ConfigError::Io)?,
        };

        let config: SaleConfig = serde_json::from_str(&body).map_err(ConfigError::Parse)?;
        validate_sale_config(&config).map_err(ConfigError::Validation)?;

        tracing::info!(
            source = %self.source,
            contract = %config.contract_address,
            network = %config.network.name,
            chain_id = config.network.id,
            max_supply = config.max_supply,
            paused = config.paused,
            whitelist_size = config.whitelist.len(),
            "Sale configuration loaded"
        );

        Ok(config)
    }
}
