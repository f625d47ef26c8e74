//! Sale document loading against a mock HTTP server.

use std::sync::Arc;

use alloy::primitives::U256;
use nft_mint_client::blockchain::ConnectionError;
use nft_mint_client::config::ConfigError;
use nft_mint_client::minting::{MintGate, SubmitResult};
use nft_mint_client::MintSession;

mod common;
use common::{MockChain, MockWallet};

#[tokio::test]
async fn test_load_valid_document() {
    let addr = common::start_config_server(200, common::sale_document(serde_json::json!({}))).await;
    let config = common::loader_for(addr).load().await.expect("document should load");

    assert_eq!(config.nft_name, "Pablo Pieces");
    assert_eq!(config.network.id, common::CHAIN_ID);
    assert_eq!(config.wei_cost, U256::from(75_000_000_000_000_000u64));
}

#[tokio::test]
async fn test_http_error_status() {
    let addr = common::start_config_server(404, "not found".to_string()).await;
    let err = common::loader_for(addr).load().await.unwrap_err();
    assert!(matches!(err, ConfigError::Http(_)));
}

#[tokio::test]
async fn test_malformed_document() {
    let addr = common::start_config_server(200, "{\"CONTRACT_ADDRESS\": 12".to_string()).await;
    let err = common::loader_for(addr).load().await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[tokio::test]
async fn test_invalid_document_fails_validation() {
    let doc = common::sale_document(serde_json::json!({ "MAX_SUPPLY": 0 }));
    let addr = common::start_config_server(200, doc).await;
    let err = common::loader_for(addr).load().await.unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = common::loader_for(addr).load().await.unwrap_err();
    assert!(matches!(err, ConfigError::Http(_)));
}

#[tokio::test]
async fn test_failed_mount_keeps_session_safe() {
    let addr = common::start_config_server(500, "boom".to_string()).await;
    let chain = MockChain::new(0);
    let wallet = MockWallet::new(chain.clone());
    let session = MintSession::new(common::loader_for(addr), wallet.clone());

    assert!(session.mount().await.is_err());
    assert!(session.config().is_none());
    assert_eq!(session.gate(), MintGate::ConfigUnavailable);

    assert_eq!(session.connect().await.unwrap_err(), ConnectionError::NotConfigured);
    assert!(matches!(
        session.mint().await,
        SubmitResult::Blocked(MintGate::ConfigUnavailable)
    ));
    assert_eq!(chain.mint_calls(), 0);
}

#[tokio::test]
async fn test_config_is_written_once() {
    let addr = common::start_config_server(200, common::sale_document(serde_json::json!({}))).await;
    let chain = MockChain::new(0);
    let session = MintSession::new(common::loader_for(addr), MockWallet::new(chain));

    let first = session.mount().await.unwrap();
    let second = session.mount().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
