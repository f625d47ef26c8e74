//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Notify};

use nft_mint_client::blockchain::{
    BlockchainError, ConnectionError, MintOutcome, MintReceipt, MintTransaction, SaleContract,
    WalletEvent, WalletProvider,
};
use nft_mint_client::config::{ConfigLoader, SaleSourceConfig};

pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const OTHER_ACCOUNT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const CHAIN_ID: u64 = 31337;

pub fn account() -> Address {
    ACCOUNT.parse().unwrap()
}

pub fn other_account() -> Address {
    OTHER_ACCOUNT.parse().unwrap()
}

/// Sale document with the given overrides merged on top of an open sale.
#[allow(dead_code)]
pub fn sale_document(overrides: serde_json::Value) -> String {
    let mut doc = serde_json::json!({
        "CONTRACT_ADDRESS": CONTRACT,
        "SCAN_LINK": "https://etherscan.io/address/0x5FbDB2315678afecb367f032d93F642f64180aa3",
        "NETWORK": { "NAME": "Anvil", "SYMBOL": "ETH", "ID": CHAIN_ID },
        "NFT_NAME": "Pablo Pieces",
        "SYMBOL": "PP",
        "MAX_SUPPLY": 100,
        "WEI_COST": "75000000000000000",
        "DISPLAY_COST": 0.075,
        "GAS_LIMIT": 285000,
        "MARKETPLACE": "Opensea",
        "MARKETPLACE_LINK": "https://opensea.io/collection/pablo-pieces",
        "SHOW_BACKGROUND": false,
        "PAUSED": false,
        "WHITELIST": []
    });
    if let (Some(base), Some(extra)) = (doc.as_object_mut(), overrides.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    doc.to_string()
}

/// Serve `body` with `status` to every request. Returns the bound address.
#[allow(dead_code)]
pub async fn start_config_server(status: u16, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = Arc::new(body);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

#[allow(dead_code)]
pub fn loader_for(addr: SocketAddr) -> ConfigLoader {
    ConfigLoader::new(&SaleSourceConfig {
        config_source: format!("http://{}/config/config.json", addr),
        fetch_timeout_secs: 5,
    })
    .unwrap()
}

/// In-memory chain shared by the mock wallet and its contract handles.
#[derive(Default)]
pub struct MockChain {
    pub total_supply: AtomicU64,
    pub supply_reads: AtomicUsize,
    pub mint_calls: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_mints: AtomicBool,
    pub hold_mints: AtomicBool,
    pub release: Notify,
    pub last_tx: Mutex<Option<MintTransaction>>,
}

#[allow(dead_code)]
impl MockChain {
    pub fn new(total_supply: u64) -> Arc<Self> {
        let chain = Self::default();
        chain.total_supply.store(total_supply, Ordering::SeqCst);
        Arc::new(chain)
    }

    pub fn supply_reads(&self) -> usize {
        self.supply_reads.load(Ordering::SeqCst)
    }

    pub fn mint_calls(&self) -> usize {
        self.mint_calls.load(Ordering::SeqCst)
    }

    pub fn last_tx(&self) -> Option<MintTransaction> {
        self.last_tx.lock().unwrap().clone()
    }
}

#[derive(Clone)]
pub struct MockContract {
    pub chain: Arc<MockChain>,
    pub account: Address,
}

impl SaleContract for MockContract {
    async fn total_supply(&self) -> Result<U256, BlockchainError> {
        self.chain.supply_reads.fetch_add(1, Ordering::SeqCst);
        if self.chain.fail_reads.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rpc("node unavailable".to_string()));
        }
        Ok(U256::from(self.chain.total_supply.load(Ordering::SeqCst)))
    }

    async fn mint(&self, tx: MintTransaction) -> MintOutcome {
        self.chain.mint_calls.fetch_add(1, Ordering::SeqCst);
        *self.chain.last_tx.lock().unwrap() = Some(tx.clone());

        if self.chain.hold_mints.load(Ordering::SeqCst) {
            self.chain.release.notified().await;
        }

        if self.chain.fail_mints.load(Ordering::SeqCst) {
            return MintOutcome::Error(BlockchainError::Rpc(
                "execution reverted: 0xdeadbeef insufficient funds".to_string(),
            ));
        }

        self.chain
            .total_supply
            .fetch_add(tx.quantity as u64, Ordering::SeqCst);
        MintOutcome::Success(MintReceipt {
            tx_hash: TxHash::repeat_byte(0x11),
            block_number: Some(1),
            gas_used: 100_000,
        })
    }
}

/// Wallet environment under test control.
pub struct MockWallet {
    pub chain: Arc<MockChain>,
    pub accounts: Mutex<Result<Vec<Address>, ConnectionError>>,
    pub chain_id: AtomicU64,
    pub account_requests: AtomicUsize,
    pub events: broadcast::Sender<WalletEvent>,
}

#[allow(dead_code)]
impl MockWallet {
    pub fn new(chain: Arc<MockChain>) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            chain,
            accounts: Mutex::new(Ok(vec![account()])),
            chain_id: AtomicU64::new(CHAIN_ID),
            account_requests: AtomicUsize::new(0),
            events,
        })
    }

    pub fn set_accounts(&self, accounts: Result<Vec<Address>, ConnectionError>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    pub fn set_chain_id(&self, id: u64) {
        self.chain_id.store(id, Ordering::SeqCst);
    }

    pub fn emit(&self, event: WalletEvent) {
        let _ = self.events.send(event);
    }
}

impl WalletProvider for MockWallet {
    type Contract = MockContract;

    async fn request_accounts(&self) -> Result<Vec<Address>, ConnectionError> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        self.accounts.lock().unwrap().clone()
    }

    async fn chain_id(&self) -> Result<u64, ConnectionError> {
        Ok(self.chain_id.load(Ordering::SeqCst))
    }

    fn contract(&self, _address: Address, account: Address) -> MockContract {
        MockContract {
            chain: self.chain.clone(),
            account,
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}
