//! NFT mint client.
//!
//! # Architecture Overview
//!
//! ```text
//!   settings.toml ──▶ ClientSettings
//!                         │
//!                         ▼
//!   sale document ──▶ ConfigLoader ──▶ MintSession ◀── wallet events (chain watcher)
//!                                         │
//!                     ┌───────────────────┼─────────────────────┐
//!                     ▼                   ▼                     ▼
//!              ChainConnection        SaleState          MintOrchestrator
//!              (wallet binding)    (totalSupply read)   (gate, submit, feedback)
//!                     │                   │                     │
//!                     └──────── LocalWalletProvider / OnchainSale ┘
//!                                         │
//!                                    JSON-RPC node
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use nft_mint_client::blockchain::{BlockchainClient, LocalWalletProvider, MintOutcome};
use nft_mint_client::config::{load_settings, ClientSettings, ConfigLoader};
use nft_mint_client::lifecycle::signals::spawn_signal_handler;
use nft_mint_client::minting::SubmitResult;
use nft_mint_client::observability::{logging, metrics};
use nft_mint_client::{MintSession, Shutdown};

#[derive(Parser)]
#[command(name = "mint-client")]
#[command(about = "Connect a wallet and mint from a configured NFT sale", long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Override the sale document location (URL or path).
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sale state for the configured wallet
    Status,
    /// Mint tokens
    Mint {
        /// Number of tokens (clamped to 1..=10)
        #[arg(short, long, default_value_t = 1)]
        quantity: u8,
    },
    /// Stay connected and follow wallet and chain changes until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => ClientSettings::default(),
    };
    if let Some(source) = cli.config {
        settings.sale.config_source = source;
    }

    logging::init_logging(&settings.observability.log_level);
    tracing::info!("mint-client v{} starting", env!("CARGO_PKG_VERSION"));

    if settings.observability.metrics_enabled {
        match settings.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %settings.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let loader = ConfigLoader::new(&settings.sale)?;
    let client = BlockchainClient::new(settings.chain.clone())?;
    let provider = Arc::new(LocalWalletProvider::from_env(client)?);
    let session = MintSession::new(loader, provider.clone());

    // A failed load leaves the session paused; the view explains why.
    let _ = session.mount().await;

    match cli.command {
        Commands::Status => {
            if session.config().is_some() {
                let _ = session.connect().await;
            }
            println!("{}", session.view());
        }
        Commands::Mint { quantity } => {
            if session.config().is_some() {
                let _ = session.connect().await;
            }
            session.set_quantity(quantity);

            match session.mint().await {
                SubmitResult::Completed(MintOutcome::Success(receipt)) => {
                    println!("{}", session.orchestrator().feedback());
                    println!("Transaction: {}", receipt.tx_hash);
                }
                SubmitResult::Completed(MintOutcome::Error(_)) => {
                    eprintln!("{}", session.orchestrator().feedback());
                }
                SubmitResult::Blocked(_) | SubmitResult::Busy => {
                    println!("{}", session.view());
                }
            }
        }
        Commands::Watch => {
            if session.config().is_some() {
                let _ = session.connect().await;
            }
            println!("{}", session.view());

            let shutdown = Arc::new(Shutdown::new());
            spawn_signal_handler(shutdown.clone());
            let watcher = provider.spawn_chain_watcher(
                Duration::from_secs(settings.chain.chain_poll_interval_secs.max(1)),
                shutdown.subscribe(),
            );

            session.run_events(session.subscribe(), shutdown.subscribe()).await;
            if let Err(e) = watcher.await {
                tracing::error!(error = %e, "Chain watcher task failed");
            }

            println!("{}", session.view());
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
