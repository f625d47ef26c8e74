//! Structured logging.
//!
//! `RUST_LOG` overrides the level from the settings file.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for our crates at `level`.
pub fn default_directive(level: &str) -> String {
    format!("nft_mint_client={level},mint_client={level}")
}

/// Initialize the global tracing subscriber. Call once at startup.
pub fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
