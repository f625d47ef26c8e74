//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs::load_settings
//!     → ClientSettings (where to find the sale document and the chain)
//!
//! sale document (JSON over HTTP, or a local file)
//!     → loader.rs::ConfigLoader (fetch & deserialize)
//!     → validation.rs (semantic checks)
//!     → SaleConfig (validated, written once into the session)
//! ```
//!
//! # Design Decisions
//! - The sale document is loaded exactly once; there is no hot reload
//! - A failed load keeps the paused default, so every sale action stays disabled
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, ConfigError, ConfigLoader, ConfigSource};
pub use schema::{ChainConfig, ClientSettings, NetworkConfig, ObservabilityConfig, SaleConfig, SaleSourceConfig};
