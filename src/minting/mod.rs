//! Minting subsystem.
//!
//! # Data Flow
//! ```text
//! QuantitySelector (1..=10)
//!     + SaleConfig + SaleSnapshot + ConnectionState
//!     → gate.rs (paused? sold out? connected? whitelisted?)
//!     → request.rs (cost = WEI_COST × n, gas = GAS_LIMIT × n)
//!     → orchestrator.rs (Idle → Submitting → Idle, feedback, refresh)
//! ```

pub mod gate;
pub mod orchestrator;
pub mod quantity;
pub mod request;

pub use gate::{is_allowed, MintGate};
pub use orchestrator::{MintOrchestrator, MintPhase, SubmitResult, FAILURE_FEEDBACK, INITIAL_FEEDBACK};
pub use quantity::{QuantitySelector, MAX_QUANTITY, MIN_QUANTITY};
pub use request::MintRequest;
