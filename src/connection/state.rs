//! Wallet binding state.

use alloy::primitives::Address;

/// Current binding between the session, a wallet account and the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState<C> {
    /// Initial state; nothing bound.
    Disconnected,
    /// A connect attempt is in flight.
    Connecting,
    /// Account bound with a contract handle sending from it.
    Connected { account: Address, contract: C },
    /// Last attempt failed; the message is safe to show to the user.
    Error { message: String },
}

impl<C> ConnectionState<C> {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    /// Bound account, `None` unless connected.
    pub fn account(&self) -> Option<Address> {
        match self {
            ConnectionState::Connected { account, .. } => Some(*account),
            _ => None,
        }
    }

    /// Bound contract handle, `None` unless connected.
    pub fn contract(&self) -> Option<&C> {
        match self {
            ConnectionState::Connected { contract, .. } => Some(contract),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ConnectionState::Error { message } => Some(message),
            _ => None,
        }
    }
}

impl<C> Default for ConnectionState<C> {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}
