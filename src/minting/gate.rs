//! Mint preconditions.
//!
//! Checked in a fixed order; the first failing check decides what the user sees:
//! config loaded → not paused → supply left → wallet connected → whitelisted.

use alloy::primitives::Address;

use crate::config::schema::SaleConfig;
use crate::connection::ConnectionState;
use crate::sale::SaleSnapshot;

/// Why minting is blocked, or that it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintGate {
    /// The sale document never loaded.
    ConfigUnavailable,
    /// `PAUSED` is set.
    Paused,
    /// Supply cap reached. Only the marketplace link is offered.
    SoldOut {
        marketplace: String,
        link: String,
    },
    /// No bound account. Carries the last connection error, if any.
    NotConnected {
        network: String,
        error: Option<String>,
    },
    /// The account is not on a non-empty whitelist.
    NotWhitelisted { account: Address },
    /// Minting allowed for this account.
    Open { account: Address },
}

/// Evaluate the precondition ladder.
pub fn evaluate<C>(
    config: Option<&SaleConfig>,
    snapshot: &SaleSnapshot,
    connection: &ConnectionState<C>,
) -> MintGate {
    let Some(config) = config else {
        return MintGate::ConfigUnavailable;
    };

    if config.paused {
        return MintGate::Paused;
    }

    if snapshot.total_supply >= config.max_supply {
        return MintGate::SoldOut {
            marketplace: config.marketplace_name.clone(),
            link: config.marketplace_link.clone(),
        };
    }

    let Some(account) = connection.account() else {
        return MintGate::NotConnected {
            network: config.network.name.clone(),
            error: connection.error_message().map(str::to_string),
        };
    };

    if !is_allowed(&config.whitelist, &account.to_string()) {
        return MintGate::NotWhitelisted { account };
    }

    MintGate::Open { account }
}

/// Whitelist membership.
///
/// True iff the list is empty or contains the lowercased account exactly.
/// The stored list is not normalized; entries are expected lowercase.
pub fn is_allowed(whitelist: &[String], account: &str) -> bool {
    if whitelist.is_empty() {
        return true;
    }
    let account = account.to_lowercase();
    whitelist.iter().any(|entry| *entry == account)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn account() -> Address {
        ACCOUNT.parse().unwrap()
    }

    fn open_config() -> SaleConfig {
        SaleConfig {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            max_supply: 100,
            paused: false,
            marketplace_name: "Opensea".to_string(),
            marketplace_link: "https://opensea.io".to_string(),
            ..SaleConfig::default()
        }
    }

    fn connected() -> ConnectionState<()> {
        ConnectionState::Connected {
            account: account(),
            contract: (),
        }
    }

    #[test]
    fn test_empty_whitelist_allows_everyone() {
        assert!(is_allowed(&[], ACCOUNT));
    }

    #[test]
    fn test_whitelist_is_case_insensitive_on_account() {
        let list = vec![ACCOUNT.to_lowercase()];
        assert!(is_allowed(&list, ACCOUNT));
        assert!(is_allowed(&list, &ACCOUNT.to_uppercase().replace("0X", "0x")));
    }

    #[test]
    fn test_whitelist_rejects_partial_matches() {
        let list = vec!["0xabc".to_string()];
        assert!(!is_allowed(&list, "0xabcd"));
        assert!(!is_allowed(&list, "0xab"));
        assert!(is_allowed(&list, "0xABC"));
    }

    #[test]
    fn test_whitelist_entries_are_not_normalized() {
        let list = vec![ACCOUNT.to_string()];
        assert!(!is_allowed(&list, ACCOUNT));
    }

    #[test]
    fn test_missing_config_blocks() {
        let gate = evaluate(None, &SaleSnapshot::default(), &connected());
        assert_eq!(gate, MintGate::ConfigUnavailable);
    }

    #[test]
    fn test_paused_wins_over_everything() {
        let config = SaleConfig { paused: true, ..open_config() };
        let snapshot = SaleSnapshot { total_supply: 100 };
        assert_eq!(evaluate(Some(&config), &snapshot, &connected()), MintGate::Paused);
    }

    #[test]
    fn test_sold_out_regardless_of_connection_and_whitelist() {
        let mut config = open_config();
        config.whitelist = vec!["0x0000000000000000000000000000000000000001".to_string()];
        let snapshot = SaleSnapshot { total_supply: 100 };

        for connection in [connected(), ConnectionState::Disconnected] {
            let gate = evaluate(Some(&config), &snapshot, &connection);
            assert!(matches!(gate, MintGate::SoldOut { .. }));
        }
    }

    #[test]
    fn test_not_connected_carries_error() {
        let config = open_config();
        let connection: ConnectionState<()> = ConnectionState::Error {
            message: "Change network to Ethereum.".to_string(),
        };
        let gate = evaluate(Some(&config), &SaleSnapshot::default(), &connection);
        assert_eq!(
            gate,
            MintGate::NotConnected {
                network: String::new(),
                error: Some("Change network to Ethereum.".to_string()),
            }
        );
    }

    #[test]
    fn test_whitelist_gate() {
        let mut config = open_config();
        config.whitelist = vec!["0x0000000000000000000000000000000000000001".to_string()];
        let gate = evaluate(Some(&config), &SaleSnapshot::default(), &connected());
        assert_eq!(gate, MintGate::NotWhitelisted { account: account() });

        config.whitelist.push(ACCOUNT.to_lowercase());
        let gate = evaluate(Some(&config), &SaleSnapshot::default(), &connected());
        assert_eq!(gate, MintGate::Open { account: account() });
    }
}
