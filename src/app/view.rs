//! Render-ready view of the sale.

use std::fmt;

use crate::config::schema::SaleConfig;
use crate::minting::gate::MintGate;
use crate::sale::SaleSnapshot;

const ADDRESS_DISPLAY_LEN: usize = 15;

/// Data a front end needs to draw the mint page.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleView {
    /// "{total} / {max}".
    pub supply_line: String,
    /// Contract address shortened for display.
    pub contract_label: String,
    pub scan_link: String,
    /// "1 {SYMBOL} costs {DISPLAY_COST} {NETWORK.SYMBOL}."
    pub price_line: String,
    pub gate: MintGate,
    pub feedback: String,
    pub quantity: u8,
    /// True while a mint is in flight; controls are disabled.
    pub busy: bool,
    pub gas_notice: String,
}

impl SaleView {
    pub fn build(
        config: Option<&SaleConfig>,
        snapshot: SaleSnapshot,
        gate: MintGate,
        feedback: &str,
        quantity: u8,
        busy: bool,
    ) -> Self {
        let default_config = SaleConfig::default();
        let config = config.unwrap_or(&default_config);

        Self {
            supply_line: format!("{} / {}", snapshot.total_supply, config.max_supply),
            contract_label: truncate(&config.contract_address, ADDRESS_DISPLAY_LEN),
            scan_link: config.scan_link.clone(),
            price_line: format!(
                "1 {} costs {} {}.",
                config.symbol, config.display_cost, config.network.symbol
            ),
            gate,
            feedback: feedback.to_string(),
            quantity,
            busy,
            gas_notice: format!(
                "We have set the gas limit to {} for the contract to successfully mint your NFT. \
                 We recommend that you don't lower the gas limit.",
                config.gas_limit
            ),
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.busy {
            "BUSY"
        } else {
            "BUY"
        }
    }

    /// Main message for the current gate.
    pub fn headline(&self) -> String {
        match &self.gate {
            MintGate::ConfigUnavailable => "Sale configuration unavailable.".to_string(),
            MintGate::Paused => "Mint is not active".to_string(),
            MintGate::SoldOut { marketplace, link } => {
                format!("The sale has ended. You can still find it on {} ({})", marketplace, link)
            }
            MintGate::NotConnected { network, .. } => format!("Connect to the {} network", network),
            MintGate::NotWhitelisted { .. } => {
                "Sorry, you're not on the whitelist :( Come back for the Public Sale!".to_string()
            }
            MintGate::Open { .. } => self.feedback.clone(),
        }
    }
}

impl fmt::Display for SaleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Supply:   {}", self.supply_line)?;
        writeln!(f, "Contract: {} {}", self.contract_label, self.scan_link)?;
        if !matches!(self.gate, MintGate::SoldOut { .. }) {
            writeln!(f, "{} Excluding gas fees.", self.price_line)?;
        }
        writeln!(f, "{}", self.headline())?;
        match &self.gate {
            MintGate::NotConnected { error: Some(error), .. } => writeln!(f, "{}", error)?,
            MintGate::Open { account } => {
                writeln!(f, "Account:  {}", account)?;
                writeln!(f, "Quantity: {} [{}]", self.quantity, self.button_label())?;
            }
            _ => {}
        }
        write!(f, "{}", self.gas_notice)
    }
}

/// Shorten to `len` characters followed by "...".
pub fn truncate(input: &str, len: usize) -> String {
    if input.chars().count() > len {
        let head: String = input.chars().take(len).collect();
        format!("{}...", head)
    } else {
        input.to_string()
    }
}
