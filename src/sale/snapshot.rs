//! On-chain sale totals.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::blockchain::provider::SaleContract;
use crate::connection::ConnectionState;
use crate::observability::metrics;

/// Last known on-chain totals. May be stale between refreshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleSnapshot {
    pub total_supply: u64,
}

/// Owner of the [`SaleSnapshot`].
#[derive(Debug)]
pub struct SaleState {
    snapshot: ArcSwap<SaleSnapshot>,
}

impl SaleState {
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(SaleSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> SaleSnapshot {
        **self.snapshot.load()
    }

    /// Re-read `totalSupply()` through the bound contract.
    ///
    /// Not connected: no-op. Read failure: warning, previous snapshot kept.
    pub async fn refresh<C: SaleContract>(&self, connection: &ConnectionState<C>) -> SaleSnapshot {
        let ConnectionState::Connected { account, contract } = connection else {
            metrics::record_sale_refresh("skipped");
            return self.snapshot();
        };

        match contract.total_supply().await {
            Ok(value) => {
                let total_supply = u64::try_from(value).unwrap_or(u64::MAX);
                self.snapshot.store(Arc::new(SaleSnapshot { total_supply }));
                metrics::record_sale_refresh("ok");
                metrics::record_total_supply(total_supply);
                tracing::debug!(account = %account, total_supply, "Sale state refreshed");
            }
            Err(e) => {
                metrics::record_sale_refresh("error");
                tracing::warn!(
                    account = %account,
                    error = %e,
                    "Failed to read total supply, keeping previous snapshot"
                );
            }
        }

        self.snapshot()
    }
}

impl Default for SaleState {
    fn default() -> Self {
        Self::new()
    }
}
