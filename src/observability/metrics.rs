//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mint_submissions_total` (counter): submit calls by outcome
//!   (`success`, `error`, `busy`, `blocked`)
//! - `sale_refresh_total` (counter): supply reads by result (`ok`, `error`, `skipped`)
//! - `sale_total_supply` (gauge): last read total supply
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_mint_submission(outcome: &'static str) {
    ::metrics::counter!("mint_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_sale_refresh(result: &'static str) {
    ::metrics::counter!("sale_refresh_total", "result" => result).increment(1);
}

pub fn record_total_supply(total_supply: u64) {
    ::metrics::gauge!("sale_total_supply").set(total_supply as f64);
}
