//! Metric normalizers
//!
//! Pure translation from a `RemoteResult` variant into metric
//! samples. Every normalizer is bound to exactly one variant; a
//! mismatched variant is reported as a `NormalizationDefect`
//! instead of panicking, so the orchestrator can isolate it.
//!
//! Metric names and help strings are part of the public scrape
//! surface and must not change.

use crate::error::CollectError;
use crate::schema::{MetricSample, RemoteResult};

/// Signature every registered normalizer must have.
pub type NormalizeFn = fn(&RemoteResult) -> Result<Vec<MetricSample>, CollectError>;

pub const NETWORK_SIZE: &str = "chia_network_size";
pub const NETWORK_DIFFICULTY: &str = "chia_network_difficulty";
pub const NODE_SYNCED: &str = "chia_is_node_synced";
pub const WALLET_BALANCE: &str = "chia_wallet_balance";
pub const WALLET_HEIGHT: &str = "chia_wallet_height";
pub const PLOT_COUNT: &str = "chia_plot_count_sum";
pub const PLOT_SIZE: &str = "chia_plot_size_sum";
pub const USD_PRICE: &str = "chia_usd_price";
pub const USD_VOLUME: &str = "chia_24hr_volume_usd";

fn defect(expected: &'static str, actual: &RemoteResult) -> CollectError {
    CollectError::NormalizationDefect {
        expected,
        actual: actual.kind(),
    }
}

pub fn blockchain_state(result: &RemoteResult) -> Result<Vec<MetricSample>, CollectError> {
    let RemoteResult::BlockchainState(state) = result else {
        return Err(defect("BlockchainState", result));
    };

    Ok(vec![
        MetricSample::summary(NETWORK_SIZE, "Network size in bytes", state.space_bytes),
        MetricSample::summary(NETWORK_DIFFICULTY, "Network difficulty", state.difficulty),
        MetricSample::summary(
            NODE_SYNCED,
            "Is Node Synced To Blockchain (0/1)",
            if state.is_synced { 1.0 } else { 0.0 },
        ),
    ])
}

/// One balance sample per wallet, in wallet service order,
/// followed by the wallet's block height.
pub fn wallet_balances(result: &RemoteResult) -> Result<Vec<MetricSample>, CollectError> {
    let RemoteResult::WalletBalances(wallets) = result else {
        return Err(defect("WalletBalances", result));
    };

    let mut samples: Vec<MetricSample> = wallets
        .per_wallet_id
        .iter()
        .map(|(id, balance)| {
            MetricSample::summary(WALLET_BALANCE, "Wallet balance", *balance)
                .with_label("wallet_id", id.to_string())
        })
        .collect();

    samples.push(MetricSample::summary(
        WALLET_HEIGHT,
        "Block Height of Chia Wallet",
        wallets.block_height as f64,
    ));

    Ok(samples)
}

pub fn plot_inventory(result: &RemoteResult) -> Result<Vec<MetricSample>, CollectError> {
    let RemoteResult::PlotInventory(plots) = result else {
        return Err(defect("PlotInventory", result));
    };

    Ok(vec![
        MetricSample::summary(PLOT_COUNT, "Sum of plots on machine", plots.count as f64),
        MetricSample::summary(PLOT_SIZE, "Sum of plot size in bytes", plots.total_size_bytes),
    ])
}

pub fn price_quote(result: &RemoteResult) -> Result<Vec<MetricSample>, CollectError> {
    let RemoteResult::PriceQuote(quote) = result else {
        return Err(defect("PriceQuote", result));
    };

    Ok(vec![
        MetricSample::summary(USD_PRICE, "Chia USD Price", quote.usd_price),
        MetricSample::summary(USD_VOLUME, "Chia 24 Hour Volume Traded", quote.usd_volume_24h),
    ])
}
