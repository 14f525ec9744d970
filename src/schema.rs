use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Typed result of one remote adapter call.
///
/// One variant per data source. Values are produced fresh for
/// every collection pass and are never mutated afterwards.
///
/// DESIGN NOTES:
/// - Adapters must fail *before* building a variant if the
///   remote answer is incomplete. A constructed variant is
///   always fully populated.
///
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResult {
    BlockchainState(BlockchainState),
    WalletBalances(WalletBalances),
    PlotInventory(PlotInventory),
    PriceQuote(PriceQuote),
}

impl RemoteResult {
    /// Variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteResult::BlockchainState(_) => "BlockchainState",
            RemoteResult::WalletBalances(_) => "WalletBalances",
            RemoteResult::PlotInventory(_) => "PlotInventory",
            RemoteResult::PriceQuote(_) => "PriceQuote",
        }
    }
}

// ------------------------------------------------------------
// Full node
// ------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct BlockchainState {
    /// Estimated network space in bytes
    pub space_bytes: f64,

    pub difficulty: f64,

    pub is_synced: bool,
}

// ------------------------------------------------------------
// Wallet
// ------------------------------------------------------------
//
// Balances are kept as an ordered list rather than a map so
// that the order the wallet service returned is preserved all
// the way to the exposition output.
//
#[derive(Debug, Clone, PartialEq)]
pub struct WalletBalances {
    /// (wallet id, confirmed balance) in wallet service order
    pub per_wallet_id: Vec<(u32, f64)>,

    pub block_height: u64,
}

// ------------------------------------------------------------
// Harvester
// ------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct PlotInventory {
    pub count: u64,

    /// Sum of every plot's file size in bytes
    pub total_size_bytes: f64,
}

// ------------------------------------------------------------
// Price feed
// ------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub usd_price: f64,
    pub usd_volume_24h: f64,
}

/// Exposition type of a metric.
///
/// Every exported family is a summary carrying only its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Summary,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Summary => "summary",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (name, labels, value) observation.
///
/// Labels live in a `BTreeMap`: keys are unique and iteration
/// order is stable, which keeps the encoded output deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub metric_name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    pub value: f64,
    pub labels: BTreeMap<String, String>,
}

impl MetricSample {
    /// Unlabeled summary sample.
    pub fn summary(metric_name: &'static str, help: &'static str, value: f64) -> Self {
        Self {
            metric_name,
            help,
            kind: MetricKind::Summary,
            value,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: &str, value: impl Into<String>) -> Self {
        self.labels.insert(key.to_string(), value.into());
        self
    }
}

/// All samples produced by one completed collection pass.
///
/// IMPORTANT:
/// - Samples keep the order collectors were invoked in.
/// - A snapshot is never modified once `run()` returned it.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    samples: Vec<MetricSample>,
}

impl Snapshot {
    pub fn new(samples: Vec<MetricSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Diagnostic record of one collector invocation.
///
/// Only ever logged; never exposed to scrapers.
#[derive(Debug)]
pub struct CollectionOutcome {
    pub collector: String,
    pub elapsed: Duration,

    /// Number of samples produced, or why none were.
    pub result: Result<usize, String>,
}

impl CollectionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
