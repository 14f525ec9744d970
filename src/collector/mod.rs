/// Collector module
///
/// This module groups the collection orchestration layer:
/// - `registry`: explicit name → (adapter, normalizer) bindings
/// - `runner`: the orchestrator executing one collection pass
///
/// The collector layer sits between:
/// - Remote adapters (full node, wallet, harvester, price feed)
/// - The snapshot server (output layer)
///
/// Design notes:
/// - Source-specific logic MUST NOT live here
/// - A failing collector never aborts a pass
pub mod registry;
pub mod runner;
