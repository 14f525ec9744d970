//! Remote adapters and collector registration
//!
//! This module provides:
//! - One adapter per remote data source
//! - The single place where collector names are bound to an
//!   adapter and a normalizer
//!
//! All source-specific logic must live in the adapter modules.
//! The orchestrator interacts exclusively through the
//! `RemoteAdapter` trait.

pub mod adapter;
mod full_node;
mod harvester;
mod price;
mod rpc;
mod wallet;

use std::sync::Arc;

use crate::collector::registry::CollectorRegistry;
use crate::config::{Config, RpcEndpoint};
use crate::error::RegistryError;
use crate::normalize;

use full_node::FullNodeAdapter;
use harvester::HarvesterAdapter;
use price::PriceFeedAdapter;
use rpc::ChiaRpc;
use wallet::WalletAdapter;

/// Names of every built-in collector, in registration order.
///
/// This is also the default `metrics` list.
pub const BUILTIN_COLLECTORS: [&str; 4] = [
    "get_blockchain_state",
    "get_wallet_balance",
    "get_plots",
    "get_price",
];

/// Builds the registry of built-in collectors.
///
/// CONTRACT:
/// - Collector names must match `metrics` entries in config.json
/// - Adapters are wrapped in `Arc` and shared by every pass
///
pub fn build_registry(config: &Config) -> Result<CollectorRegistry, RegistryError> {
    let timeout = config.timeout();
    let rpc = |service: &str, endpoint: &RpcEndpoint| {
        ChiaRpc::new(service, endpoint, &config.chia_root, timeout)
    };

    let mut registry = CollectorRegistry::new();

    registry.register(
        BUILTIN_COLLECTORS[0],
        Arc::new(FullNodeAdapter::new(rpc("full_node", &config.full_node))),
        normalize::blockchain_state,
    )?;
    registry.register(
        BUILTIN_COLLECTORS[1],
        Arc::new(WalletAdapter::new(rpc("wallet", &config.wallet))),
        normalize::wallet_balances,
    )?;
    registry.register(
        BUILTIN_COLLECTORS[2],
        Arc::new(HarvesterAdapter::new(rpc("harvester", &config.harvester))),
        normalize::plot_inventory,
    )?;
    registry.register(
        BUILTIN_COLLECTORS[3],
        Arc::new(PriceFeedAdapter::new(config.price.url.clone(), timeout)),
        normalize::price_quote,
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_builtin_collector() {
        let registry = build_registry(&Config::default()).unwrap();

        assert_eq!(registry.names(), BUILTIN_COLLECTORS.to_vec());
    }

    #[test]
    fn collectors_are_bound_to_their_sources() {
        let registry = build_registry(&Config::default()).unwrap();

        let sources: Vec<&str> = BUILTIN_COLLECTORS
            .iter()
            .map(|name| registry.get(name).unwrap().adapter.name())
            .collect();
        assert_eq!(sources, vec!["full_node", "wallet", "harvester", "price_feed"]);
    }

    #[test]
    fn default_config_enables_everything_in_order() {
        let config = Config::default();
        let registry = build_registry(&config).unwrap();

        let enabled: Vec<String> = registry
            .enabled_collectors(config.metrics.as_slice())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(enabled, BUILTIN_COLLECTORS.to_vec());
    }
}
