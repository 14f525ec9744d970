use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::Deserialize;

use crate::adapters::BUILTIN_COLLECTORS;
use crate::error::ConfigError;
use crate::util;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// Top-level structure loaded from `config.json`.
//
// Every field carries a serde default, so a partial file is
// completed field by field and a missing file yields the same
// fully populated configuration as an empty `{}`.
//
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// TCP port the scrape endpoint listens on
    pub port: u16,

    /// Collectors to run, in order
    ///
    /// Unknown names are ignored with a warning.
    pub metrics: Vec<String>,

    /// Node root holding `config/ssl/<service>/` certificates
    pub chia_root: PathBuf,

    /// Upper bound for a single collector's fetch, in seconds
    pub timeout_secs: u64,

    pub full_node: RpcEndpoint,
    pub wallet: RpcEndpoint,
    pub harvester: RpcEndpoint,

    pub price: PriceFeedConfig,

    /// Interval of the runtime stats log line, 0 disables it
    pub stats_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 9101,
            metrics: BUILTIN_COLLECTORS.iter().map(|n| n.to_string()).collect(),
            chia_root: util::default_chia_root(),
            timeout_secs: 10,
            full_node: RpcEndpoint::local(8555),
            wallet: RpcEndpoint::local(9256),
            harvester: RpcEndpoint::local(8560),
            price: PriceFeedConfig::default(),
            stats_interval_secs: 60,
        }
    }
}

impl Config {
    /// Per-collector fetch bound; never below one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

// ------------------------------------------------------------
// Node RPC endpoint
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RpcEndpoint {
    pub host: String,
    pub port: u16,
}

impl RpcEndpoint {
    fn local(port: u16) -> Self {
        Self {
            host: "localhost".to_string(),
            port,
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

// ------------------------------------------------------------
// Price feed
// ------------------------------------------------------------
//
// The URL must answer with a CoinGecko "simple price" shaped
// document: { "chia": { "usd": .., "usd_24h_vol": .. } }
//
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PriceFeedConfig {
    pub url: String,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            url: "https://api.coingecko.com/api/v3/simple/price?ids=chia&vs_currencies=usd&include_24hr_vol=true"
                .to_string(),
        }
    }
}

// ------------------------------------------------------------
// Configuration loader
// ------------------------------------------------------------
//
// Reads a JSON configuration file from disk.
//
// POLICY:
// - Missing file      -> defaults
// - Unparseable file  -> defaults, with a warning
// - Unreadable file   -> ConfigError (fatal at startup)
//
// The returned value is always complete; there is no path that
// yields a half-built configuration.
//
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No configuration at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_str::<Config>(&data) {
        Ok(cfg) => {
            info!("Loaded configuration from {}", path.display());
            Ok(cfg)
        }
        Err(e) => {
            warn!(
                "Invalid configuration in {} ({}), using defaults",
                path.display(),
                e
            );
            Ok(Config::default())
        }
    }
}
