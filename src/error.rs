use std::path::PathBuf;
use std::time::Duration;

// ------------------------------------------------------------
// Error taxonomy
// ------------------------------------------------------------
//
// Only `ConfigError` and `RegistryError` can stop the process,
// and only at startup. Everything raised while a collection pass
// is running ends up as a `CollectError` and stays inside the
// collector that produced it.
//

/// Failure of a single remote adapter call.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Connection refused, TLS handshake failure, HTTP status error, ...
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call did not finish within the collector timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The remote service answered but reported an error.
    #[error("remote error: {0}")]
    Remote(String),

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Client certificate or key could not be loaded.
    #[error("cannot load client certificate {path}: {source}")]
    Certificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The adapter chose not to produce data for this pass.
    #[error("skipped: {0}")]
    Skipped(String),
}

impl AdapterError {
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::Malformed(what.into())
    }
}

/// Anything that makes one collector contribute zero samples.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// The normalizer was handed a result it does not understand.
    #[error("normalization defect: expected {expected}, got {actual}")]
    NormalizationDefect {
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("collector '{0}' is already registered")]
    DuplicateCollector(String),
}

/// Configuration exists but cannot be used at all.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
