use crate::error::AdapterError;
use crate::schema::RemoteResult;

/// RemoteAdapter is the boundary between:
/// - The generic collection orchestrator
/// - One remote data source (node RPC service or price feed)
///
/// Each implementation must:
/// - Perform the remote call(s) for one category of data
/// - Validate the remote answer
/// - Translate it into exactly one `RemoteResult` variant
///
/// DESIGN GOALS:
/// - Zero source-specific logic outside adapters
/// - Response format fragility stays behind this trait
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - Adapter instances are shared across concurrent scrapes
///
#[async_trait::async_trait]
pub trait RemoteAdapter: Send + Sync {
    /// Short source identifier used in logs.
    ///
    /// EXAMPLES:
    /// - "full_node"
    /// - "wallet"
    /// - "price_feed"
    ///
    fn name(&self) -> &'static str;

    /// Fetches fresh data from the remote source.
    ///
    /// OUTPUT:
    /// - Ok(Some(result)) for usable data
    /// - Ok(None) when the source legitimately has nothing to
    ///   report; this is not a failure
    /// - Err(_) for connection errors, remote errors and
    ///   malformed payloads
    ///
    /// IMPORTANT:
    /// - Must NEVER panic on bad remote data
    /// - Must not return a partially populated result
    /// - The caller enforces the overall timeout; adapters may
    ///   still apply their own per-request timeouts
    ///
    async fn fetch(&self) -> Result<Option<RemoteResult>, AdapterError>;
}
