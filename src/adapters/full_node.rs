use serde_json::{Value, json};

use crate::error::AdapterError;
use crate::schema::{BlockchainState, RemoteResult};
use crate::util;

use super::adapter::RemoteAdapter;
use super::rpc::ChiaRpc;

/// Full node adapter
///
/// Single call: `get_blockchain_state`.
pub struct FullNodeAdapter {
    rpc: ChiaRpc,
}

impl FullNodeAdapter {
    pub fn new(rpc: ChiaRpc) -> Self {
        Self { rpc }
    }
}

#[async_trait::async_trait]
impl RemoteAdapter for FullNodeAdapter {
    fn name(&self) -> &'static str {
        "full_node"
    }

    async fn fetch(&self) -> Result<Option<RemoteResult>, AdapterError> {
        let session = self.rpc.connect().await?;
        let response = session.call("get_blockchain_state", json!({})).await?;

        Ok(Some(RemoteResult::BlockchainState(parse_blockchain_state(
            &response,
        )?)))
    }
}

/// Example payload (trimmed):
///
/// { "blockchain_state": { "space": 3.1e19, "difficulty": 2816,
///   "sync": { "synced": true, ... }, ... }, "success": true }
pub fn parse_blockchain_state(v: &Value) -> Result<BlockchainState, AdapterError> {
    Ok(BlockchainState {
        space_bytes: util::number_at(v, "/blockchain_state/space")?,
        difficulty: util::number_at(v, "/blockchain_state/difficulty")?,
        is_synced: util::bool_at(v, "/blockchain_state/sync/synced")?,
    })
}
