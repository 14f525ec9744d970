use serde_json::{Value, json};

use crate::error::AdapterError;
use crate::schema::{RemoteResult, WalletBalances};
use crate::util;

use super::adapter::RemoteAdapter;
use super::rpc::ChiaRpc;

/// Wallet adapter
///
/// Call sequence on one session:
/// 1. `get_wallets`
/// 2. `get_wallet_balance` once per wallet id
/// 3. `get_height_info`
///
/// Any failing call fails the whole fetch; a wallet list with
/// some balances missing is never returned.
pub struct WalletAdapter {
    rpc: ChiaRpc,
}

impl WalletAdapter {
    pub fn new(rpc: ChiaRpc) -> Self {
        Self { rpc }
    }
}

#[async_trait::async_trait]
impl RemoteAdapter for WalletAdapter {
    fn name(&self) -> &'static str {
        "wallet"
    }

    async fn fetch(&self) -> Result<Option<RemoteResult>, AdapterError> {
        let session = self.rpc.connect().await?;

        let wallets = session.call("get_wallets", json!({})).await?;
        let ids = parse_wallet_ids(&wallets)?;

        let mut per_wallet_id = Vec::with_capacity(ids.len());
        for id in ids {
            let balance = session
                .call("get_wallet_balance", json!({ "wallet_id": id }))
                .await?;
            per_wallet_id.push((id, parse_confirmed_balance(&balance)?));
        }

        let height = session.call("get_height_info", json!({})).await?;

        Ok(Some(RemoteResult::WalletBalances(WalletBalances {
            per_wallet_id,
            block_height: util::u64_at(&height, "/height")?,
        })))
    }
}

/// Wallet ids in the order the wallet service listed them.
///
/// A repeated id would produce two identical balance series, so
/// it is rejected as malformed.
pub fn parse_wallet_ids(v: &Value) -> Result<Vec<u32>, AdapterError> {
    let mut ids: Vec<u32> = Vec::new();

    for (i, wallet) in util::array_at(v, "/wallets")?.iter().enumerate() {
        let id = wallet
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| AdapterError::malformed(format!("invalid field /wallets/{i}/id")))?;

        if ids.contains(&id) {
            return Err(AdapterError::malformed(format!(
                "wallet id {id} listed more than once"
            )));
        }
        ids.push(id);
    }

    Ok(ids)
}

pub fn parse_confirmed_balance(v: &Value) -> Result<f64, AdapterError> {
    util::number_at(v, "/wallet_balance/confirmed_wallet_balance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter_for(server: &MockServer) -> WalletAdapter {
        WalletAdapter::new(ChiaRpc::without_identity(server.uri(), Duration::from_secs(2)))
    }

    async fn mount(server: &MockServer, endpoint: &str, body: Value, response: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/{endpoint}")))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_wallets(server: &MockServer) {
        mount(
            server,
            "get_wallets",
            json!({}),
            json!({
                "wallets": [{ "id": 2, "name": "CAT" }, { "id": 1, "name": "Chia Wallet" }],
                "success": true
            }),
        )
        .await;
    }

    fn balance(id: u32, confirmed: u64) -> Value {
        json!({
            "wallet_balance": { "wallet_id": id, "confirmed_wallet_balance": confirmed },
            "success": true
        })
    }

    #[test]
    fn wallet_ids_keep_service_order() {
        let v = json!({
            "wallets": [
                { "id": 2, "name": "CAT", "type": 6 },
                { "id": 1, "name": "Chia Wallet", "type": 0 }
            ],
            "success": true
        });

        assert_eq!(parse_wallet_ids(&v).unwrap(), vec![2, 1]);
    }

    #[test]
    fn empty_wallet_list_is_valid() {
        let v = json!({ "wallets": [], "success": true });

        assert!(parse_wallet_ids(&v).unwrap().is_empty());
    }

    #[test]
    fn wallet_without_id_is_malformed() {
        let v = json!({ "wallets": [{ "id": 1 }, { "name": "broken" }] });

        let err = parse_wallet_ids(&v).unwrap_err();
        assert!(err.to_string().contains("/wallets/1/id"));
    }

    #[test]
    fn confirmed_balance_is_read() {
        let v = json!({
            "wallet_balance": {
                "wallet_id": 1,
                "confirmed_wallet_balance": 500,
                "unconfirmed_wallet_balance": 600
            },
            "success": true
        });

        assert_eq!(parse_confirmed_balance(&v).unwrap(), 500.0);
    }

    #[test]
    fn repeated_wallet_id_is_malformed() {
        let v = json!({ "wallets": [{ "id": 1 }, { "id": 2 }, { "id": 1 }] });

        let err = parse_wallet_ids(&v).unwrap_err();
        assert!(err.to_string().contains("wallet id 1 listed more than once"));
    }

    #[tokio::test]
    async fn fetch_walks_wallets_then_height() {
        let server = MockServer::start().await;
        mount_wallets(&server).await;
        mount(&server, "get_wallet_balance", json!({ "wallet_id": 2 }), balance(2, 1200)).await;
        mount(&server, "get_wallet_balance", json!({ "wallet_id": 1 }), balance(1, 500)).await;
        mount(
            &server,
            "get_height_info",
            json!({}),
            json!({ "height": 42, "success": true }),
        )
        .await;

        let result = adapter_for(&server).fetch().await.unwrap();
        assert_eq!(
            result,
            Some(RemoteResult::WalletBalances(WalletBalances {
                per_wallet_id: vec![(2, 1200.0), (1, 500.0)],
                block_height: 42,
            }))
        );

        let calls: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(
            calls,
            vec![
                "/get_wallets",
                "/get_wallet_balance",
                "/get_wallet_balance",
                "/get_height_info",
            ]
        );
    }

    #[tokio::test]
    async fn remote_error_mid_sequence_fails_whole_fetch() {
        let server = MockServer::start().await;
        mount_wallets(&server).await;
        mount(&server, "get_wallet_balance", json!({ "wallet_id": 2 }), balance(2, 1200)).await;
        mount(
            &server,
            "get_wallet_balance",
            json!({ "wallet_id": 1 }),
            json!({ "success": false, "error": "wallet 1 not found" }),
        )
        .await;

        match adapter_for(&server).fetch().await {
            Err(AdapterError::Remote(msg)) => assert_eq!(msg, "wallet 1 not found"),
            other => panic!("unexpected: {other:?}"),
        }

        let height_calls = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == "/get_height_info")
            .count();
        assert_eq!(height_calls, 0);
    }
}
