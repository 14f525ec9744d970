use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::config::RpcEndpoint;
use crate::error::AdapterError;
use crate::util;

/// Connection parameters of one node RPC service.
///
/// Node services only accept clients presenting the node's
/// private certificate, and serve a self-signed certificate
/// themselves.
///
/// CONNECTION MODEL:
/// - No pooled state is kept between fetches
/// - `connect()` builds a fresh client, used for every call of
///   one fetch and dropped with it
///
#[derive(Debug, Clone)]
pub struct ChiaRpc {
    base_url: String,

    /// Private client certificate and key. `None` talks plain
    /// HTTP without a client identity (test servers only).
    identity: Option<(PathBuf, PathBuf)>,

    timeout: Duration,
}

impl ChiaRpc {
    /// `service` is the node's name for it: "full_node", "wallet", "harvester".
    pub fn new(service: &str, endpoint: &RpcEndpoint, chia_root: &Path, timeout: Duration) -> Self {
        let (cert_path, key_path) = util::private_ssl_paths(chia_root, service);

        Self {
            base_url: endpoint.base_url(),
            identity: Some((cert_path, key_path)),
            timeout,
        }
    }

    /// Unauthenticated client against an arbitrary base URL.
    #[cfg(test)]
    pub fn without_identity(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            identity: None,
            timeout,
        }
    }

    pub async fn connect(&self) -> Result<RpcSession<'_>, AdapterError> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);

        if let Some((cert_path, key_path)) = &self.identity {
            let mut pem = read_pem(cert_path).await?;
            pem.push(b'\n');
            pem.extend(read_pem(key_path).await?);

            builder = builder
                .identity(reqwest::Identity::from_pem(&pem)?)
                .danger_accept_invalid_certs(true);
        }

        Ok(RpcSession {
            rpc: self,
            client: builder.build()?,
        })
    }
}

async fn read_pem(path: &Path) -> Result<Vec<u8>, AdapterError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| AdapterError::Certificate {
            path: path.to_path_buf(),
            source,
        })
}

/// An open client for the calls of a single fetch.
pub struct RpcSession<'a> {
    rpc: &'a ChiaRpc,
    client: reqwest::Client,
}

impl RpcSession<'_> {
    /// POST `<base>/<endpoint>` with a JSON body.
    ///
    /// Returns the response document once the node confirmed
    /// `"success": true`.
    pub async fn call(&self, endpoint: &str, body: Value) -> Result<Value, AdapterError> {
        let url = format!("{}/{}", self.rpc.base_url, endpoint);
        debug!("RPC POST {url}");

        let response: Value = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_success(response)
    }
}

/// Node RPC responses carry `success` and, on failure, `error`.
pub fn check_success(response: Value) -> Result<Value, AdapterError> {
    match response.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(response),
        Some(false) => Err(AdapterError::Remote(
            response
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        )),
        None => Err(AdapterError::malformed("missing field /success")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn successful_response_is_passed_through() {
        let v = json!({ "success": true, "height": 3 });

        assert_eq!(check_success(v.clone()).unwrap(), v);
    }

    #[test]
    fn remote_error_carries_message() {
        let v = json!({ "success": false, "error": "wallet not found" });

        match check_success(v) {
            Err(AdapterError::Remote(msg)) => assert_eq!(msg, "wallet not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn response_without_success_is_malformed() {
        assert!(matches!(
            check_success(json!({ "height": 3 })),
            Err(AdapterError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn missing_certificate_fails_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let rpc = ChiaRpc::new(
            "full_node",
            &RpcEndpoint {
                host: "localhost".into(),
                port: 8555,
            },
            dir.path(),
            Duration::from_secs(1),
        );

        match rpc.connect().await {
            Err(AdapterError::Certificate { path, .. }) => {
                assert!(path.ends_with("private_full_node.crt"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("connect should fail without certificates"),
        }
    }
}
