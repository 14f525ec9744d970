use std::time::Duration;

use log::{debug, warn};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::AdapterError;
use crate::schema::{PriceQuote, RemoteResult};
use crate::util;

use super::adapter::RemoteAdapter;

/// External price feed adapter
///
/// Expects a CoinGecko "simple price" document:
///
///     { "chia": { "usd": 31.5, "usd_24h_vol": 1234567.8 } }
///
/// NOTES:
/// - Third-party service, format may change without notice;
///   every assumption about it lives in `parse_price_quote`
/// - Rate limiting (429) is reported as a skip, not a transport
///   failure
///
pub struct PriceFeedAdapter {
    url: String,
    timeout: Duration,
}

impl PriceFeedAdapter {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }
}

#[async_trait::async_trait]
impl RemoteAdapter for PriceFeedAdapter {
    fn name(&self) -> &'static str {
        "price_feed"
    }

    async fn fetch(&self) -> Result<Option<RemoteResult>, AdapterError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        debug!("GET {}", self.url);
        let response = client.get(&self.url).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(AdapterError::Skipped("price feed rate limited".into()));
        }

        let body: Value = response.error_for_status()?.json().await?;

        Ok(parse_price_quote(&body)?.map(RemoteResult::PriceQuote))
    }
}

/// `None` when the feed answered with an object holding no entry
/// for chia (unknown id, or an error document such as
/// `{"status":{"error_code":..}}`). Any other body shape is
/// malformed.
pub fn parse_price_quote(v: &Value) -> Result<Option<PriceQuote>, AdapterError> {
    let Some(doc) = v.as_object() else {
        return Err(AdapterError::malformed("expected a JSON object"));
    };

    if !doc.contains_key("chia") {
        warn!("Price feed returned no chia entry: {v}");
        return Ok(None);
    }

    Ok(Some(PriceQuote {
        usd_price: util::number_at(v, "/chia/usd")?,
        usd_volume_24h: util::number_at(v, "/chia/usd_24h_vol")?,
    }))
}
