//! OKX adapters (global market index + Web3 explorer)

use crate::models::{format_change, format_usd_opt, TokenResult};
use crate::providers::{fetch_json, number_or_string, Provider};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

/// Spot index ticker by symbol (`/api/v5/market/index-tickers`). Keyless.
pub struct OkxIndexTicker {
    client: Client,
    timeout: Duration,
}

impl OkxIndexTicker {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Provider<TokenResult> for OkxIndexTicker {
    fn name(&self) -> &'static str {
        "okx-index"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<TokenResult>> {
        let symbol = query.trim().to_uppercase();
        let url = format!(
            "https://www.okx.com/api/v5/market/index-tickers?instId={}-USD",
            symbol
        );

        let Some(body) = fetch_json(self.name(), self.client.get(&url).timeout(self.timeout)).await
        else {
            return Ok(None);
        };

        let Some(ticker) = body["data"].get(0) else {
            return Ok(None);
        };
        let Some(last) = number_or_string(&ticker["last"]) else {
            return Ok(None);
        };

        Ok(Some(TokenResult {
            source: "okx",
            name: symbol.clone(),
            symbol: symbol.clone(),
            price: format_usd_opt(Some(last)),
            change: format_change(number_or_string(&ticker["change24h"])),
            chart_points: vec![],
            description: Some("OKX global market data feed.".to_string()),
            platform: None,
            slug: Some(symbol.to_lowercase()),
        }))
    }
}

/// Token metadata by contract address via the OKX Web3 explorer
/// (`/api/v5/explorer/token`). Requires an API key.
pub struct OkxExplorer {
    client: Client,
    api_key: Option<String>,
    timeout: Duration,
}

impl OkxExplorer {
    pub fn new(client: Client, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl Provider<TokenResult> for OkxExplorer {
    fn name(&self) -> &'static str {
        "okx-explorer"
    }

    async fn fetch(&self, query: &str, chain_hint: Option<&str>) -> Result<Option<TokenResult>> {
        let Some(key) = &self.api_key else {
            return Ok(None);
        };
        let address = query.trim();

        let mut url = format!(
            "https://www.okx.com/api/v5/explorer/token?address={}",
            address
        );
        if let Some(chain) = chain_hint {
            url.push_str(&format!("&chain={}", chain));
        }

        let request = self
            .client
            .get(&url)
            .header("OK-ACCESS-KEY", key)
            .timeout(self.timeout);

        let Some(body) = fetch_json(self.name(), request).await else {
            return Ok(None);
        };

        let Some(token) = body["data"].get(0) else {
            return Ok(None);
        };

        let chart_points = token["sparkline"]
            .as_array()
            .map(|points| points.iter().filter_map(|p| p.as_f64()).collect())
            .unwrap_or_default();

        Ok(Some(TokenResult {
            source: "okx",
            name: token["name"].as_str().unwrap_or("Unknown Token").to_string(),
            symbol: token["symbol"].as_str().unwrap_or("").to_string(),
            price: format_usd_opt(number_or_string(&token["priceUsd"])),
            change: format_change(number_or_string(&token["change24h"])),
            chart_points,
            description: Some(format!(
                "Token resolved via OKX Web3 API ({}).",
                chain_hint.unwrap_or("multi-chain")
            )),
            platform: Some(chain_hint.unwrap_or("unknown").to_string()),
            slug: None,
        }))
    }
}
