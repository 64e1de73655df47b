//! DexScreener adapter (decentralized-exchange aggregator, DEX-only tokens)

use crate::models::{format_change, format_usd_opt, TokenResult};
use crate::providers::{fetch_json, number_or_string, Provider};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

pub struct DexScreenerSearch {
    client: Client,
    timeout: Duration,
}

impl DexScreenerSearch {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Provider<TokenResult> for DexScreenerSearch {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<TokenResult>> {
        let symbol = query.trim().to_uppercase();
        let url = format!(
            "https://api.dexscreener.com/latest/dex/search/?q={}",
            symbol
        );

        let Some(body) = fetch_json(self.name(), self.client.get(&url).timeout(self.timeout)).await
        else {
            return Ok(None);
        };

        let Some(pair) = body["pairs"].get(0) else {
            return Ok(None);
        };
        let Some(name) = pair["baseToken"]["name"].as_str() else {
            return Ok(None);
        };

        // Transaction counts stand in for a price series on DEX-only tokens.
        let chart_points = pair["txns"]
            .as_object()
            .map(|txns| {
                let counts: Vec<f64> = txns
                    .values()
                    .map(|txn| {
                        txn["buys"]
                            .as_f64()
                            .or_else(|| txn["sells"].as_f64())
                            .unwrap_or(0.0)
                    })
                    .collect();
                // keep the last 10 windows, in order
                counts[counts.len().saturating_sub(10)..].to_vec()
            })
            .unwrap_or_default();

        let chain_id = pair["chainId"].as_str().unwrap_or("unknown chain");

        Ok(Some(TokenResult {
            source: "dexscreener",
            name: name.to_string(),
            symbol: pair["baseToken"]["symbol"].as_str().unwrap_or("").to_string(),
            price: format_usd_opt(number_or_string(&pair["priceUsd"])),
            change: format_change(pair["priceChange"]["h24"].as_f64()),
            chart_points,
            description: Some(format!("DEX Token on {}", chain_id)),
            platform: Some(chain_id.to_string()),
            slug: Some(
                pair["pairAddress"]
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| symbol.to_lowercase()),
            ),
        }))
    }
}
