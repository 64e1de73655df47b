//! CoinGecko adapters (market-data aggregator)

use crate::models::{format_change, format_usd_opt, TokenResult};
use crate::providers::{fetch_json, Provider};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

/// Platforms CoinGecko can resolve a token contract on, in probe order.
const SUPPORTED_PLATFORMS: &[&str] = &[
    "ethereum",
    "polygon-pos",
    "binance-smart-chain",
    "avalanche",
    "optimism",
    "arbitrum-one",
    "fantom",
    "celo",
    "base",
    "zksync",
    "linea",
    "scroll",
    "blast",
    "worldchain",
    "unichain",
    "tron",
    "solana",
];

/// Market listing by coin id (`/coins/markets`).
pub struct CoinGeckoMarkets {
    client: Client,
    timeout: Duration,
}

impl CoinGeckoMarkets {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Provider<TokenResult> for CoinGeckoMarkets {
    fn name(&self) -> &'static str {
        "coingecko-markets"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<TokenResult>> {
        let id = query.trim().to_lowercase();
        let url = format!(
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&ids={}",
            id
        );

        let Some(body) = fetch_json(self.name(), self.client.get(&url).timeout(self.timeout)).await
        else {
            return Ok(None);
        };

        let Some(coin) = body.get(0) else {
            return Ok(None);
        };
        let Some(name) = coin["name"].as_str() else {
            return Ok(None);
        };

        Ok(Some(TokenResult {
            source: "coingecko",
            name: name.to_string(),
            symbol: coin["symbol"].as_str().unwrap_or("").to_uppercase(),
            price: format_usd_opt(coin["current_price"].as_f64()),
            change: format_change(coin["price_change_percentage_24h"].as_f64()),
            chart_points: vec![],
            description: None,
            platform: None,
            slug: coin["id"].as_str().map(str::to_string),
        }))
    }
}

/// Token lookup by contract address, probed across all supported platforms
/// (`/coins/{platform}/contract/{address}`), with the 7-day sparkline as
/// chart points.
pub struct CoinGeckoContract {
    client: Client,
    timeout: Duration,
}

impl CoinGeckoContract {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Provider<TokenResult> for CoinGeckoContract {
    fn name(&self) -> &'static str {
        "coingecko-contract"
    }

    async fn fetch(&self, query: &str, chain_hint: Option<&str>) -> Result<Option<TokenResult>> {
        let address = query.trim();

        for platform in ordered_platforms(chain_hint) {
            let url = format!(
                "https://api.coingecko.com/api/v3/coins/{}/contract/{}?localization=false&tickers=false&community_data=false&developer_data=false&sparkline=true",
                platform, address
            );

            let Some(body) =
                fetch_json(self.name(), self.client.get(&url).timeout(self.timeout)).await
            else {
                continue;
            };

            let (Some(id), market) = (body["id"].as_str(), &body["market_data"]) else {
                continue;
            };
            if market.is_null() {
                continue;
            }

            let name = body["name"].as_str().unwrap_or(id).to_string();
            let description = body["description"]["en"]
                .as_str()
                .filter(|d| !d.is_empty())
                .map(first_sentence)
                .unwrap_or_else(|| format!("No description for {}.", name));

            let chart_points = market["sparkline_7d"]["price"]
                .as_array()
                .map(|prices| prices.iter().filter_map(|p| p.as_f64()).collect())
                .unwrap_or_default();

            return Ok(Some(TokenResult {
                source: "coingecko",
                name,
                symbol: body["symbol"].as_str().unwrap_or("").to_uppercase(),
                price: format_usd_opt(market["current_price"]["usd"].as_f64()),
                change: format_change(market["price_change_percentage_24h"].as_f64()),
                chart_points,
                description: Some(description),
                platform: Some(platform.to_string()),
                slug: Some(id.to_string()),
            }));
        }

        Ok(None)
    }
}

/// Supported platform list with the caller's hint prepended (deduplicated).
fn ordered_platforms(chain_hint: Option<&str>) -> Vec<String> {
    let mut platforms: Vec<String> = Vec::with_capacity(SUPPORTED_PLATFORMS.len() + 1);
    if let Some(hint) = chain_hint {
        platforms.push(hint.to_lowercase());
    }
    for platform in SUPPORTED_PLATFORMS {
        if !platforms.iter().any(|p| p.as_str() == *platform) {
            platforms.push((*platform).to_string());
        }
    }
    platforms
}

/// First sentence of the first line of a provider description blob.
fn first_sentence(text: &str) -> String {
    text.lines()
        .next()
        .unwrap_or("")
        .split('.')
        .next()
        .unwrap_or("")
        .to_string()
}
