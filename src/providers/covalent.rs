//! Covalent adapters (primary on-chain indexer)
//!
//! Both adapters require a configured API key and return `Ok(None)` without
//! issuing a request when it is missing.

use crate::intent::is_evm_address;
use crate::models::{format_change, format_usd_opt, TokenResult};
use crate::providers::{fetch_json, Provider};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

/// Chain platforms Covalent can resolve a token contract on, in probe order.
const SUPPORTED_CHAINS: &[(&str, &str)] = &[
    ("ethereum", "eth-mainnet"),
    ("polygon-pos", "matic-mainnet"),
    ("binance-smart-chain", "bsc-mainnet"),
    ("avalanche", "avalanche-mainnet"),
    ("optimism", "optimism-mainnet"),
    ("arbitrum-one", "arbitrum-mainnet"),
    ("base", "base-mainnet"),
    ("fantom", "fantom-mainnet"),
    ("celo", "celo-mainnet"),
    ("zksync", "zksync-mainnet"),
    ("linea", "linea-mainnet"),
    ("scroll", "scroll-mainnet"),
    ("blast", "blast-mainnet"),
    ("worldchain", "worldchain-mainnet"),
    ("unichain", "unichain-sepolia"),
    ("solana", "solana-mainnet"),
    ("tron", "tron-mainnet"),
];

/// Spot price by ticker symbol (`/v1/pricing/tickers/`).
pub struct CovalentTicker {
    client: Client,
    api_key: Option<String>,
    timeout: Duration,
}

impl CovalentTicker {
    pub fn new(client: Client, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl Provider<TokenResult> for CovalentTicker {
    fn name(&self) -> &'static str {
        "covalent-ticker"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<TokenResult>> {
        let Some(key) = &self.api_key else {
            return Ok(None);
        };

        let symbol = query.trim().to_uppercase();
        let url = format!(
            "https://api.covalenthq.com/v1/pricing/tickers/?tickers={}&key={}",
            symbol, key
        );

        let Some(body) = fetch_json(self.name(), self.client.get(&url).timeout(self.timeout)).await
        else {
            return Ok(None);
        };

        let Some(item) = body["data"]["items"].get(0) else {
            return Ok(None);
        };

        Ok(Some(TokenResult {
            source: "covalent",
            name: item["contract_name"]
                .as_str()
                .unwrap_or(&symbol)
                .to_string(),
            symbol: item["contract_ticker_symbol"]
                .as_str()
                .unwrap_or(&symbol)
                .to_string(),
            price: format_usd_opt(item["quote_rate"].as_f64()),
            change: format_change(item["quote_rate_24h_change"].as_f64()),
            chart_points: vec![],
            description: None,
            platform: None,
            slug: None,
        }))
    }
}

/// Token metadata by contract address, probed across all supported chains
/// (`/v1/{chain}/tokens/{address}/token_holders/`). EVM addresses only.
pub struct CovalentByAddress {
    client: Client,
    api_key: Option<String>,
    timeout: Duration,
}

impl CovalentByAddress {
    pub fn new(client: Client, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl Provider<TokenResult> for CovalentByAddress {
    fn name(&self) -> &'static str {
        "covalent-address"
    }

    async fn fetch(&self, query: &str, chain_hint: Option<&str>) -> Result<Option<TokenResult>> {
        let Some(key) = &self.api_key else {
            return Ok(None);
        };
        let address = query.trim();
        if !is_evm_address(address) {
            return Ok(None);
        }

        for (platform, chain) in ordered_chains(chain_hint) {
            let url = format!(
                "https://api.covalenthq.com/v1/{}/tokens/{}/token_holders/?quote-currency=USD&page-size=1&key={}",
                chain, address, key
            );

            let Some(body) =
                fetch_json(self.name(), self.client.get(&url).timeout(self.timeout)).await
            else {
                continue;
            };

            let metadata = &body["data"]["items"][0]["contract_metadata"];
            if metadata.is_null() {
                continue;
            }

            return Ok(Some(TokenResult {
                source: "covalent",
                name: metadata["contract_name"]
                    .as_str()
                    .unwrap_or("Unknown Token")
                    .to_string(),
                symbol: metadata["contract_ticker_symbol"]
                    .as_str()
                    .unwrap_or("")
                    .to_string(),
                price: format_usd_opt(metadata["quote_rate"].as_f64()),
                change: "N/A".to_string(),
                chart_points: vec![],
                description: Some(format!("Token detected via Covalent ({}).", platform)),
                platform: Some(platform.to_string()),
                slug: None,
            }));
        }

        Ok(None)
    }
}

/// Supported chain table with the caller's hint moved to the front.
fn ordered_chains(chain_hint: Option<&str>) -> Vec<(&'static str, &'static str)> {
    let hint = chain_hint.map(|h| h.to_lowercase());
    let mut chains: Vec<(&'static str, &'static str)> = Vec::with_capacity(SUPPORTED_CHAINS.len());

    if let Some(hint) = &hint {
        if let Some(entry) = SUPPORTED_CHAINS.iter().find(|(p, _)| p == hint) {
            chains.push(*entry);
        }
    }
    for entry in SUPPORTED_CHAINS {
        if !chains.contains(entry) {
            chains.push(*entry);
        }
    }
    chains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_moves_chain_to_front() {
        let chains = ordered_chains(Some("base"));
        assert_eq!(chains[0], ("base", "base-mainnet"));
        assert_eq!(chains.len(), SUPPORTED_CHAINS.len());
    }

    #[test]
    fn test_unknown_hint_keeps_default_order() {
        let chains = ordered_chains(Some("nonsense"));
        assert_eq!(chains[0], ("ethereum", "eth-mainnet"));
        assert_eq!(chains.len(), SUPPORTED_CHAINS.len());
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let adapter = CovalentByAddress::new(
            Client::new(),
            None,
            Duration::from_secs(1),
        );
        let result = adapter
            .fetch("0x6B175474E89094C44Da98b954EedeAC495271d0F", None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_non_evm_address_short_circuits() {
        let adapter = CovalentByAddress::new(
            Client::new(),
            Some("key".into()),
            Duration::from_secs(1),
        );
        let result = adapter
            .fetch("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", None)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
