//! Agent resolution core
//!
//! Owns the four ordered fallback chains and the domain-specific exhaustion
//! messages. Chains are plain data (ordered adapter lists); all of them go
//! through the same [`resolve_chain`] combinator. Priority orders here are
//! contracts:
//!
//! - address: Covalent → CoinGecko contract → OKX explorer
//! - symbol:  Covalent ticker → CoinGecko markets → DexScreener → OKX index
//! - knowledge: DuckDuckGo → Wikipedia → Open-Meteo → web scrape
//! - general/religion: Wikipedia → DuckDuckGo
//!
//! Note the symbol and address paths deliberately rank the shared providers
//! differently; do not "unify" them.

use crate::config::AgentConfig;
use crate::models::{Snippet, TokenResult};
use crate::providers::coingecko::{CoinGeckoContract, CoinGeckoMarkets};
use crate::providers::covalent::{CovalentByAddress, CovalentTicker};
use crate::providers::dexscreener::DexScreenerSearch;
use crate::providers::duckduckgo::DuckDuckGoInstant;
use crate::providers::okx::{OkxExplorer, OkxIndexTicker};
use crate::providers::openmeteo::OpenMeteo;
use crate::providers::webscrape::WebSearchScrape;
use crate::providers::wikipedia::WikipediaSummary;
use crate::providers::{build_http_client, resolve_chain, ProviderChain};
use crate::Result;
use std::sync::Arc;

/// Search mode for the general chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralMode {
    Web,
    Religion,
}

pub struct Agent {
    token_by_address: ProviderChain<TokenResult>,
    token_by_symbol: ProviderChain<TokenResult>,
    knowledge: ProviderChain<Snippet>,
    general: ProviderChain<Snippet>,
}

impl Agent {
    /// Build the production chains from configuration. One pooled HTTP
    /// client is shared across every adapter.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let client = build_http_client()?;
        let timeout = config.provider_timeout;

        let token_by_address: ProviderChain<TokenResult> = vec![
            Arc::new(CovalentByAddress::new(
                client.clone(),
                config.covalent_api_key.clone(),
                timeout,
            )),
            Arc::new(CoinGeckoContract::new(client.clone(), timeout)),
            Arc::new(OkxExplorer::new(
                client.clone(),
                config.okx_api_key.clone(),
                timeout,
            )),
        ];

        let token_by_symbol: ProviderChain<TokenResult> = vec![
            Arc::new(CovalentTicker::new(
                client.clone(),
                config.covalent_api_key.clone(),
                timeout,
            )),
            Arc::new(CoinGeckoMarkets::new(client.clone(), timeout)),
            Arc::new(DexScreenerSearch::new(client.clone(), timeout)),
            Arc::new(OkxIndexTicker::new(client.clone(), timeout)),
        ];

        let knowledge: ProviderChain<Snippet> = vec![
            Arc::new(DuckDuckGoInstant::new(client.clone(), timeout, false)),
            Arc::new(WikipediaSummary::new(client.clone(), timeout)),
            Arc::new(OpenMeteo::new(client.clone(), timeout)),
            Arc::new(WebSearchScrape::new(client.clone(), timeout)),
        ];

        let general: ProviderChain<Snippet> = vec![
            Arc::new(WikipediaSummary::new(client.clone(), timeout)),
            Arc::new(DuckDuckGoInstant::new(client, timeout, true)),
        ];

        Ok(Self {
            token_by_address,
            token_by_symbol,
            knowledge,
            general,
        })
    }

    /// Build an agent from pre-constructed chains. Used by tests to inject
    /// mock providers.
    pub fn with_chains(
        token_by_address: ProviderChain<TokenResult>,
        token_by_symbol: ProviderChain<TokenResult>,
        knowledge: ProviderChain<Snippet>,
        general: ProviderChain<Snippet>,
    ) -> Self {
        Self {
            token_by_address,
            token_by_symbol,
            knowledge,
            general,
        }
    }

    /// Resolve a contract address to a token record.
    pub async fn resolve_address(
        &self,
        address: &str,
        chain_hint: Option<&str>,
    ) -> std::result::Result<TokenResult, String> {
        resolve_chain(
            "address",
            &self.token_by_address,
            address,
            chain_hint,
            format!("No token found for {}.", address),
        )
        .await
    }

    /// Resolve a name/symbol query to a token record.
    pub async fn resolve_symbol(&self, query: &str) -> std::result::Result<TokenResult, String> {
        resolve_chain(
            "symbol",
            &self.token_by_symbol,
            query,
            None,
            format!(
                "No live data found for {}. Please check the token name or address.",
                query.trim().to_uppercase()
            ),
        )
        .await
    }

    /// Resolve an educational/informational query.
    pub async fn resolve_knowledge(&self, query: &str) -> std::result::Result<Snippet, String> {
        resolve_chain(
            "knowledge",
            &self.knowledge,
            query,
            None,
            format!(
                "I couldn't find detailed info on \"{}\". Try rephrasing or adding more context.",
                query
            ),
        )
        .await
    }

    /// Resolve a general web or scripture query.
    pub async fn resolve_general(
        &self,
        query: &str,
        mode: GeneralMode,
    ) -> std::result::Result<Snippet, String> {
        let (search_query, exhausted) = match mode {
            GeneralMode::Religion => (
                format!("{} bible verse", query),
                "I couldn't find a specific passage, but try searching for key phrases like \
                 \"sin against God verse\"."
                    .to_string(),
            ),
            GeneralMode::Web => (
                query.to_string(),
                format!(
                    "I searched the web but couldn't find clear info about **{}**. \
                     Try rephrasing or being more specific.",
                    query
                ),
            ),
        };

        resolve_chain("general", &self.general, &search_query, None, exhausted).await
    }
}
