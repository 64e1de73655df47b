//! Provider adapters and the fallback combinator
//!
//! Each external API gets one adapter implementing [`Provider`]. Adapters
//! normalize the provider's response shape and never let provider-level
//! failures (timeout, non-2xx, malformed payload) escape: those are logged
//! and collapsed to `Ok(None)` so the chain can move on.
//!
//! [`resolve_chain`] is the single "first success wins" combinator consumed
//! by every domain; priority order lives in the chain construction, not here.

pub mod coingecko;
pub mod covalent;
pub mod dexscreener;
pub mod duckduckgo;
pub mod okx;
pub mod openmeteo;
pub mod webscrape;
pub mod wikipedia;

use crate::Result;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A single external-API client normalizing one provider's response shape.
///
/// `chain_hint` is an optional caller-supplied platform name ("ethereum",
/// "solana", ...); multi-chain adapters try it first.
#[async_trait::async_trait]
pub trait Provider<T>: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, query: &str, chain_hint: Option<&str>) -> Result<Option<T>>;
}

/// Ordered fallback chain of adapters for one query domain.
pub type ProviderChain<T> = Vec<Arc<dyn Provider<T>>>;

/// Try adapters strictly in priority order and return the first success.
///
/// A failed or empty adapter is skipped, never retried. When the whole chain
/// is exhausted the domain's human-readable `exhausted` message is returned
/// as the `Err` value; this function never panics and never surfaces a
/// provider error.
pub async fn resolve_chain<T>(
    domain: &str,
    chain: &[Arc<dyn Provider<T>>],
    query: &str,
    chain_hint: Option<&str>,
    exhausted: String,
) -> std::result::Result<T, String> {
    for provider in chain {
        match provider.fetch(query, chain_hint).await {
            Ok(Some(result)) => {
                info!("{} resolved by {}", domain, provider.name());
                return Ok(result);
            }
            Ok(None) => {
                info!("{}: {} had no result, trying next", domain, provider.name());
            }
            Err(e) => {
                warn!("{}: {} failed: {}", domain, provider.name(), e);
            }
        }
    }

    info!("{}: all providers exhausted for {:?}", domain, query);
    Err(exhausted)
}

/// Build the shared pooled HTTP client. Per-request timeouts are applied by
/// the adapters; the client-level timeout is a hard outer bound.
pub fn build_http_client() -> Result<Client> {
    let client = Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(8)
        .timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Issue a GET and parse the JSON body. All failures are logged at `warn!`
/// and collapsed to `None` so the caller's chain can continue.
pub(crate) async fn fetch_json(name: &'static str, request: reqwest::RequestBuilder) -> Option<Value> {
    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("{} request failed: {}", name, e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!("{} returned {}", name, status);
        return None;
    }

    match response.json::<Value>().await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("{} returned invalid JSON: {}", name, e);
            None
        }
    }
}

/// Like [`fetch_json`] but for text bodies (HTML scrape fallback).
pub(crate) async fn fetch_text(name: &'static str, request: reqwest::RequestBuilder) -> Option<String> {
    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("{} request failed: {}", name, e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!("{} returned {}", name, status);
        return None;
    }

    match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("{} body read failed: {}", name, e);
            None
        }
    }
}

/// Pull an f64 out of a JSON field that providers serve either as a number
/// or a numeric string.
pub(crate) fn number_or_string(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        name: &'static str,
        result: Result<Option<u32>>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn ok(name: &'static str, value: u32) -> Self {
            Self {
                name,
                result: Ok(Some(value)),
                calls: AtomicUsize::new(0),
            }
        }

        fn empty(name: &'static str) -> Self {
            Self {
                name,
                result: Ok(None),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                result: Err(crate::error::AgentError::ProviderError("boom".into())),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Provider<u32> for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _query: &str, _hint: Option<&str>) -> Result<Option<u32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(v) => Ok(*v),
                Err(_) => Err(crate::error::AgentError::ProviderError("boom".into())),
            }
        }
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let first = Arc::new(FakeProvider::empty("first"));
        let second = Arc::new(FakeProvider::failing("second"));
        let third = Arc::new(FakeProvider::ok("third", 42));
        let fourth = Arc::new(FakeProvider::ok("fourth", 99));

        let chain: ProviderChain<u32> = vec![
            first.clone(),
            second.clone(),
            third.clone(),
            fourth.clone(),
        ];

        let result = resolve_chain("test", &chain, "q", None, "gone".into()).await;
        assert_eq!(result, Ok(42));
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
        assert_eq!(third.call_count(), 1);
        // adapters after the first success are never invoked
        assert_eq!(fourth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_domain_message() {
        let chain: ProviderChain<u32> = vec![
            Arc::new(FakeProvider::empty("a")),
            Arc::new(FakeProvider::failing("b")),
        ];

        let result = resolve_chain("test", &chain, "q", None, "nothing found".into()).await;
        assert_eq!(result, Err("nothing found".to_string()));
    }

    #[tokio::test]
    async fn test_empty_chain_is_exhausted() {
        let chain: ProviderChain<u32> = vec![];
        let result = resolve_chain("test", &chain, "q", None, "gone".into()).await;
        assert_eq!(result, Err("gone".to_string()));
    }

    #[test]
    fn test_number_or_string() {
        assert_eq!(number_or_string(&serde_json::json!(1.5)), Some(1.5));
        assert_eq!(number_or_string(&serde_json::json!("2.25")), Some(2.25));
        assert_eq!(number_or_string(&serde_json::json!(null)), None);
        assert_eq!(number_or_string(&serde_json::json!("abc")), None);
    }
}
