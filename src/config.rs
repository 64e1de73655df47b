//! Service configuration
//!
//! All environment access happens here, once, at startup. Provider adapters
//! receive an `AgentConfig` (or the keys it carries) at construction time and
//! never read the environment themselves.

use std::env;
use std::time::Duration;

/// Per-request timeout applied to every outbound provider call.
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 7;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Covalent API key. Address and ticker lookups via Covalent are skipped
    /// when unset.
    pub covalent_api_key: Option<String>,
    /// OKX Web3 API key. The OKX explorer adapter is skipped when unset.
    pub okx_api_key: Option<String>,
    /// Bound on each outbound provider call.
    pub provider_timeout: Duration,
    /// Port the HTTP API listens on.
    pub port: u16,
}

impl AgentConfig {
    /// Load configuration from the process environment.
    ///
    /// Missing API keys are not an error; the affected adapters simply
    /// short-circuit to the next link in their fallback chain.
    pub fn from_env() -> Self {
        let covalent_api_key = non_empty_var("COVALENT_API_KEY");
        let okx_api_key = non_empty_var("OKX_API_KEY");

        let provider_timeout = env::var("PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS));

        let port = env::var("PORT")
            .or_else(|_| env::var("API_PORT"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            covalent_api_key,
            okx_api_key,
            provider_timeout,
            port,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            covalent_api_key: None,
            okx_api_key: None,
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            port: DEFAULT_PORT,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert!(config.covalent_api_key.is_none());
        assert!(config.okx_api_key.is_none());
        assert_eq!(config.provider_timeout, Duration::from_secs(7));
        assert_eq!(config.port, 8080);
    }
}
