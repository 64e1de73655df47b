//! Request router
//!
//! Dispatches a classified message to the right fallback chain and renders
//! the reply templates. The literal address-shape check runs BEFORE the
//! classifier's tag is consulted, so a pasted contract address always goes
//! to address lookup no matter how it classifies.

use crate::agent::{Agent, GeneralMode};
use crate::intent::{classify, looks_like_address, Intent};
use crate::models::{Snippet, TokenResult};
use crate::rewrite::rewrite;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Canned reply for messages nothing else could answer.
pub const HELP_MENU: &str = "I'm **Agent 714**, your intelligent assistant 🌍
I couldn't locate an exact answer, but you can ask me about:
- 💰 Crypto prices or contract addresses
- 🧠 Blockchain networks & projects
- 🏦 Finance, business, and world data
- 📚 Educational or sports facts
- ✍️ Rephrasing or language help
- 🙏 Bible & religion topics
- 🌐 General web information";

/// Outbound payload consumed by the chat front end. `slug` and
/// `contract_address` drive the chart-embed collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentReply {
    pub reply: String,
    #[serde(rename = "chartPoints", skip_serializing_if = "Option::is_none")]
    pub chart_points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "contractAddress", skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

impl AgentReply {
    fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::default()
        }
    }
}

/// Handle one user message end to end: classify, resolve, format.
pub async fn handle_message(
    agent: &Agent,
    message: &str,
    chain_hint: Option<&str>,
) -> crate::Result<AgentReply> {
    let cleaned = message.trim();
    let intent = classify(cleaned);
    info!("message intent: {:?}", intent);

    // 1. Literal contract address, regardless of intent tag
    if looks_like_address(cleaned) {
        return Ok(match agent.resolve_address(cleaned, chain_hint).await {
            Ok(token) => {
                let slug = token.slug_or_fallback();
                AgentReply {
                    reply: format_address_reply(&token),
                    chart_points: Some(token.chart_points),
                    slug: Some(slug),
                    contract_address: Some(cleaned.to_string()),
                }
            }
            Err(message) => AgentReply::text(message),
        });
    }

    let reply = match intent {
        // 2. Crypto by name/symbol
        Intent::Crypto => match agent.resolve_symbol(cleaned).await {
            Ok(token) => {
                let slug = token.slug_or_fallback();
                AgentReply {
                    reply: format_symbol_reply(&token),
                    chart_points: Some(token.chart_points),
                    slug: Some(slug),
                    contract_address: None,
                }
            }
            Err(message) => AgentReply::text(message),
        },

        // 3. Knowledge / educational
        Intent::Knowledge => match agent.resolve_knowledge(cleaned).await {
            Ok(snippet) => AgentReply::text(format_snippet(&snippet)),
            Err(message) => AgentReply::text(message),
        },

        // 4. Local rewrite, no network
        Intent::Rewrite | Intent::TextRewrite => {
            AgentReply::text(format!("Here's a clearer version 👇\n\n{}", rewrite(cleaned)))
        }

        // 5. Religion / scripture
        Intent::Religion | Intent::ReligionSearch => {
            match agent.resolve_general(cleaned, GeneralMode::Religion).await {
                Ok(snippet) => AgentReply::text(format_snippet(&snippet)),
                Err(message) => AgentReply::text(message),
            }
        }

        // 6. General web (an "address" tag without a literal address lands
        //    here too: there is nothing to look up on chain)
        Intent::Web | Intent::Address => {
            match agent.resolve_general(cleaned, GeneralMode::Web).await {
                Ok(snippet) => AgentReply::text(format_snippet(&snippet)),
                Err(message) => AgentReply::text(message),
            }
        }

        // 7. Unknown: try the web, fall back to the help menu
        Intent::Unknown => match agent.resolve_general(cleaned, GeneralMode::Web).await {
            Ok(snippet) => AgentReply::text(format_snippet(&snippet)),
            Err(_) => AgentReply::text(HELP_MENU),
        },
    };

    Ok(reply)
}

fn format_address_reply(token: &TokenResult) -> String {
    format!(
        "**{} ({})**\n🌐 Platform: {}\n💰 Price: {}\n📊 24h Change: {}%\n📈 Chart points: {}\n📖 {}",
        token.name,
        token.symbol,
        token.platform.as_deref().unwrap_or("Unknown"),
        token.price,
        token.change,
        token.chart_points.len(),
        token
            .description
            .as_deref()
            .unwrap_or("No description available"),
    )
}

fn format_symbol_reply(token: &TokenResult) -> String {
    format!(
        "**{} ({})**\n💰 Price: {}\n📊 24h Change: {}%\n📈 {} points chart data ready\n📖 {}",
        token.name,
        token.symbol,
        token.price,
        token.change,
        token.chart_points.len(),
        token
            .description
            .as_deref()
            .unwrap_or("No summary available."),
    )
}

fn format_snippet(snippet: &Snippet) -> String {
    let mut reply = format!("**{}**\n{}", snippet.title, snippet.summary);
    if snippet.source == "wikipedia" {
        reply.push_str("\n\n(Source: Wikipedia)");
    } else if let Some(url) = &snippet.url {
        reply.push_str(&format!("\n\n{}", url));
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Provider, ProviderChain};
    use crate::Result;
    use std::sync::Arc;

    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    struct FixedToken(TokenResult);

    #[async_trait::async_trait]
    impl Provider<TokenResult> for FixedToken {
        fn name(&self) -> &'static str {
            "fixed-token"
        }

        async fn fetch(&self, _query: &str, _hint: Option<&str>) -> Result<Option<TokenResult>> {
            Ok(Some(self.0.clone()))
        }
    }

    struct FixedSnippet(Snippet);

    #[async_trait::async_trait]
    impl Provider<Snippet> for FixedSnippet {
        fn name(&self) -> &'static str {
            "fixed-snippet"
        }

        async fn fetch(&self, _query: &str, _hint: Option<&str>) -> Result<Option<Snippet>> {
            Ok(Some(self.0.clone()))
        }
    }

    fn dai_token() -> TokenResult {
        TokenResult {
            source: "coingecko",
            name: "Dai".into(),
            symbol: "DAI".into(),
            price: "$1.00".into(),
            change: "0.01".into(),
            chart_points: vec![1.0, 1.0, 0.99],
            description: Some("Dai is a stablecoin".into()),
            platform: Some("ethereum".into()),
            slug: Some("dai".into()),
        }
    }

    fn empty_agent() -> Agent {
        Agent::with_chains(vec![], vec![], vec![], vec![])
    }

    #[tokio::test]
    async fn test_address_shape_overrides_classifier() {
        let address_chain: ProviderChain<TokenResult> = vec![Arc::new(FixedToken(dai_token()))];
        let agent = Agent::with_chains(address_chain, vec![], vec![], vec![]);

        let reply = handle_message(&agent, DAI, None).await.unwrap();
        assert!(reply.reply.contains("**Dai (DAI)**"));
        assert!(reply.reply.contains("💰 Price: $1.00"));
        assert_eq!(reply.contract_address.as_deref(), Some(DAI));
        assert_eq!(reply.slug.as_deref(), Some("dai"));
        assert_eq!(reply.chart_points.as_deref(), Some(&[1.0, 1.0, 0.99][..]));
    }

    #[tokio::test]
    async fn test_address_exhaustion_is_plain_reply() {
        let reply = handle_message(&empty_agent(), DAI, None).await.unwrap();
        assert_eq!(reply.reply, format!("No token found for {}.", DAI));
        assert!(reply.contract_address.is_none());
    }

    #[tokio::test]
    async fn test_symbol_reply_template() {
        let symbol_chain: ProviderChain<TokenResult> = vec![Arc::new(FixedToken(dai_token()))];
        let agent = Agent::with_chains(vec![], symbol_chain, vec![], vec![]);

        let reply = handle_message(&agent, "dai price", None).await.unwrap();
        assert!(reply.reply.contains("3 points chart data ready"));
        assert_eq!(reply.slug.as_deref(), Some("dai"));
        assert!(reply.contract_address.is_none());
    }

    #[tokio::test]
    async fn test_rewrite_is_local() {
        let reply = handle_message(&empty_agent(), "rephrase this is a test sentence", None).await.unwrap();
        assert!(reply.reply.starts_with("Here's a clearer version 👇"));
        assert!(reply.reply.contains("is a test sentence this"));
    }

    #[tokio::test]
    async fn test_unknown_falls_back_to_help_menu() {
        let reply = handle_message(&empty_agent(), "zzz qqq", None).await.unwrap();
        assert_eq!(reply.reply, HELP_MENU);
    }

    #[tokio::test]
    async fn test_knowledge_uses_snippet_format() {
        let knowledge: ProviderChain<Snippet> = vec![Arc::new(FixedSnippet(Snippet {
            source: "wikipedia",
            title: "Red Cross".into(),
            summary: "A humanitarian movement.".into(),
            url: Some("https://en.wikipedia.org/wiki/Red_Cross".into()),
        }))];
        let agent = Agent::with_chains(vec![], vec![], knowledge, vec![]);

        let reply = handle_message(&agent, "who founded the red cross", None).await.unwrap();
        assert!(reply.reply.starts_with("**Red Cross**"));
        assert!(reply.reply.ends_with("(Source: Wikipedia)"));
    }

    #[tokio::test]
    async fn test_web_exhaustion_keeps_not_found_text() {
        let reply = handle_message(&empty_agent(), "latest news", None).await.unwrap();
        assert!(reply.reply.contains("I searched the web but couldn't find clear info"));
    }
}
