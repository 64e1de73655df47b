//! DuckDuckGo instant-answer adapter (free, keyless)

use crate::models::Snippet;
use crate::providers::{fetch_json, Provider};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

pub struct DuckDuckGoInstant {
    client: Client,
    timeout: Duration,
    /// When set, the first related topic is accepted as a last-ditch answer.
    /// Enabled for the general/religion chain instance only.
    use_related_topics: bool,
}

impl DuckDuckGoInstant {
    pub fn new(client: Client, timeout: Duration, use_related_topics: bool) -> Self {
        Self {
            client,
            timeout,
            use_related_topics,
        }
    }
}

#[async_trait::async_trait]
impl Provider<Snippet> for DuckDuckGoInstant {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<Snippet>> {
        let request = self
            .client
            .get("https://api.duckduckgo.com/")
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .timeout(self.timeout);

        let Some(body) = fetch_json(self.name(), request).await else {
            return Ok(None);
        };

        let abstract_text = body["AbstractText"].as_str().filter(|t| !t.is_empty());
        let answer = body["Answer"].as_str().filter(|t| !t.is_empty());

        if let Some(summary) = abstract_text.or(answer) {
            return Ok(Some(Snippet {
                source: "duckduckgo",
                title: body["Heading"]
                    .as_str()
                    .filter(|h| !h.is_empty())
                    .unwrap_or("General Knowledge")
                    .to_string(),
                summary: summary.to_string(),
                url: body["AbstractURL"]
                    .as_str()
                    .filter(|u| !u.is_empty())
                    .map(str::to_string),
            }));
        }

        if self.use_related_topics {
            if let Some(text) = body["RelatedTopics"][0]["Text"].as_str().filter(|t| !t.is_empty()) {
                let title = text.split('–').next().unwrap_or(text).trim().to_string();
                return Ok(Some(Snippet {
                    source: "duckduckgo",
                    title,
                    summary: text.to_string(),
                    url: body["RelatedTopics"][0]["FirstURL"]
                        .as_str()
                        .map(str::to_string),
                }));
            }
        }

        Ok(None)
    }
}
