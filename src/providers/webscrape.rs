//! Generic web-search scrape fallback
//!
//! Last link in the knowledge chain: fetches DuckDuckGo's HTML results
//! through the allorigins proxy, strips the markup and keeps the first few
//! sentences as a best-effort snippet.

use crate::models::Snippet;
use crate::providers::{fetch_json, Provider};
use crate::Result;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

lazy_static! {
    static ref TAGS: Regex = Regex::new(r"<[^>]+>").unwrap();
}

pub struct WebSearchScrape {
    client: Client,
    timeout: Duration,
}

impl WebSearchScrape {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Provider<Snippet> for WebSearchScrape {
    fn name(&self) -> &'static str {
        "web-search"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<Snippet>> {
        let target = format!("https://duckduckgo.com/html/?q={}", query);
        let request = self
            .client
            .get("https://api.allorigins.win/get")
            .query(&[("url", target.as_str())])
            .timeout(self.timeout);

        let Some(body) = fetch_json(self.name(), request).await else {
            return Ok(None);
        };

        let Some(html) = body["contents"].as_str().filter(|c| !c.is_empty()) else {
            return Ok(None);
        };

        let summary = snippet_from_html(html);
        if summary.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(Snippet {
            source: "web-search",
            title: "Web Search Result".to_string(),
            summary,
            url: Some(format!("https://duckduckgo.com/?q={}", query)),
        }))
    }
}

/// Strip tags and keep the first three sentences of the page text.
fn snippet_from_html(html: &str) -> String {
    let text = TAGS.replace_all(html, "");
    text.split('.')
        .take(3)
        .collect::<Vec<&str>>()
        .join(". ")
}
