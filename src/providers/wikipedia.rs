//! Wikipedia page-summary adapter (encyclopedia summary API)

use crate::models::Snippet;
use crate::providers::{fetch_json, Provider};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

pub struct WikipediaSummary {
    client: Client,
    timeout: Duration,
}

impl WikipediaSummary {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Provider<Snippet> for WikipediaSummary {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<Snippet>> {
        let url = format!(
            "https://en.wikipedia.org/api/rest_v1/page/summary/{}",
            urlencode(query)
        );

        let Some(body) = fetch_json(self.name(), self.client.get(&url).timeout(self.timeout)).await
        else {
            return Ok(None);
        };

        let Some(extract) = body["extract"].as_str().filter(|e| !e.is_empty()) else {
            return Ok(None);
        };

        Ok(Some(Snippet {
            source: "wikipedia",
            title: body["title"].as_str().unwrap_or(query).to_string(),
            summary: extract.to_string(),
            url: body["content_urls"]["desktop"]["page"]
                .as_str()
                .map(str::to_string),
        }))
    }
}

/// Percent-encode a query for use as a path segment.
fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_path_segment() {
        assert_eq!(urlencode("rust"), "rust");
        assert_eq!(urlencode("hello world"), "hello%20world");
        assert_eq!(urlencode("a/b?c"), "a%2Fb%3Fc");
    }
}
