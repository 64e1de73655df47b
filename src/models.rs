//! Core data models for Agent 714

use serde::{Deserialize, Serialize};

//
// ================= Token lookups =================
//

/// Normalized token record produced by exactly one adapter per successful
/// call. Currency values arrive pre-formatted; chart points are whatever
/// time series the provider exposes, untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResult {
    /// Provider that produced this record ("covalent", "coingecko", ...).
    pub source: &'static str,
    pub name: String,
    pub symbol: String,
    /// USD-formatted price string, or "N/A" when the provider omits it.
    pub price: String,
    /// 24h percent change fixed to 2 decimals, or "N/A".
    pub change: String,
    pub chart_points: Vec<f64>,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub slug: Option<String>,
}

impl TokenResult {
    /// Chart/embed identifier: explicit slug, else lower-cased symbol,
    /// else lower-cased name.
    pub fn slug_or_fallback(&self) -> String {
        self.slug
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                if !self.symbol.is_empty() {
                    self.symbol.to_lowercase()
                } else {
                    self.name.to_lowercase()
                }
            })
    }
}

//
// ================= Knowledge lookups =================
//

/// Normalized knowledge record (encyclopedia summary, instant answer,
/// weather reading, scraped search snippet).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snippet {
    pub source: &'static str,
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
}

//
// ================= Formatting helpers =================
//

/// Format a raw USD value as a localized currency string ("$1,234.56").
pub fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-${}.{}", grouped, frac)
    } else {
        format!("${}.{}", grouped, frac)
    }
}

/// Format an optional USD value, "N/A" when the provider omits it.
pub fn format_usd_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format_usd(v),
        None => "N/A".to_string(),
    }
}

/// Format an optional percent change to 2 decimals, "N/A" when absent.
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(0.5), "$0.50");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(98765432.1), "$98,765,432.10");
        assert_eq!(format_usd(-12.345), "-$12.35");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(3.14159)), "3.14");
        assert_eq!(format_change(None), "N/A");
    }

    #[test]
    fn test_slug_fallback_order() {
        let mut result = TokenResult {
            source: "coingecko",
            name: "Ethereum".into(),
            symbol: "ETH".into(),
            price: "$2,000.00".into(),
            change: "1.00".into(),
            chart_points: vec![],
            description: None,
            platform: None,
            slug: Some("ethereum".into()),
        };
        assert_eq!(result.slug_or_fallback(), "ethereum");

        result.slug = None;
        assert_eq!(result.slug_or_fallback(), "eth");

        result.symbol.clear();
        assert_eq!(result.slug_or_fallback(), "ethereum");
    }
}
