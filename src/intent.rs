//! Intent classification
//!
//! Maps raw user text onto a closed set of intents via an ordered rule list.
//! First match wins; the rule order is a behavioral contract (a message
//! containing both "bible" and "price" is religion, not crypto, because the
//! religion rule comes first). Changing the order changes routing.

use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Rewrite,
    TextRewrite,
    Religion,
    ReligionSearch,
    Crypto,
    Address,
    Knowledge,
    Web,
    Unknown,
}

lazy_static! {
    static ref REWRITE: Regex =
        Regex::new(r"rephrase|rewrite|paraphrase|improve|simplify|make clearer").unwrap();
    static ref REWRITE_TARGET: Regex = Regex::new(r"text|sentence|paragraph").unwrap();

    static ref RELIGION: Regex = Regex::new(
        r"bible|jesus|god|quran|koran|verse|prayer|scripture|psalm|genesis|matthew|corinthians|holy|faith|islam|christian|church|mosque"
    )
    .unwrap();
    static ref RELIGION_SEARCH: Regex = Regex::new(r"about|search|find").unwrap();

    static ref CRYPTO: Regex = Regex::new(
        r"price|token|coin|market|btc|eth|sol|bnb|matic|crypto|wallet|block|hash|transaction|chain|exchange"
    )
    .unwrap();
    static ref WALLET_WORDS: Regex = Regex::new(r"wallet|address").unwrap();

    static ref KNOWLEDGE: Regex = Regex::new(
        r"who|when|why|how|history|explain|describe|summarize|teach|learn|education|sport|game|finance|economy|stock|founder|year|origin|project|company"
    )
    .unwrap();

    static ref WEB: Regex = Regex::new(
        r"news|info|information|tell me|search|find|latest|current|today|lookup|query|web|internet"
    )
    .unwrap();

    static ref EVM_ADDRESS: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
    static ref BASE58_ADDRESS: Regex = Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").unwrap();
    static ref TRON_ADDRESS: Regex = Regex::new(r"^[T1][a-zA-Z0-9]{33}$").unwrap();
}

/// Classify user text into an [`Intent`]. Purely syntactic, ordered rules,
/// short-circuit on the first match.
pub fn classify(query: &str) -> Intent {
    let q = query.to_lowercase();
    let q = q.trim();

    // 1. Rephrase / rewrite
    if REWRITE.is_match(q) {
        return if REWRITE_TARGET.is_match(q) {
            Intent::TextRewrite
        } else {
            Intent::Rewrite
        };
    }

    // 2. Religion / scripture / faith topics
    if RELIGION.is_match(q) {
        return if RELIGION_SEARCH.is_match(q) {
            Intent::ReligionSearch
        } else {
            Intent::Religion
        };
    }

    // 3. Crypto (prices, tokens, wallets)
    if CRYPTO.is_match(q) {
        if EVM_ADDRESS.is_match(q) || WALLET_WORDS.is_match(q) {
            return Intent::Address;
        }
        return Intent::Crypto;
    }

    // 4. Knowledge / educational / informational
    if KNOWLEDGE.is_match(q) {
        return Intent::Knowledge;
    }

    // 5. General web lookups
    if WEB.is_match(q) {
        return Intent::Web;
    }

    // 6. Bare wallet address
    if EVM_ADDRESS.is_match(q) {
        return Intent::Address;
    }

    Intent::Unknown
}

/// Stricter address-shape test applied at the routing layer before the
/// classifier's tag is consulted. A literal contract address always routes
/// to address lookup regardless of how the classifier tagged it.
pub fn looks_like_address(query: &str) -> bool {
    let t = query.trim();
    if t.is_empty() {
        return false;
    }
    EVM_ADDRESS.is_match(t) // EVM
        || BASE58_ADDRESS.is_match(t) // Solana/Base58
        || TRON_ADDRESS.is_match(t) // Tron
}

/// EVM-shaped check used by adapters that only understand 0x addresses.
pub fn is_evm_address(query: &str) -> bool {
    EVM_ADDRESS.is_match(query.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVM: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    #[test]
    fn test_rewrite_rules() {
        assert_eq!(classify("rephrase this for me"), Intent::Rewrite);
        assert_eq!(classify("please simplify it"), Intent::Rewrite);
        assert_eq!(
            classify("rewrite this sentence to be shorter"),
            Intent::TextRewrite
        );
        assert_eq!(
            classify("improve my paragraph please"),
            Intent::TextRewrite
        );
    }

    #[test]
    fn test_religion_rules() {
        assert_eq!(classify("psalm 23"), Intent::Religion);
        assert_eq!(classify("find a bible verse about hope"), Intent::ReligionSearch);
    }

    #[test]
    fn test_crypto_rules() {
        assert_eq!(classify("btc price"), Intent::Crypto);
        assert_eq!(classify("what is in my wallet balance on this exchange"), Intent::Address);
    }

    #[test]
    fn test_knowledge_and_web_rules() {
        assert_eq!(classify("who founded the red cross"), Intent::Knowledge);
        assert_eq!(classify("latest news"), Intent::Web);
    }

    #[test]
    fn test_bare_address() {
        assert_eq!(classify(EVM), Intent::Address);
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(classify(""), Intent::Unknown);
        assert_eq!(classify("   "), Intent::Unknown);
        assert_eq!(classify("zzz qqq"), Intent::Unknown);
    }

    // Rule order is load-bearing: earlier rules shadow later ones.
    #[test]
    fn test_rule_order_is_contract() {
        // religion precedes crypto
        assert_eq!(classify("bible verse about the price of greed"), Intent::ReligionSearch);
        assert_eq!(classify("jesus and the coin"), Intent::Religion);
        // rewrite precedes everything
        assert_eq!(classify("rephrase this bible verse"), Intent::Rewrite);
        // crypto precedes knowledge
        assert_eq!(classify("explain the token economy"), Intent::Crypto);
    }

    #[test]
    fn test_address_shapes() {
        assert!(looks_like_address(EVM));
        // 39 and 41 hex chars must both fail
        assert!(!is_evm_address("0x6B175474E89094C44Da98b954EedeAC495271d0"));
        assert!(!is_evm_address("0x6B175474E89094C44Da98b954EedeAC495271d0F0"));
        // Solana (Base58, 32-44 chars)
        assert!(looks_like_address("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"));
        // Tron
        assert!(looks_like_address("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"));
        assert!(!looks_like_address("hello world"));
        assert!(!looks_like_address(""));
    }
}
