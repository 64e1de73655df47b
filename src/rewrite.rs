//! Deterministic text rewrite
//!
//! Placeholder paraphraser: rotates the first word to the end and appends a
//! fixed clarity suffix. No network calls, no randomness.

use lazy_static::lazy_static;
use regex::Regex;

pub const TOO_SHORT_REPLY: &str = "Please provide a longer sentence to rephrase.";

const CLARITY_SUFFIX: &str = ". (Rephrased for clarity and flow by Agent 714)";

lazy_static! {
    static ref LEADING_KEYWORD: Regex = Regex::new(r"(?i)^(rephrase|rewrite)\s+").unwrap();
}

/// Rewrite `text` by rotating its word sequence. Inputs with fewer than 4
/// words (after stripping a leading "rephrase"/"rewrite" keyword) get the
/// fixed prompt for a longer sentence instead.
pub fn rewrite(text: &str) -> String {
    let stripped = LEADING_KEYWORD.replace(text.trim(), "");
    let mut words: Vec<&str> = stripped.split_whitespace().collect();

    if words.len() < 4 {
        return TOO_SHORT_REPLY.to_string();
    }

    words.rotate_left(1);
    format!("{}{}", words.join(" "), CLARITY_SUFFIX)
}
