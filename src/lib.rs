//! Agent 714
//!
//! A chat-style agent service that:
//! - Classifies free-text messages into a fixed set of intents
//! - Resolves them against ordered chains of external data providers
//! - Degrades every failure to natural-language text, never an exception
//!
//! PIPELINE:
//! MESSAGE → CLASSIFY → ROUTE → FALLBACK CHAIN → FORMAT REPLY

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod intent;
pub mod models;
pub mod providers;
pub mod rewrite;
pub mod router;

pub use error::Result;

// Re-export common types
pub use agent::{Agent, GeneralMode};
pub use config::AgentConfig;
pub use intent::{classify, looks_like_address, Intent};
pub use models::{Snippet, TokenResult};
pub use router::AgentReply;
