use agent714::{agent::Agent, api::start_server, config::AgentConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AgentConfig::from_env();

    if config.covalent_api_key.is_none() {
        info!("COVALENT_API_KEY not set, Covalent lookups disabled");
    }
    if config.okx_api_key.is_none() {
        info!("OKX_API_KEY not set, OKX explorer lookups disabled");
    }

    info!("🚀 Agent 714 - API Server");
    info!("📍 Port: {}", config.port);

    let agent = Arc::new(Agent::from_config(&config)?);

    info!("✅ Agent initialized");
    info!("📡 Starting API server...");

    start_server(agent, config.port).await?;

    Ok(())
}
