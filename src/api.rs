//! REST API server for Agent 714
//!
//! One chat endpoint plus a health probe. All failure modes degrade to
//! natural-language replies: bad input gets a fixed 400 reply, unexpected
//! internal errors a fixed 500 reply. Provider failures never reach here.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::agent::Agent;
use crate::router::{handle_message, AgentReply};

pub const INVALID_MESSAGE_REPLY: &str = "Please enter a valid question or message.";
pub const INTERNAL_ERROR_REPLY: &str = "An error occurred while processing your request.";

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<Agent>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Agent Endpoint
/// =============================

async fn agent_handler(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<AgentReply>) {
    let Ok(Json(body)) = payload else {
        return invalid_message();
    };

    // Manual validation: a missing, non-string or empty message is user
    // error, not a deserialization failure.
    let Some(message) = body.get("message").and_then(Value::as_str) else {
        return invalid_message();
    };
    if message.trim().is_empty() {
        return invalid_message();
    }

    let chain_hint = body.get("chain").and_then(Value::as_str);

    info!("agent request: {:?}", message);

    match handle_message(&state.agent, message, chain_hint).await {
        Ok(reply) => (StatusCode::OK, Json(reply)),
        Err(e) => {
            error!("agent route error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AgentReply {
                    reply: INTERNAL_ERROR_REPLY.to_string(),
                    chart_points: None,
                    slug: None,
                    contract_address: None,
                }),
            )
        }
    }
}

fn invalid_message() -> (StatusCode, Json<AgentReply>) {
    (
        StatusCode::BAD_REQUEST,
        Json(AgentReply {
            reply: INVALID_MESSAGE_REPLY.to_string(),
            chart_points: None,
            slug: None,
            contract_address: None,
        }),
    )
}

/// =============================
/// Router
/// =============================

pub fn create_router(agent: Arc<Agent>) -> Router {
    let state = ApiState { agent };

    Router::new()
        .route("/health", get(health))
        .route("/api/agent", post(agent_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(agent: Arc<Agent>, port: u16) -> crate::Result<()> {
    let router = create_router(agent);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router)
        .await
        .map_err(crate::error::AgentError::IoError)?;

    Ok(())
}
