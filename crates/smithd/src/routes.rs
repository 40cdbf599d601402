//! API routes for smithd

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::server::AppStateArc;
use crate::{actions, intent};
use smith_common::intent::{Action, Command, IntentResult, ResolvedIntent};
use smith_common::status::{HealthResponse, ServiceInfo};

// ============================================================================
// Service Routes
// ============================================================================

pub fn service_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(root))
}

async fn root(State(state): State<AppStateArc>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Smith Assistant API is running".to_string(),
        status: "ready".to_string(),
        server_ip: state.server_ip.clone(),
        ollama_url: state.ollama.base_url().to_string(),
    })
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    let ollama = state.ollama.probe().await;
    let status = if ollama.is_connected() {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        ollama: ollama.as_str().to_string(),
        server_ip: state.server_ip.clone(),
        ollama_url: state.ollama.base_url().to_string(),
    })
}

// ============================================================================
// Query Routes
// ============================================================================

pub fn query_routes() -> Router<AppStateArc> {
    Router::new().route("/query", post(process_command))
}

/// Process a natural-language command into a five-field intent.
/// Empty text is the only client error; everything downstream degrades
/// into a well-formed response instead of failing.
async fn process_command(
    State(state): State<AppStateArc>,
    Json(command): Json<Command>,
) -> Result<Json<IntentResult>, (StatusCode, String)> {
    let text = command.text.trim().to_string();
    if text.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Empty command text".to_string()));
    }

    let req_id = Uuid::new_v4();
    info!(%req_id, context = %command.context, "Processing command: {}", text);

    // The pipeline task owns its inputs; a panic inside it is caught at
    // the join and converted into the degraded intent.
    let resolved = match tokio::spawn(resolve_command(state.clone(), text)).await {
        Ok(resolved) => resolved,
        Err(err) => {
            error!(%req_id, "Command pipeline aborted: {}", err);
            ResolvedIntent::degraded()
        }
    };

    info!(
        %req_id,
        action = %resolved.intent.action,
        source = %resolved.source,
        confidence = resolved.intent.confidence,
        "Command resolved"
    );

    Ok(Json(resolved.intent))
}

/// Model-or-fallback extraction, then local action execution
async fn resolve_command(state: AppStateArc, text: String) -> ResolvedIntent {
    let mut resolved = intent::request_intent(&state.ollama, &text).await;

    if resolved.intent.action != Action::None {
        if let Some(reply) = actions::execute_action(resolved.intent.action, &resolved.intent.target)
        {
            resolved.intent.reply = reply;
        }
    }

    resolved
}
