//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    /// Semantic scoring and explanations need the model gateway
    ai_enabled: bool,
}

/// Health check handler
///
/// Matching keeps working without the model, so a disabled gateway reports
/// "degraded" but still answers 200.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ai_enabled = state.explainer.is_enabled();

    let status = if ai_enabled { "healthy" } else { "degraded" };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            ai_enabled,
        }),
    )
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
