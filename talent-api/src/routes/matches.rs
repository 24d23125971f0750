//! Matching endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use talent_core::TalentError;
use tracing::{error, info};

use crate::AppState;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

/// Create matching routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/match/freelancers/{job_id}", get(match_freelancers))
        .route("/match/jobs/{freelancer_id}", get(match_jobs))
        .route("/match/explain", post(explain_match))
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Query parameters for match listings
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    /// Number of matches to return (default 10, max 50)
    pub limit: Option<usize>,
}

impl MatchQuery {
    fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExplainRequest {
    job_id: i64,
    freelancer_id: i64,
}

#[derive(Debug, Serialize)]
struct ExplainResponse {
    explanation: Option<String>,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

fn storage_failure(e: TalentError) -> axum::response::Response {
    error!("Matching failed: {}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Best freelancers for a job
async fn match_freelancers(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(query): Query<MatchQuery>,
) -> impl IntoResponse {
    match state
        .matcher
        .match_freelancers_for_job(job_id, query.effective_limit())
        .await
    {
        Ok(results) => Json(results).into_response(),
        Err(e) => storage_failure(e),
    }
}

/// Best open jobs for a freelancer
async fn match_jobs(
    State(state): State<AppState>,
    Path(freelancer_id): Path<i64>,
    Query(query): Query<MatchQuery>,
) -> impl IntoResponse {
    match state
        .matcher
        .match_jobs_for_freelancer(freelancer_id, query.effective_limit())
        .await
    {
        Ok(results) => Json(results).into_response(),
        Err(e) => storage_failure(e),
    }
}

/// Natural-language explanation for one (job, freelancer) pair
async fn explain_match(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> impl IntoResponse {
    if !state.explainer.is_enabled() {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Match explanations not available. Set OPENAI_API_KEY to enable.",
        );
    }

    info!(
        "Explaining match of job {} for freelancer {}",
        request.job_id, request.freelancer_id
    );

    match state
        .explainer
        .explain_by_ids(request.job_id, request.freelancer_id)
        .await
    {
        Ok(explanation) => Json(ExplainResponse { explanation }).into_response(),
        Err(e) if e.is_not_found() => error_response(StatusCode::NOT_FOUND, e.to_string()),
        Err(e) => storage_failure(e),
    }
}
