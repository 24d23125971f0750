//! API route definitions

mod health;
mod matches;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(matches::routes())
}

/// Health routes live outside `/api`
pub fn health_routes() -> Router<AppState> {
    health::routes()
}
