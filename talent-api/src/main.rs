//! Talent Marketplace Matching API Server
//!
//! HTTP API server that ranks freelancers for jobs and jobs for freelancers.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use talent_embedding::{DisabledGateway, GatewayConfig, ModelGateway, OpenAIGateway};
use talent_matching::{JobMatcher, MatchExplainer, MatcherConfig, SqliteMarketplaceStore};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<JobMatcher>,
    /// Answers 503 through the routes when no model is configured
    pub explainer: Arc<MatchExplainer>,
}

/// Build the model gateway, falling back to a disabled one
fn build_gateway() -> Arc<dyn ModelGateway> {
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid model configuration: {}. AI features disabled.", e);
            return Arc::new(DisabledGateway);
        }
    };

    if config.api_key.is_none() {
        info!("OPENAI_API_KEY not set - ranking without semantic scores, explanations unavailable");
        return Arc::new(DisabledGateway);
    }

    match OpenAIGateway::new(config) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            warn!("Failed to initialize model gateway: {}. AI features disabled.", e);
            Arc::new(DisabledGateway)
        }
    }
}

/// Router with all routes and middleware
fn app(state: AppState) -> Router {
    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::health_routes())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,talent_api=debug")),
        )
        .init();

    info!("Starting Talent Matching API");

    let db_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/marketplace.db".to_string());
    info!("Opening marketplace database at: {}", db_path);
    let store = Arc::new(SqliteMarketplaceStore::open(&db_path)?);

    let gateway = build_gateway();

    let matcher_config = MatcherConfig::from_env()?;
    info!(
        "Matcher config: freelancer_pool={}, job_pool={}, embed_concurrency={}",
        matcher_config.freelancer_pool_limit,
        matcher_config.job_pool_limit,
        matcher_config.embedding_concurrency
    );
    let matcher = JobMatcher::with_config(store.clone(), gateway.clone(), matcher_config)?;
    let explainer = MatchExplainer::new(gateway, store);

    let state = AppState {
        matcher: Arc::new(matcher),
        explainer: Arc::new(explainer),
    };

    // Start server
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3001)));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
