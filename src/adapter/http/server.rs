//! axum router and request handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::adapter::http::dto::{AnalyzeBody, ExistsQuery, RegisterBody};
use crate::adapter::http::ApiError;
use crate::domain::{MarketAnalysis, PostRecord};
use crate::error::Result;
use crate::port::PostStore;
use crate::service::PostAnalyzer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The analysis pipeline, provider set resolved at startup.
    pub analyzer: Arc<PostAnalyzer>,
    /// Post lookup storage.
    pub store: Arc<dyn PostStore>,
}

/// Build the HTTP router for the POP backend.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Analysis endpoint, plus the historical alias kept for existing
        // extension installs.
        .route("/api/post-analyzer/analyze", post(analyze))
        .route("/api/tweet-analyzer/analyze", post(analyze))
        // Market existence lookup
        .route("/api/markets/exists", get(market_exists))
        .route("/api/markets/register", post(market_register))
        // Health check
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Analyze a social post into a market proposal.
///
/// Validation failures return 400 before the pipeline runs; every pipeline
/// failure is wrapped into the contract's 500 message.
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> std::result::Result<Json<MarketAnalysis>, ApiError> {
    let request = body.validate()?;
    let analysis = state
        .analyzer
        .analyze(&request)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to analyze post: {e}")))?;
    Ok(Json(analysis))
}

/// Answer whether a market already exists for a post.
async fn market_exists(
    State(state): State<AppState>,
    Query(query): Query<ExistsQuery>,
) -> std::result::Result<Json<Value>, ApiError> {
    let (source, post_id) = query.validate()?;
    let exists = state
        .store
        .exists(source, &post_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(json!({ "exists": exists })))
}

/// Register a post as having a market. Idempotent.
async fn market_register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> std::result::Result<Json<PostRecord>, ApiError> {
    let (source, post_id) = body.validate()?;
    let record = state
        .store
        .register(source, &post_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(record))
}
