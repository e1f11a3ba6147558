use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{
        CategoryOptions, ConnectionStatus, MovieRecord, RecommendationInput,
        RecommendationOutcome, ScoredEntry, ScoredResult,
    },
};

use super::AppState;

const DEFAULT_RANDOM_LIMIT: usize = 3;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub input: RecommendationInput,
    pub num_recommendations: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Moods, weather conditions and day types a caller can pick from
pub async fn get_options(State(state): State<AppState>) -> Json<CategoryOptions> {
    Json(state.session.options().await)
}

/// Model description proxied from the remote service
pub async fn get_model_info(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let info = state.session.model_info().await?;
    Ok(Json(info))
}

/// Current connectivity to the remote service, probing once if needed
pub async fn get_status(State(state): State<AppState>) -> Json<ConnectionStatus> {
    Json(state.session.connection_status().await)
}

/// Drops the cached connectivity result and probes again
pub async fn reset_status(State(state): State<AppState>) -> Json<ConnectionStatus> {
    state.session.reset_connection().await;
    Json(state.session.connection_status().await)
}

/// Ranked recommendations, remote when available
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationOutcome>> {
    let count = request.num_recommendations.unwrap_or(state.default_limit);

    tracing::info!(
        mood = %request.input.mood,
        weather = %request.input.weather,
        day = %request.input.day,
        count = count,
        "Processing recommendation request"
    );

    let outcome = state.session.recommend(&request.input, count).await?;

    tracing::info!(
        source = ?outcome.source,
        results = outcome.results.len(),
        "Recommendations completed"
    );

    Ok(Json(outcome))
}

/// Single best recommendation
pub async fn recommend_one(
    State(state): State<AppState>,
    Json(input): Json<RecommendationInput>,
) -> AppResult<Json<RecommendationOutcome>> {
    let outcome = state.session.recommend_one(&input).await?;
    Ok(Json(outcome))
}

/// Local ranking with per-factor breakdown
pub async fn recommend_local(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<ScoredEntry>>> {
    let limit = request.num_recommendations.unwrap_or(state.default_limit);
    let entries = state.session.score_locally(&request.input, limit)?;
    Ok(Json(entries))
}

/// Random catalog entries
pub async fn random_picks(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<MovieRecord>> {
    let limit = query.limit.unwrap_or(DEFAULT_RANDOM_LIMIT);
    Json(state.session.random_picks(limit))
}

/// Curated picks in editorial order
pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<ScoredResult>> {
    let limit = query.limit.unwrap_or(state.default_limit);
    Json(state.session.featured(limit))
}
