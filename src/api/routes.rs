use axum::{
    http::HeaderName,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, UuidRequestId, REQUEST_ID_HEADER};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, UuidRequestId))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/options", get(handlers::get_options))
        .route("/model-info", get(handlers::get_model_info))
        // Connectivity
        .route("/status", get(handlers::get_status))
        .route("/status/reset", post(handlers::reset_status))
        // Recommendations
        .route("/recommend", post(handlers::recommend_one))
        .route("/recommendations", post(handlers::recommend))
        .route("/recommendations/local", post(handlers::recommend_local))
        .route("/recommendations/random", get(handlers::random_picks))
        .route("/recommendations/featured", get(handlers::featured))
}
