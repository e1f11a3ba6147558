use std::sync::Arc;

use crate::services::RecommendationSession;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RecommendationSession>,
    /// Count used when a request does not specify one
    pub default_limit: usize,
}

impl AppState {
    pub fn new(session: Arc<RecommendationSession>, default_limit: usize) -> Self {
        Self {
            session,
            default_limit,
        }
    }
}
