/// Remote recommendation provider abstraction
///
/// The scoring service behind a provider is opaque: it receives the three
/// selections and answers with pre-ranked titles. The session falls back to the
/// local ranker whenever a provider call fails.
use crate::{
    error::AppResult,
    models::{
        RecommendationInput, RemoteHealth, RemoteOptions, RemoteRankedRecommendation,
        RemoteRecommendation,
    },
};

pub mod remote;

pub use remote::RemoteRecommender;

/// Upper bound the remote service applies to `num_recommendations`
pub const REMOTE_MAX_RECOMMENDATIONS: usize = 10;

/// Trait for remote recommendation sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Liveness probe used to decide between the remote and fallback paths
    async fn health(&self) -> AppResult<RemoteHealth>;

    /// Category labels the service understands
    async fn options(&self) -> AppResult<RemoteOptions>;

    /// Single best match for the input
    async fn recommend(&self, input: &RecommendationInput) -> AppResult<RemoteRecommendation>;

    /// Ranked matches. `count` is capped at [`REMOTE_MAX_RECOMMENDATIONS`].
    async fn recommend_many(
        &self,
        input: &RecommendationInput,
        count: usize,
    ) -> AppResult<Vec<RemoteRankedRecommendation>>;

    /// Free-form description of the model behind the service
    async fn model_info(&self) -> AppResult<serde_json::Value>;

    /// Provider name for logging and status reports
    fn name(&self) -> &'static str;
}
