/// HTTP client for the external scoring service
///
/// Endpoints:
/// - `GET /health`, `GET /options`, `GET /model-info`
/// - `POST /recommend` → single recommendation
/// - `POST /recommendations` → ranked list, at most 10 entries
///
/// No timeout is applied; a slow service delays the caller until it answers.
use reqwest::{Client as HttpClient, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{
        RecommendationInput, RemoteErrorBody, RemoteHealth, RemoteOptions,
        RemoteRankedRecommendation, RemoteRecommendation, RemoteRequest,
    },
    services::providers::{RecommendationProvider, REMOTE_MAX_RECOMMENDATIONS},
};

#[derive(Clone)]
pub struct RemoteRecommender {
    http_client: HttpClient,
    base_url: String,
}

impl RemoteRecommender {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), base_url)
    }

    pub fn with_client(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let response = self.http_client.get(self.url(endpoint)).send().await?;
        Self::parse_response(endpoint, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self
            .http_client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await?;
        Self::parse_response(endpoint, response).await
    }

    /// Maps non-2xx statuses to `ExternalApi`, preferring the service's `detail` message
    async fn parse_response<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RemoteErrorBody>(&body)
                .ok()
                .and_then(|e| e.detail)
                .unwrap_or(body);

            tracing::warn!(
                endpoint = endpoint,
                status = %status,
                message = %message,
                "Recommendation service request failed"
            );

            return Err(AppError::ExternalApi(format!(
                "Recommendation service returned status {}: {}",
                status, message
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                endpoint = endpoint,
                error = %e,
                response = %text,
                "Failed to deserialize recommendation service response"
            );
            AppError::ExternalApi(format!("Failed to parse response from {}: {}", endpoint, e))
        })
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for RemoteRecommender {
    async fn health(&self) -> AppResult<RemoteHealth> {
        self.get_json("/health").await
    }

    async fn options(&self) -> AppResult<RemoteOptions> {
        self.get_json("/options").await
    }

    async fn recommend(&self, input: &RecommendationInput) -> AppResult<RemoteRecommendation> {
        let recommendation: RemoteRecommendation = self
            .post_json("/recommend", &RemoteRequest::single(input))
            .await?;

        tracing::info!(
            mood = %input.mood,
            weather = %input.weather,
            day = %input.day,
            title = %recommendation.movie_title,
            provider = self.name(),
            "Remote recommendation received"
        );

        Ok(recommendation)
    }

    async fn recommend_many(
        &self,
        input: &RecommendationInput,
        count: usize,
    ) -> AppResult<Vec<RemoteRankedRecommendation>> {
        let capped = count.min(REMOTE_MAX_RECOMMENDATIONS);
        let recommendations: Vec<RemoteRankedRecommendation> = self
            .post_json("/recommendations", &RemoteRequest::many(input, capped))
            .await?;

        tracing::info!(
            mood = %input.mood,
            weather = %input.weather,
            day = %input.day,
            requested = count,
            results = recommendations.len(),
            provider = self.name(),
            "Remote recommendations received"
        );

        Ok(recommendations)
    }

    async fn model_info(&self) -> AppResult<serde_json::Value> {
        self.get_json("/model-info").await
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
