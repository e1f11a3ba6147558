use std::sync::Arc;

use chrono::Utc;
use tokio::{sync::RwLock, task::JoinHandle};

use crate::{
    catalog::Catalog,
    error::AppResult,
    models::{
        CategoryOptions, ConnectionStatus, MovieRecord, RecommendationInput, RecommendationOutcome,
        RecommendationSource, ScoredEntry, ScoredResult,
    },
    services::{
        providers::RecommendationProvider,
        ranker,
        scorer::Scorer,
    },
};

const UNAVAILABLE_NOTICE: &str =
    "Recommendation service unavailable, showing local recommendations";
const FAILED_NOTICE: &str = "Recommendation service request failed, showing local recommendations";

/// Chooses between the remote provider and the local ranker
///
/// Constructed explicitly and passed to whoever needs it. The result of the
/// first connectivity probe is cached until [`reset_connection`] is called.
///
/// [`reset_connection`]: RecommendationSession::reset_connection
pub struct RecommendationSession {
    provider: Arc<dyn RecommendationProvider>,
    catalog: Arc<Catalog>,
    scorer: Scorer,
    connection: RwLock<Option<ConnectionStatus>>,
}

impl RecommendationSession {
    pub fn new(
        provider: Arc<dyn RecommendationProvider>,
        catalog: Arc<Catalog>,
        scorer: Scorer,
    ) -> Self {
        Self {
            provider,
            catalog,
            scorer,
            connection: RwLock::new(None),
        }
    }

    /// Whether the remote service is reachable, probing it on first use
    pub async fn check_connection(&self) -> bool {
        self.connection_status().await.connected
    }

    /// Cached probe result, probing the service on first use
    pub async fn connection_status(&self) -> ConnectionStatus {
        if let Some(status) = self.connection.read().await.as_ref() {
            return status.clone();
        }

        let mut cached = self.connection.write().await;
        // Another caller may have probed while we waited for the write lock
        if let Some(status) = cached.as_ref() {
            return status.clone();
        }

        let connected = match self.provider.health().await {
            Ok(health) => {
                tracing::info!(
                    provider = self.provider.name(),
                    status = %health.status,
                    "Recommendation service reachable"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Recommendation service unreachable, using local fallback"
                );
                false
            }
        };

        let status = ConnectionStatus {
            connected,
            provider: self.provider.name().to_string(),
            checked_at: Utc::now(),
        };
        *cached = Some(status.clone());

        status
    }

    /// Probes the service in the background so callers never wait on it
    pub fn spawn_probe(self: &Arc<Self>) -> JoinHandle<ConnectionStatus> {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let status = session.connection_status().await;
            tracing::info!(
                provider = %status.provider,
                connected = status.connected,
                "Initial recommendation service probe finished"
            );
            status
        })
    }

    /// Forgets the cached probe so the next check contacts the service again
    pub async fn reset_connection(&self) {
        *self.connection.write().await = None;
        tracing::info!(provider = self.provider.name(), "Connection status reset");
    }

    /// Ranked recommendations from the remote service, or the local ranker
    ///
    /// The remote path is capped at 10 results by the service; the local path
    /// returns up to `count`. Remote failures never surface as errors.
    pub async fn recommend(
        &self,
        input: &RecommendationInput,
        count: usize,
    ) -> AppResult<RecommendationOutcome> {
        input.effective_weights().validate()?;

        let notice = if self.check_connection().await {
            match self.provider.recommend_many(input, count).await {
                Ok(recommendations) => {
                    return Ok(RecommendationOutcome {
                        source: RecommendationSource::Remote,
                        results: recommendations.into_iter().map(ScoredResult::from).collect(),
                        notice: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        error = %e,
                        "Remote recommendations failed, falling back to local ranking"
                    );
                    FAILED_NOTICE
                }
            }
        } else {
            UNAVAILABLE_NOTICE
        };

        Ok(self.fallback(input, count, notice))
    }

    /// Single best recommendation, remote first
    pub async fn recommend_one(
        &self,
        input: &RecommendationInput,
    ) -> AppResult<RecommendationOutcome> {
        input.effective_weights().validate()?;

        let notice = if self.check_connection().await {
            match self.provider.recommend(input).await {
                Ok(recommendation) => {
                    return Ok(RecommendationOutcome {
                        source: RecommendationSource::Remote,
                        results: vec![ScoredResult::from(recommendation)],
                        notice: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        error = %e,
                        "Remote recommendation failed, falling back to local ranking"
                    );
                    FAILED_NOTICE
                }
            }
        } else {
            UNAVAILABLE_NOTICE
        };

        Ok(self.fallback(input, 1, notice))
    }

    /// Local ranking with the full per-factor breakdown
    pub fn score_locally(
        &self,
        input: &RecommendationInput,
        limit: usize,
    ) -> AppResult<Vec<ScoredEntry>> {
        let weights = input.effective_weights();
        weights.validate()?;
        Ok(ranker::rank(&self.scorer, &self.catalog, input, &weights, limit))
    }

    pub fn random_picks(&self, limit: usize) -> Vec<MovieRecord> {
        ranker::random_sample_thread(&self.catalog, limit)
    }

    pub fn featured(&self, limit: usize) -> Vec<ScoredResult> {
        self.catalog.featured(limit)
    }

    /// Categories to offer callers
    ///
    /// When the service is reachable its labels are used, restricted to the
    /// ones the local scorer also understands. Otherwise, or if the service
    /// fails, every local category is listed.
    pub async fn options(&self) -> CategoryOptions {
        if !self.check_connection().await {
            return CategoryOptions::default();
        }

        match self.provider.options().await {
            Ok(remote) => match CategoryOptions::from_remote(&remote) {
                Some(options) => options,
                None => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        "Remote options share no labels with the local categories"
                    );
                    CategoryOptions::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Remote options failed, listing local categories"
                );
                CategoryOptions::default()
            }
        }
    }

    /// Model description from the remote service
    pub async fn model_info(&self) -> AppResult<serde_json::Value> {
        self.provider.model_info().await
    }

    fn fallback(
        &self,
        input: &RecommendationInput,
        count: usize,
        notice: &str,
    ) -> RecommendationOutcome {
        let weights = input.effective_weights();
        let results: Vec<ScoredResult> =
            ranker::rank(&self.scorer, &self.catalog, input, &weights, count)
                .iter()
                .enumerate()
                .map(|(i, entry)| ScoredResult::from_scored_entry(entry, i as u32 + 1))
                .collect();

        tracing::info!(
            mood = %input.mood,
            weather = %input.weather,
            day = %input.day,
            results = results.len(),
            "Served local fallback recommendations"
        );

        RecommendationOutcome {
            source: RecommendationSource::Fallback,
            results,
            notice: Some(notice.to_string()),
        }
    }
}
