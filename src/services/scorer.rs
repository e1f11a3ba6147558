use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, RecommendationInput, ScoreBreakdown, ScoredEntry, WeightVector},
};

/// Raw affinity or rating value that maps to a full sub-score
pub const DEFAULT_CEILING: f64 = 10.0;

/// Weighted multi-factor scorer for catalog entries
///
/// Each raw affinity is divided by the ceiling and capped at 1, so no single
/// category can contribute more than its weight. The rating always uses
/// [`DEFAULT_CEILING`] because its domain is fixed at [0, 10].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    ceiling: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scorer with a custom affinity ceiling
    pub fn with_ceiling(ceiling: f64) -> AppResult<Self> {
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "normalization ceiling must be a positive number, got {}",
                ceiling
            )));
        }

        Ok(Self { ceiling })
    }

    /// Scores one entry. A missing affinity key contributes zero.
    pub fn score(
        &self,
        movie: &MovieRecord,
        input: &RecommendationInput,
        weights: &WeightVector,
    ) -> ScoredEntry {
        let mood_score = normalize(
            affinity_or_zero(movie, "mood", movie.mood_affinity_for(input.mood)),
            self.ceiling,
        );
        let weather_score = normalize(
            affinity_or_zero(movie, "weather", movie.weather_affinity_for(input.weather)),
            self.ceiling,
        );
        let day_score = normalize(
            affinity_or_zero(movie, "day", movie.day_affinity_for(input.day)),
            self.ceiling,
        );
        let rating_score = normalize(movie.rating, DEFAULT_CEILING);

        let total_score = mood_score * weights.mood_weight
            + weather_score * weights.weather_weight
            + day_score * weights.day_weight
            + rating_score * weights.rating_weight;

        ScoredEntry {
            movie: movie.clone(),
            total_score: round2(total_score),
            breakdown: ScoreBreakdown {
                mood_score: round2(mood_score),
                weather_score: round2(weather_score),
                day_score: round2(day_score),
                rating_score: round2(rating_score),
            },
        }
    }
}

/// `min(raw / ceiling, 1)`, floored at 0 with NaN treated as 0
pub fn normalize(raw: f64, ceiling: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    (raw / ceiling).clamp(0.0, 1.0)
}

/// Rounds half-up to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn affinity_or_zero(movie: &MovieRecord, category: &str, value: Option<f64>) -> f64 {
    value.unwrap_or_else(|| {
        tracing::debug!(
            movie_id = movie.id,
            category = category,
            "Missing affinity, scoring as zero"
        );
        0.0
    })
}
