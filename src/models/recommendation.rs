use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::{DayType, Mood, MovieRecord, RemoteOptions, Weather};
use crate::error::{AppError, AppResult};

/// The three selections a recommendation is computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationInput {
    pub mood: Mood,
    pub weather: Weather,
    /// Defaults to the current local day when omitted
    #[serde(alias = "day_type", default = "DayType::today")]
    pub day: DayType,
    /// Overrides the default weights for the local scorer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightVector>,
}

impl RecommendationInput {
    pub fn new(mood: Mood, weather: Weather, day: DayType) -> Self {
        Self {
            mood,
            weather,
            day,
            weights: None,
        }
    }

    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Weights to score with: the override if present, otherwise the defaults
    pub fn effective_weights(&self) -> WeightVector {
        self.weights.unwrap_or_default()
    }
}

/// Largest accepted value for a single weight
pub const MAX_WEIGHT: f64 = 1000.0;

/// Per-factor weights of the local scorer
///
/// The weights are not required to sum to 1; the total score is the plain
/// weighted sum of the normalized sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightVector {
    pub mood_weight: f64,
    pub weather_weight: f64,
    pub day_weight: f64,
    pub rating_weight: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            mood_weight: 0.4,
            weather_weight: 0.3,
            day_weight: 0.2,
            rating_weight: 0.1,
        }
    }
}

impl WeightVector {
    pub fn new(mood_weight: f64, weather_weight: f64, day_weight: f64, rating_weight: f64) -> Self {
        Self {
            mood_weight,
            weather_weight,
            day_weight,
            rating_weight,
        }
    }

    /// Rejects negative, non-finite, or larger than [`MAX_WEIGHT`] components
    pub fn validate(&self) -> AppResult<()> {
        let components = [
            ("mood_weight", self.mood_weight),
            ("weather_weight", self.weather_weight),
            ("day_weight", self.day_weight),
            ("rating_weight", self.rating_weight),
        ];

        for (name, value) in components {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
            if value > MAX_WEIGHT {
                return Err(AppError::InvalidInput(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_WEIGHT, value
                )));
            }
        }

        Ok(())
    }
}

/// Normalized sub-scores, each rounded to two decimals and within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub mood_score: f64,
    pub weather_score: f64,
    pub day_score: f64,
    pub rating_score: f64,
}

/// A catalog entry together with its local score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    #[serde(flatten)]
    pub movie: MovieRecord,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Display-level recommendation shared by the remote and fallback paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: String,
    pub title: String,
    /// Certainty in [0, 1]
    pub confidence: f64,
    /// 1-based position in the returned list
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub description: String,
}

impl ScoredResult {
    /// Builds a result from a locally scored entry at the given 1-based rank
    pub fn from_scored_entry(entry: &ScoredEntry, rank: u32) -> Self {
        Self {
            id: entry.movie.id.to_string(),
            title: entry.movie.title.clone(),
            confidence: entry.total_score.clamp(0.0, 1.0),
            rank,
            year: Some(entry.movie.year),
            genres: entry.movie.genres.clone(),
            description: entry.movie.description.clone(),
        }
    }
}

/// Which path produced a set of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    pub source: RecommendationSource,
    pub results: Vec<ScoredResult>,
    /// Informational message shown when the fallback path was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Result of probing the remote scoring service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub provider: String,
    pub checked_at: DateTime<Utc>,
}

/// Category values a caller can pick from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOptions {
    pub moods: Vec<Mood>,
    pub weather: Vec<Weather>,
    pub days: Vec<DayType>,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self {
            moods: Mood::ALL.to_vec(),
            weather: Weather::ALL.to_vec(),
            days: DayType::ALL.to_vec(),
        }
    }
}

impl CategoryOptions {
    /// Keeps the remote labels that map onto local categories, in remote order
    ///
    /// Returns `None` when a whole category would be left empty.
    pub fn from_remote(remote: &RemoteOptions) -> Option<Self> {
        let options = Self {
            moods: known_labels(&remote.moods),
            weather: known_labels(&remote.weather),
            days: known_labels(&remote.days),
        };

        if options.moods.is_empty() || options.weather.is_empty() || options.days.is_empty() {
            return None;
        }
        Some(options)
    }
}

fn known_labels<T: DeserializeOwned + PartialEq>(labels: &[String]) -> Vec<T> {
    let mut known: Vec<T> = Vec::with_capacity(labels.len());
    for label in labels {
        match serde_json::from_value::<T>(Value::String(label.clone())) {
            Ok(value) if !known.contains(&value) => known.push(value),
            Ok(_) => {}
            Err(_) => tracing::debug!(label = %label, "Ignoring unknown remote category label"),
        }
    }
    known
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightVector::default();
        assert_eq!(weights, WeightVector::new(0.4, 0.3, 0.2, 0.1));
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let weights = WeightVector::new(0.4, -0.1, 0.2, 0.1);
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("weather_weight"));
    }

    #[test]
    fn test_nan_weight_is_rejected() {
        let weights = WeightVector::new(f64::NAN, 0.3, 0.2, 0.1);
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_oversized_weight_is_rejected() {
        let err = WeightVector::new(0.4, 0.3, 1e307, 0.1).validate().unwrap_err();
        assert!(err.to_string().contains("day_weight"));
        assert!(WeightVector::new(MAX_WEIGHT, MAX_WEIGHT, MAX_WEIGHT, MAX_WEIGHT)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let weights = WeightVector::new(2.0, 0.0, 0.0, 5.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_partial_weight_override_keeps_defaults() {
        let weights: WeightVector = serde_json::from_str(r#"{"mood_weight": 1.0}"#).unwrap();
        assert_eq!(weights, WeightVector::new(1.0, 0.3, 0.2, 0.1));
    }

    #[test]
    fn test_input_accepts_day_type_alias() {
        let input: RecommendationInput =
            serde_json::from_str(r#"{"mood": "happy", "weather": "Rainy", "day_type": "weekend"}"#)
                .unwrap();
        assert_eq!(
            input,
            RecommendationInput::new(Mood::Happy, Weather::Rainy, DayType::Weekend)
        );
        assert_eq!(input.effective_weights(), WeightVector::default());
    }

    #[test]
    fn test_input_without_day_uses_today() {
        let before = DayType::today();
        let input: RecommendationInput =
            serde_json::from_str(r#"{"mood": "happy", "weather": "sunny"}"#).unwrap();
        let after = DayType::today();
        assert!(input.day == before || input.day == after);
    }

    #[test]
    fn test_input_without_weather_is_rejected() {
        let result: Result<RecommendationInput, _> =
            serde_json::from_str(r#"{"mood": "happy", "day": "weekend"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_remote_options_map_to_local_categories() {
        let remote = RemoteOptions {
            moods: vec!["Melancholic".to_string(), "Sad".to_string(), "Nostalgic".to_string()],
            weather: vec!["Snowy".to_string(), "Sunny".to_string()],
            days: vec!["Weekend".to_string()],
        };
        let options = CategoryOptions::from_remote(&remote).unwrap();
        assert_eq!(options.moods, vec![Mood::Sad]);
        assert_eq!(options.weather, vec![Weather::Snowy, Weather::Sunny]);
        assert_eq!(options.days, vec![DayType::Weekend]);
    }

    #[test]
    fn test_remote_options_without_known_labels() {
        let remote = RemoteOptions {
            moods: vec!["Nostalgic".to_string()],
            weather: vec!["Sunny".to_string()],
            days: vec!["Weekday".to_string()],
        };
        assert!(CategoryOptions::from_remote(&remote).is_none());
    }

    #[test]
    fn test_options_list_every_category() {
        let options = CategoryOptions::default();
        assert_eq!(options.moods.len(), 6);
        assert_eq!(options.weather.len(), 4);
        assert_eq!(options.days.len(), 2);
    }
}
