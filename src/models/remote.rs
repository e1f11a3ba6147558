use serde::{Deserialize, Serialize};

use super::{RecommendationInput, ScoredResult};

/// Request body for `/recommend` and `/recommendations`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RemoteRequest {
    pub mood: String,
    pub weather: String,
    pub day: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_recommendations: Option<usize>,
}

impl RemoteRequest {
    pub fn single(input: &RecommendationInput) -> Self {
        Self {
            mood: input.mood.remote_label().to_string(),
            weather: input.weather.remote_label().to_string(),
            day: input.day.remote_label().to_string(),
            num_recommendations: None,
        }
    }

    pub fn many(input: &RecommendationInput, count: usize) -> Self {
        Self {
            num_recommendations: Some(count),
            ..Self::single(input)
        }
    }
}

/// Echo of the request parameters in a single recommendation
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteInputParameters {
    pub mood: String,
    pub weather: String,
    pub day: String,
}

/// Response body of `POST /recommend`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteRecommendation {
    pub movie_title: String,
    pub confidence: f64,
    pub input_parameters: RemoteInputParameters,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Element of the `POST /recommendations` response array
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteRankedRecommendation {
    pub movie_title: String,
    pub confidence: f64,
    pub rank: u32,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `GET /options`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteOptions {
    pub moods: Vec<String>,
    pub weather: Vec<String>,
    pub days: Vec<String>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteHealth {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the remote service sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct RemoteErrorBody {
    pub detail: Option<String>,
}

impl From<RemoteRecommendation> for ScoredResult {
    fn from(rec: RemoteRecommendation) -> Self {
        let description = rec.description.unwrap_or_else(|| {
            format!(
                "A great movie for your {} mood on a {} {}.",
                rec.input_parameters.mood.to_lowercase(),
                rec.input_parameters.weather.to_lowercase(),
                rec.input_parameters.day.to_lowercase()
            )
        });

        ScoredResult {
            id: rec.movie_title.clone(),
            title: rec.movie_title,
            confidence: rec.confidence.clamp(0.0, 1.0),
            rank: 1,
            year: rec.year,
            genres: rec.genre.into_iter().collect(),
            description,
        }
    }
}

impl From<RemoteRankedRecommendation> for ScoredResult {
    fn from(rec: RemoteRankedRecommendation) -> Self {
        let confidence = rec.confidence.clamp(0.0, 1.0);
        let description = rec.description.unwrap_or_else(|| {
            format!(
                "Ranked #{} with {}% confidence.",
                rec.rank,
                (confidence * 100.0).round()
            )
        });

        ScoredResult {
            id: rec.movie_title.clone(),
            title: rec.movie_title,
            confidence,
            rank: rec.rank,
            year: rec.year,
            genres: rec.genre.into_iter().collect(),
            description,
        }
    }
}
