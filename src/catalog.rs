use std::collections::HashSet;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{DayType, Mood, MovieRecord, ScoredResult, Weather},
};

/// Immutable collection of movies the local scorer ranks
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids
    pub fn new(movies: Vec<MovieRecord>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for movie in &movies {
            if !seen.insert(movie.id) {
                return Err(AppError::Catalog(format!("duplicate movie id {}", movie.id)));
            }
        }

        Ok(Self { movies })
    }

    /// Parses a JSON array of movie records
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let movies: Vec<MovieRecord> = serde_json::from_str(json)?;
        Self::new(movies)
    }

    /// Reads a JSON catalog file
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_json_str(&json)?;

        tracing::info!(
            path = %path.display(),
            movies = catalog.len(),
            "Loaded catalog from file"
        );

        Ok(catalog)
    }

    /// The hand-authored catalog shipped with the service
    pub fn builtin() -> Self {
        Self {
            movies: builtin_movies(),
        }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn get(&self, id: u32) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Records with undefined affinity keys, paired with the keys they lack
    ///
    /// Missing keys score as zero; this only surfaces them so authors can fix the data.
    pub fn gaps(&self) -> Vec<(u32, Vec<String>)> {
        self.movies
            .iter()
            .map(|m| (m.id, m.missing_affinities()))
            .filter(|(_, missing)| !missing.is_empty())
            .collect()
    }

    /// Curated picks ordered by editorial confidence, highest first
    ///
    /// Entries without an editorial confidence are skipped. Equal confidences keep
    /// catalog order.
    pub fn featured(&self, limit: usize) -> Vec<ScoredResult> {
        let mut picks: Vec<(&MovieRecord, f64)> = self
            .movies
            .iter()
            .filter_map(|m| m.editorial_confidence.map(|c| (m, c)))
            .collect();

        picks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        picks
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, (movie, confidence))| ScoredResult {
                id: movie.id.to_string(),
                title: movie.title.clone(),
                confidence: confidence.clamp(0.0, 1.0),
                rank: i as u32 + 1,
                year: Some(movie.year),
                genres: movie.genres.clone(),
                description: movie.description.clone(),
            })
            .collect()
    }
}

struct Affinities {
    moods: [f64; 6],
    weather: [f64; 4],
    days: [f64; 2],
}

#[allow(clippy::too_many_arguments)]
fn movie(
    id: u32,
    title: &str,
    year: i32,
    director: &str,
    duration: u32,
    rating: f64,
    genres: &[&str],
    description: &str,
    affinities: Affinities,
    editorial_confidence: f64,
) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        year,
        director: director.to_string(),
        description: description.to_string(),
        duration,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        rating,
        mood_affinity: Mood::ALL.into_iter().zip(affinities.moods).collect(),
        weather_affinity: Weather::ALL.into_iter().zip(affinities.weather).collect(),
        day_affinity: DayType::ALL.into_iter().zip(affinities.days).collect(),
        editorial_confidence: Some(editorial_confidence),
    }
}

// Affinity columns follow Mood::ALL, Weather::ALL and DayType::ALL order.
fn builtin_movies() -> Vec<MovieRecord> {
    vec![
        movie(
            1,
            "3 Idiots",
            2009,
            "Rajkumar Hirani",
            170,
            8.4,
            &["Comedy", "Drama"],
            "A comedy about three engineering students and their journey through college.",
            Affinities {
                moods: [9.0, 6.0, 7.0, 7.0, 5.0, 6.0],
                weather: [8.0, 7.0, 7.0, 6.0],
                days: [7.0, 9.0],
            },
            0.85,
        ),
        movie(
            2,
            "Lagaan",
            2001,
            "Ashutosh Gowariker",
            224,
            8.1,
            &["Drama", "Sport"],
            "A period drama about a cricket match between British officers and Indian villagers.",
            Affinities {
                moods: [7.0, 4.0, 9.0, 5.0, 5.0, 9.0],
                weather: [9.0, 5.0, 6.0, 5.0],
                days: [5.0, 9.0],
            },
            0.82,
        ),
        movie(
            3,
            "Dil Chahta Hai",
            2001,
            "Farhan Akhtar",
            183,
            8.1,
            &["Drama", "Romance"],
            "A coming-of-age story about three friends and their relationships.",
            Affinities {
                moods: [8.0, 5.0, 6.0, 8.0, 8.0, 6.0],
                weather: [8.0, 6.0, 7.0, 6.0],
                days: [6.0, 8.0],
            },
            0.78,
        ),
        movie(
            4,
            "Jab We Met",
            2007,
            "Imtiaz Ali",
            138,
            7.9,
            &["Romance", "Comedy"],
            "A romantic comedy about two strangers who meet on a train journey.",
            Affinities {
                moods: [9.0, 6.0, 6.0, 7.0, 10.0, 7.0],
                weather: [7.0, 9.0, 7.0, 7.0],
                days: [7.0, 8.0],
            },
            0.75,
        ),
        movie(
            5,
            "Queen",
            2014,
            "Vikas Bahl",
            146,
            8.1,
            &["Comedy", "Drama"],
            "A woman embarks on her honeymoon alone after her fiance calls off their wedding.",
            Affinities {
                moods: [8.0, 7.0, 6.0, 7.0, 5.0, 9.0],
                weather: [8.0, 6.0, 6.0, 7.0],
                days: [7.0, 8.0],
            },
            0.72,
        ),
        movie(
            6,
            "PK",
            2014,
            "Rajkumar Hirani",
            153,
            8.1,
            &["Comedy", "Drama"],
            "An alien who comes to Earth on a research mission gets lost in Rajasthan.",
            Affinities {
                moods: [8.0, 5.0, 7.0, 6.0, 4.0, 7.0],
                weather: [7.0, 6.0, 8.0, 6.0],
                days: [7.0, 8.0],
            },
            0.70,
        ),
    ]
}
