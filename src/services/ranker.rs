use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    catalog::Catalog,
    models::{MovieRecord, RecommendationInput, ScoredEntry, WeightVector},
    services::scorer::Scorer,
};

/// Scores every catalog entry and returns the best `limit`, highest total first
///
/// The sort is stable: entries with equal totals keep their catalog order.
pub fn rank(
    scorer: &Scorer,
    catalog: &Catalog,
    input: &RecommendationInput,
    weights: &WeightVector,
    limit: usize,
) -> Vec<ScoredEntry> {
    let mut scored: Vec<ScoredEntry> = catalog
        .movies()
        .iter()
        .map(|movie| scorer.score(movie, input, weights))
        .collect();

    scored.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(limit);

    tracing::debug!(
        mood = %input.mood,
        weather = %input.weather,
        day = %input.day,
        catalog_size = catalog.len(),
        returned = scored.len(),
        "Ranked catalog"
    );

    scored
}

/// Up to `limit` catalog entries in random order, without scoring
pub fn random_sample<R: Rng + ?Sized>(
    catalog: &Catalog,
    limit: usize,
    rng: &mut R,
) -> Vec<MovieRecord> {
    let mut movies = catalog.movies().to_vec();
    movies.shuffle(rng);
    movies.truncate(limit);
    movies
}

/// [`random_sample`] using the thread-local generator
pub fn random_sample_thread(catalog: &Catalog, limit: usize) -> Vec<MovieRecord> {
    random_sample(catalog, limit, &mut rand::rng())
}
