use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DayType, Mood, Weather};

/// A catalog entry with author-assigned affinities for every category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: u32,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub description: String,
    /// Running time in minutes
    pub duration: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Quality score in [0, 10]
    pub rating: f64,
    pub mood_affinity: BTreeMap<Mood, f64>,
    pub weather_affinity: BTreeMap<Weather, f64>,
    pub day_affinity: BTreeMap<DayType, f64>,
    /// Hand-assigned confidence used to order the featured list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editorial_confidence: Option<f64>,
}

impl MovieRecord {
    pub fn mood_affinity_for(&self, mood: Mood) -> Option<f64> {
        self.mood_affinity.get(&mood).copied()
    }

    pub fn weather_affinity_for(&self, weather: Weather) -> Option<f64> {
        self.weather_affinity.get(&weather).copied()
    }

    pub fn day_affinity_for(&self, day: DayType) -> Option<f64> {
        self.day_affinity.get(&day).copied()
    }

    /// Category keys this record does not define, formatted as `group.key`
    pub fn missing_affinities(&self) -> Vec<String> {
        let moods = Mood::ALL
            .iter()
            .filter(|m| !self.mood_affinity.contains_key(m))
            .map(|m| format!("mood.{}", m));
        let weather = Weather::ALL
            .iter()
            .filter(|w| !self.weather_affinity.contains_key(w))
            .map(|w| format!("weather.{}", w));
        let days = DayType::ALL
            .iter()
            .filter(|d| !self.day_affinity.contains_key(d))
            .map(|d| format!("day.{}", d));

        moods.chain(weather).chain(days).collect()
    }
}
