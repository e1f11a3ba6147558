use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How the viewer feels right now
///
/// Serialized in lowercase. Deserialization also accepts the capitalized labels
/// used by the remote scoring service, which calls `Sad` "Melancholic".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[serde(alias = "Happy")]
    Happy,
    #[serde(alias = "Sad", alias = "melancholic", alias = "Melancholic")]
    Sad,
    #[serde(alias = "Excited")]
    Excited,
    #[serde(alias = "Relaxed")]
    Relaxed,
    #[serde(alias = "Romantic")]
    Romantic,
    #[serde(alias = "Adventurous")]
    Adventurous,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Excited,
        Mood::Relaxed,
        Mood::Romantic,
        Mood::Adventurous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Relaxed => "relaxed",
            Mood::Romantic => "romantic",
            Mood::Adventurous => "adventurous",
        }
    }

    /// Label understood by the remote scoring service
    pub fn remote_label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Melancholic",
            Mood::Excited => "Excited",
            Mood::Relaxed => "Relaxed",
            Mood::Romantic => "Romantic",
            Mood::Adventurous => "Adventurous",
        }
    }
}

/// Current weather outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[serde(alias = "Sunny")]
    Sunny,
    #[serde(alias = "Rainy")]
    Rainy,
    #[serde(alias = "Cloudy")]
    Cloudy,
    #[serde(alias = "Snowy")]
    Snowy,
}

impl Weather {
    pub const ALL: [Weather; 4] = [
        Weather::Sunny,
        Weather::Rainy,
        Weather::Cloudy,
        Weather::Snowy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Rainy => "rainy",
            Weather::Cloudy => "cloudy",
            Weather::Snowy => "snowy",
        }
    }

    pub fn remote_label(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Rainy => "Rainy",
            Weather::Cloudy => "Cloudy",
            Weather::Snowy => "Snowy",
        }
    }
}

/// Whether the viewing happens on a workday or over the weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    #[serde(alias = "Weekday")]
    Weekday,
    #[serde(alias = "Weekend")]
    Weekend,
}

impl DayType {
    pub const ALL: [DayType; 2] = [DayType::Weekday, DayType::Weekend];

    /// Saturday and Sunday are the weekend
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    /// Day type of the current date in the server's local time zone
    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Weekend => "weekend",
        }
    }

    pub fn remote_label(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
