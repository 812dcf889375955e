//! Species profiles and the calendar/clock buckets they are keyed by.

mod tables;

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use tables::food_rating;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("unknown species '{0}' (expected one of: elk, mule_deer, turkey)")]
    UnknownSpecies(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Species {
    Elk,
    MuleDeer,
    Turkey,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Elk, Species::MuleDeer, Species::Turkey];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Elk => "elk",
            Species::MuleDeer => "mule_deer",
            Species::Turkey => "turkey",
        }
    }

    pub fn profile(self) -> &'static SpeciesProfile {
        match self {
            Species::Elk => &tables::ELK,
            Species::MuleDeer => &tables::MULE_DEER,
            Species::Turkey => &tables::TURKEY,
        }
    }

    /// Parses a list of species names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Species>, ScoringError> {
        let mut parsed = Vec::with_capacity(names.len());
        for name in names {
            let species = name.as_ref().parse::<Species>()?;
            if !parsed.contains(&species) {
                parsed.push(species);
            }
        }
        Ok(parsed)
    }
}

impl FromStr for Species {
    type Err = ScoringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "elk" => Ok(Species::Elk),
            "mule_deer" => Ok(Species::MuleDeer),
            "turkey" => Ok(Species::Turkey),
            other => Err(ScoringError::UnknownSpecies(other.to_string())),
        }
    }
}

impl TryFrom<String> for Species {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// `month` is 1-based, as returned by `chrono::Datelike::month`.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeBucket {
    Dawn,
    Morning,
    Midday,
    Afternoon,
    Dusk,
    Night,
}

impl TimeBucket {
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=6 => TimeBucket::Dawn,
            7..=9 => TimeBucket::Morning,
            10..=13 => TimeBucket::Midday,
            14..=16 => TimeBucket::Afternoon,
            17..=18 => TimeBucket::Dusk,
            _ => TimeBucket::Night,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Migration {
    Upward,
    Downward,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

impl OptimalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWeights {
    pub dawn: f64,
    pub morning: f64,
    pub midday: f64,
    pub afternoon: f64,
    pub dusk: f64,
    pub night: f64,
}

impl TimeWeights {
    pub fn weight(&self, bucket: TimeBucket) -> f64 {
        match bucket {
            TimeBucket::Dawn => self.dawn,
            TimeBucket::Morning => self.morning,
            TimeBucket::Midday => self.midday,
            TimeBucket::Afternoon => self.afternoon,
            TimeBucket::Dusk => self.dusk,
            TimeBucket::Night => self.night,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherTolerance {
    /// mph
    pub wind: f64,
    /// inches per hour
    pub rain: f64,
    pub pressure_sensitivity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonalPattern {
    pub elevation_band: OptimalRange,
    pub food_sources: &'static [&'static str],
    pub breeding: bool,
    pub migration: Migration,
    pub migration_factor: f64,
}

impl SeasonalPattern {
    pub fn eats(&self, food: &str) -> bool {
        self.food_sources.iter().any(|known| *known == food)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonalPatterns {
    pub spring: SeasonalPattern,
    pub summer: SeasonalPattern,
    pub fall: SeasonalPattern,
    pub winter: SeasonalPattern,
}

impl SeasonalPatterns {
    pub fn get(&self, season: Season) -> &SeasonalPattern {
        match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Fall => &self.fall,
            Season::Winter => &self.winter,
        }
    }
}

/// Habitat, weather and behaviour preferences for one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesProfile {
    /// feet
    pub elevation_optimal: OptimalRange,
    pub elevation_weight: f64,
    pub cover_optimal: f64,
    pub cover_weight: f64,
    /// meters
    pub water_distance_optimal: f64,
    pub water_weight: f64,
    /// °F
    pub temperature_optimal: OptimalRange,
    pub temperature_weight: f64,
    pub time_weights: TimeWeights,
    pub weather_tolerance: WeatherTolerance,
    pub seasonal_patterns: SeasonalPatterns,
}

impl SpeciesProfile {
    pub fn season(&self, season: Season) -> &SeasonalPattern {
        self.seasonal_patterns.get(season)
    }
}
