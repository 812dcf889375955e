//! Externally supplied terrain and sighting data.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::spatial::GeoPoint;
use crate::species::Species;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FoodSource {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Terrain description for a whole bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSample {
    /// feet
    pub elevation: f64,
    /// 0–1
    pub cover_density: f64,
    #[serde(default)]
    pub water_sources: Vec<GeoPoint>,
    #[serde(default)]
    pub food_sources: Vec<FoodSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSighting {
    pub lat: f64,
    pub lon: f64,
    /// Local wall-clock time of the sighting.
    pub timestamp: NaiveDateTime,
    pub species: Species,
}

impl HistoricalSighting {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}
