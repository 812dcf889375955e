//! Per-factor scorers. Each returns a value in `[0, 1]`.

mod food;
mod historical;
mod seasonal;
mod temporal;
mod terrain;
mod weather;

pub use food::{food_score, FOOD_REACH_M};
pub use historical::{historical_score, recent_sightings, RecentSighting, SIGHTING_REACH_M};
pub use seasonal::seasonal_score;
pub use temporal::time_score;
pub use terrain::terrain_score;
pub use weather::weather_score;

/// Closeness of `value` to the optimal `[min, max]` range.
///
/// Inside the range the factor is 1. Outside it falls off linearly with the
/// distance from the range midpoint, reaching 0 one full range-width away.
/// A zero-width range only accepts an exact match.
pub fn range_factor(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    if min <= value && value <= max {
        return 1.0;
    }
    let range = max - min;
    if range == 0.0 {
        return if value == min { 1.0 } else { 0.0 };
    }
    let midpoint = (min + max) / 2.0;
    let distance = (value - midpoint).abs();
    (1.0 - distance / range).max(0.0)
}

/// Linear falloff from 1 at distance 0 to 0 at `reach_m`.
pub(crate) fn proximity_factor(distance_m: f64, reach_m: f64) -> f64 {
    if reach_m <= 0.0 {
        return if distance_m <= 0.0 { 1.0 } else { 0.0 };
    }
    (1.0 - distance_m / reach_m).max(0.0)
}

/// Running `Σ score·weight / Σ weight` over the terms that were included.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WeightedAverage {
    total: f64,
    weights: f64,
}

impl WeightedAverage {
    pub fn add(&mut self, score: f64, weight: f64) {
        self.total += score * weight;
        self.weights += weight;
    }

    pub fn value(&self) -> f64 {
        if self.weights > 0.0 {
            self.total / self.weights
        } else {
            0.0
        }
    }
}
